use super::*;

// =============================================================
// Page count
// =============================================================

#[test]
fn page_count_rounds_up() {
    let page = Pagination::new(0, 50);
    assert_eq!(page.page_count(101), 3);
    assert_eq!(page.page_count(100), 2);
    assert_eq!(page.page_count(1), 1);
}

#[test]
fn page_count_of_empty_set_is_one() {
    assert_eq!(Pagination::default().page_count(0), 1);
}

// =============================================================
// Offsets and clamping
// =============================================================

#[test]
fn offset_is_index_times_size() {
    assert_eq!(Pagination::new(2, 50).offset(), 100);
    assert_eq!(Pagination::new(0, 10).offset(), 0);
}

#[test]
fn clamp_pulls_overrun_back_to_last_page() {
    let page = Pagination::new(9, 50);
    assert_eq!(page.clamp_to(101).page_index, 2);
}

#[test]
fn clamp_keeps_valid_index() {
    let page = Pagination::new(1, 50);
    assert_eq!(page.clamp_to(101).page_index, 1);
}

// =============================================================
// Construction
// =============================================================

#[test]
fn default_is_first_page_of_fifty() {
    let page = Pagination::default();
    assert_eq!(page.page_index, 0);
    assert_eq!(page.page_size, 50);
}

#[test]
fn zero_page_size_falls_back_to_default() {
    assert_eq!(Pagination::new(0, 0).page_size, DEFAULT_PAGE_SIZE);
}

#[test]
fn with_page_size_resets_to_first_page() {
    let page = Pagination::new(4, 50).with_page_size(100);
    assert_eq!(page.page_index, 0);
    assert_eq!(page.page_size, 100);
}
