use super::*;

// =============================================================
// Sort indicator
// =============================================================

#[test]
fn indicator_blank_when_unsorted() {
    assert_eq!(sort_indicator(None, "timestamp"), "");
}

#[test]
fn indicator_blank_for_other_columns() {
    let order = OrderBy::new("latency", SortDirection::Asc);
    assert_eq!(sort_indicator(Some(&order), "timestamp"), "");
}

#[test]
fn indicator_shows_direction_for_active_column() {
    let asc = OrderBy::new("latency", SortDirection::Asc);
    assert_eq!(sort_indicator(Some(&asc), "latency"), "▲");
    let desc = OrderBy::new("latency", SortDirection::Desc);
    assert_eq!(sort_indicator(Some(&desc), "latency"), "▼");
}

// =============================================================
// Footer label
// =============================================================

#[test]
fn page_label_is_one_based() {
    assert_eq!(page_label(Pagination::new(0, 50), 101), "Page 1 of 3");
    assert_eq!(page_label(Pagination::new(2, 50), 101), "Page 3 of 3");
}

#[test]
fn page_label_on_empty_set() {
    assert_eq!(page_label(Pagination::default(), 0), "Page 1 of 1");
}

// =============================================================
// Payload
// =============================================================

#[test]
fn payload_defaults_to_loading() {
    assert_eq!(TablePayload::<Vec<u8>>::default(), TablePayload::Loading);
}
