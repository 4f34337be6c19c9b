use super::*;

fn tags(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| (*s).to_owned()).collect()
}

// =============================================================
// with_tag
// =============================================================

#[test]
fn with_tag_appends_new_tags() {
    assert_eq!(with_tag(tags(&["prod"]), "beta"), tags(&["prod", "beta"]));
}

#[test]
fn with_tag_trims_whitespace() {
    assert_eq!(with_tag(Vec::new(), "  prod  "), tags(&["prod"]));
}

#[test]
fn with_tag_ignores_blank_and_duplicate() {
    assert_eq!(with_tag(tags(&["prod"]), ""), tags(&["prod"]));
    assert_eq!(with_tag(tags(&["prod"]), "   "), tags(&["prod"]));
    assert_eq!(with_tag(tags(&["prod"]), "prod"), tags(&["prod"]));
}

// =============================================================
// without_tag
// =============================================================

#[test]
fn without_tag_removes_and_keeps_order() {
    assert_eq!(without_tag(tags(&["a", "b", "c"]), "b"), tags(&["a", "c"]));
}

#[test]
fn without_tag_missing_is_noop() {
    assert_eq!(without_tag(tags(&["a"]), "z"), tags(&["a"]));
}
