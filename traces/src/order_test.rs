use super::*;

// =============================================================
// Header-click cycling
// =============================================================

#[test]
fn cycle_fresh_column_starts_desc() {
    let next = OrderBy::cycle(None, "timestamp");
    assert_eq!(next, Some(OrderBy::new("timestamp", SortDirection::Desc)));
}

#[test]
fn cycle_other_column_resets_to_desc() {
    let current = OrderBy::new("latency", SortDirection::Asc);
    let next = OrderBy::cycle(Some(&current), "timestamp");
    assert_eq!(next, Some(OrderBy::new("timestamp", SortDirection::Desc)));
}

#[test]
fn cycle_same_column_flips_then_clears() {
    let desc = OrderBy::new("latency", SortDirection::Desc);
    let asc = OrderBy::cycle(Some(&desc), "latency");
    assert_eq!(asc, Some(OrderBy::new("latency", SortDirection::Asc)));

    let cleared = OrderBy::cycle(asc.as_ref(), "latency");
    assert_eq!(cleared, None);
}

// =============================================================
// URL codec
// =============================================================

#[test]
fn encode_parse_round_trips() {
    let order = OrderBy::new("total_cost", SortDirection::Asc);
    assert_eq!(order.encode(), "total_cost.asc");
    assert_eq!(OrderBy::parse(&order.encode()), Some(order));
}

#[test]
fn parse_rejects_malformed() {
    assert_eq!(OrderBy::parse("timestamp"), None);
    assert_eq!(OrderBy::parse(".desc"), None);
    assert_eq!(OrderBy::parse("timestamp.sideways"), None);
}

#[test]
fn parse_keeps_dots_in_column_names() {
    // rsplit: only the last segment is the direction.
    let order = OrderBy::parse("usage.total.desc").unwrap();
    assert_eq!(order.column, "usage.total");
    assert_eq!(order.direction, SortDirection::Desc);
}
