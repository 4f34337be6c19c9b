use super::*;
use crate::filter::{FilterOperator, FilterValue};
use crate::level::TraceLevel;
use crate::order::SortDirection;

fn base_filter() -> FilterState {
    FilterState::new(vec![FilterPredicate {
        column: "level".to_owned(),
        op: FilterOperator::Gte,
        value: FilterValue::Level(TraceLevel::Warning),
    }])
}

// =============================================================
// Assembly
// =============================================================

#[test]
fn assemble_includes_the_user_scope_predicate() {
    let query = TraceQuery::assemble(
        "proj-1",
        Pagination::default(),
        &base_filter(),
        Some("user-7"),
        None,
        None,
    );
    assert_eq!(query.filters.len(), 2);
    assert_eq!(query.filters[1], FilterPredicate::user_scope("user-7"));
}

#[test]
fn assemble_without_scope_keeps_user_filters_only() {
    let query =
        TraceQuery::assemble("proj-1", Pagination::default(), &base_filter(), None, None, None);
    assert_eq!(query.filters.len(), 1);
}

#[test]
fn assemble_normalizes_blank_search_to_none() {
    let query = TraceQuery::assemble(
        "proj-1",
        Pagination::default(),
        &FilterState::default(),
        None,
        Some("   "),
        None,
    );
    assert_eq!(query.search, None);

    let query = TraceQuery::assemble(
        "proj-1",
        Pagination::default(),
        &FilterState::default(),
        None,
        Some("  checkout "),
        None,
    );
    assert_eq!(query.search.as_deref(), Some("checkout"));
}

// =============================================================
// Cache key stability
// =============================================================

fn assembled(search: Option<&str>, user: Option<&str>) -> TraceQuery {
    TraceQuery::assemble(
        "proj-1",
        Pagination::new(1, 20),
        &base_filter(),
        user,
        search,
        Some(&OrderBy::new("timestamp", SortDirection::Desc)),
    )
}

#[test]
fn equal_inputs_produce_equal_keys() {
    assert_eq!(assembled(Some("x"), None).cache_key(), assembled(Some("x"), None).cache_key());
}

#[test]
fn any_component_change_changes_the_key() {
    let base = assembled(None, None);

    let mut other = base.clone();
    other.page.page_index = 2;
    assert_ne!(base.cache_key(), other.cache_key());

    assert_ne!(base.cache_key(), assembled(Some("x"), None).cache_key());
    assert_ne!(base.cache_key(), assembled(None, Some("user-7")).cache_key());

    let mut other = base.clone();
    other.order_by = None;
    assert_ne!(base.cache_key(), other.cache_key());

    let mut other = base.clone();
    other.project_id = "proj-2".to_owned();
    assert_ne!(base.cache_key(), other.cache_key());
}
