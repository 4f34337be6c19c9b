use super::*;
use traces::filter::{FilterOperator, FilterValue};
use traces::level::TraceLevel;
use traces::order::SortDirection;

fn params(filter: Option<&str>, order: Option<&str>) -> ListParams {
    ListParams {
        page: Some(2),
        limit: Some(20),
        filter: filter.map(str::to_owned),
        search: Some("  checkout ".to_owned()),
        order: order.map(str::to_owned),
    }
}

// =============================================================
// Query-string translation
// =============================================================

#[test]
fn query_from_params_fills_all_components() {
    let query = query_from_params("proj-1", &params(Some("level.gte.WARNING"), Some("latency.asc")));
    assert_eq!(query.project_id, "proj-1");
    assert_eq!(query.page, Pagination::new(2, 20));
    assert_eq!(query.filters.len(), 1);
    assert_eq!(query.filters[0].op, FilterOperator::Gte);
    assert_eq!(query.filters[0].value, FilterValue::Level(TraceLevel::Warning));
    assert_eq!(query.search.as_deref(), Some("checkout"));
    assert_eq!(query.order_by, Some(OrderBy::new("latency", SortDirection::Asc)));
}

#[test]
fn query_from_params_defaults_match_the_domain_defaults() {
    let query = query_from_params("proj-1", &ListParams::default());
    assert_eq!(query.page, Pagination::default());
    assert!(query.filters.is_empty());
    assert_eq!(query.search, None);
    assert_eq!(query.order_by, None);
}

#[test]
fn malformed_filter_and_order_degrade_to_none() {
    let query = query_from_params("proj-1", &params(Some("level.gte"), Some("sideways")));
    assert!(query.filters.is_empty());
    assert_eq!(query.order_by, None);
}

#[test]
fn blank_search_is_dropped() {
    let mut p = ListParams::default();
    p.search = Some("   ".to_owned());
    assert_eq!(query_from_params("proj-1", &p).search, None);
}

// =============================================================
// Error mapping
// =============================================================

#[test]
fn not_found_maps_to_404() {
    let err = TraceError::NotFound(uuid::Uuid::nil());
    assert_eq!(trace_error_to_status(err), StatusCode::NOT_FOUND);
}
