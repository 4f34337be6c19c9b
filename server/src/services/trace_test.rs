use super::*;
use traces::page::Pagination;

fn query_with(filters: Vec<FilterPredicate>, search: Option<&str>) -> TraceQuery {
    TraceQuery {
        project_id: "proj-1".to_owned(),
        page: Pagination::default(),
        filters,
        search: search.map(str::to_owned),
        order_by: None,
    }
}

fn where_sql(query: &TraceQuery) -> String {
    let mut qb = QueryBuilder::new("SELECT 1 FROM traces t");
    push_where(&mut qb, query);
    qb.into_sql()
}

// =============================================================
// WHERE assembly
// =============================================================

#[test]
fn where_always_scopes_by_project() {
    let sql = where_sql(&query_with(Vec::new(), None));
    assert!(sql.contains("WHERE t.project_id = $1"));
}

#[test]
fn level_gte_expands_to_membership_test() {
    let sql = where_sql(&query_with(
        vec![FilterPredicate {
            column: "level".to_owned(),
            op: FilterOperator::Gte,
            value: FilterValue::Level(TraceLevel::Warning),
        }],
        None,
    ));
    assert!(sql.contains("t.level = ANY($2)"));
}

#[test]
fn tag_operators_use_array_containment() {
    let any = where_sql(&query_with(
        vec![FilterPredicate {
            column: "tags".to_owned(),
            op: FilterOperator::AnyOf,
            value: FilterValue::List(vec!["prod".to_owned()]),
        }],
        None,
    ));
    assert!(any.contains("t.tags && $2"));

    let all = where_sql(&query_with(
        vec![FilterPredicate {
            column: "tags".to_owned(),
            op: FilterOperator::AllOf,
            value: FilterValue::List(vec!["prod".to_owned()]),
        }],
        None,
    ));
    assert!(all.contains("t.tags @> $2"));
}

#[test]
fn timestamp_bounds_become_range_comparisons() {
    let sql = where_sql(&query_with(
        vec![
            FilterPredicate {
                column: "timestamp".to_owned(),
                op: FilterOperator::Gte,
                value: FilterValue::Timestamp(1_000),
            },
            FilterPredicate {
                column: "timestamp".to_owned(),
                op: FilterOperator::Lte,
                value: FilterValue::Timestamp(9_000),
            },
        ],
        None,
    ));
    assert!(sql.contains("t.timestamp >= $2"));
    assert!(sql.contains("t.timestamp <= $3"));
}

#[test]
fn text_contains_uses_ilike() {
    let sql = where_sql(&query_with(
        vec![FilterPredicate {
            column: "name".to_owned(),
            op: FilterOperator::Contains,
            value: FilterValue::Text("chat".to_owned()),
        }],
        None,
    ));
    assert!(sql.contains("t.name ILIKE $2"));
}

#[test]
fn search_matches_id_name_and_user() {
    let sql = where_sql(&query_with(Vec::new(), Some("checkout")));
    assert!(sql.contains("t.id::text ILIKE $2"));
    assert!(sql.contains("t.name ILIKE $3"));
    assert!(sql.contains("t.user_id ILIKE $4"));
}

#[test]
fn unmappable_predicates_are_skipped_not_spliced() {
    let sql = where_sql(&query_with(
        vec![FilterPredicate {
            // A column the translator does not know.
            column: "favourite_color".to_owned(),
            op: FilterOperator::Eq,
            value: FilterValue::Text("blue'; DROP TABLE traces; --".to_owned()),
        }],
        None,
    ));
    assert_eq!(sql, "SELECT 1 FROM traces t WHERE t.project_id = $1");
}

#[test]
fn user_scope_predicate_translates_like_any_text_filter() {
    let sql = where_sql(&query_with(vec![FilterPredicate::user_scope("user-7")], None));
    assert!(sql.contains("t.user_id = $2"));
}

// =============================================================
// ORDER BY safe-list
// =============================================================

#[test]
fn default_order_is_timestamp_desc() {
    assert_eq!(order_clause(None), "t.timestamp DESC NULLS LAST");
}

#[test]
fn sortable_columns_map_to_their_expressions() {
    let order = OrderBy::new("latency", SortDirection::Asc);
    assert_eq!(order_clause(Some(&order)), "t.latency ASC NULLS LAST");
}

#[test]
fn level_sorts_by_severity_rank() {
    let order = OrderBy::new("level", SortDirection::Desc);
    assert!(order_clause(Some(&order)).starts_with("CASE t.level"));
}

#[test]
fn unknown_sort_column_falls_back_to_timestamp() {
    let order = OrderBy::new("'; DROP TABLE traces; --", SortDirection::Asc);
    assert_eq!(order_clause(Some(&order)), "t.timestamp DESC NULLS LAST");
}

#[test]
fn unsortable_column_falls_back_to_timestamp() {
    let order = OrderBy::new("tags", SortDirection::Asc);
    assert_eq!(order_clause(Some(&order)), "t.timestamp DESC NULLS LAST");
}

// =============================================================
// Helpers
// =============================================================

#[test]
fn like_pattern_escapes_wildcards() {
    assert_eq!(like_pattern("50%_done"), "%50\\%\\_done%");
    assert_eq!(like_pattern("plain"), "%plain%");
}

#[test]
fn ms_timestamp_conversion_round_trips() {
    let ms = 1_722_470_400_123_i64;
    let ts = ms_to_timestamp(ms).unwrap();
    assert_eq!(timestamp_to_ms(ts), ms);
}

#[test]
fn window_pushes_only_present_bounds() {
    let mut qb = QueryBuilder::new("SELECT 1 FROM traces t WHERE t.project_id = 'p'");
    push_window(&mut qb, Some(TimeWindow { from: Some(1_000), to: None }));
    let sql = qb.into_sql();
    assert!(sql.contains("t.timestamp >= $1"));
    assert!(!sql.contains("t.timestamp <= "));
}
