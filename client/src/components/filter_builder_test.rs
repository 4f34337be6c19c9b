use super::*;

// =============================================================
// Operator presentation
// =============================================================

#[test]
fn op_symbols_cover_every_operator() {
    let ops = [
        FilterOperator::Eq,
        FilterOperator::Neq,
        FilterOperator::Contains,
        FilterOperator::Gt,
        FilterOperator::Gte,
        FilterOperator::Lt,
        FilterOperator::Lte,
        FilterOperator::AnyOf,
        FilterOperator::AllOf,
    ];
    for op in ops {
        assert!(!op_symbol(op).is_empty());
    }
}

#[test]
fn predicate_summary_reads_naturally() {
    let pred = FilterPredicate {
        column: "level".to_owned(),
        op: FilterOperator::Gte,
        value: FilterValue::Level(TraceLevel::Warning),
    };
    assert_eq!(predicate_summary(&pred), "level ≥ WARNING");

    let pred = FilterPredicate {
        column: "tags".to_owned(),
        op: FilterOperator::AnyOf,
        value: FilterValue::List(vec!["prod".to_owned(), "beta".to_owned()]),
    };
    assert_eq!(predicate_summary(&pred), "tags any of prod,beta");
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn default_operator_is_first_applicable() {
    assert_eq!(default_operator("tags"), "any-of");
    assert_eq!(default_operator("timestamp"), "gte");
    assert_eq!(default_operator("name"), "eq");
}

#[test]
fn default_operator_for_unknown_column_is_empty() {
    assert_eq!(default_operator("no_such_column"), "");
}

#[test]
fn placeholders_hint_the_value_grammar() {
    assert_eq!(placeholder_for(Some(FilterKind::Timestamp)), "epoch ms");
    assert_eq!(placeholder_for(Some(FilterKind::List)), "comma,separated");
    assert_eq!(placeholder_for(None), "value");
}
