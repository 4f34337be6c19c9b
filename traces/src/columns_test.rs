use super::*;
use std::collections::HashSet;

// =============================================================
// Registry shape
// =============================================================

#[test]
fn registry_ids_are_unique() {
    let mut seen = HashSet::new();
    for def in registry() {
        assert!(seen.insert(def.id), "duplicate column id: {}", def.id);
    }
}

#[test]
fn registry_covers_the_grid_surface() {
    assert_eq!(registry().len(), 25);
    for id in [
        "select",
        "bookmarked",
        "timestamp",
        "name",
        "user_id",
        "level",
        "input",
        "output",
        "metadata",
        "tags",
        "scores",
        "usage",
        "total_cost",
        "action",
    ] {
        assert!(column(id).is_some(), "missing column: {id}");
    }
}

#[test]
fn lazy_detail_columns_are_never_sortable_or_filterable() {
    for id in ["input", "output", "metadata"] {
        let def = column(id).unwrap();
        assert_eq!(def.kind, ColumnKind::LazyDetail);
        assert!(!def.sortable);
        assert!(!def.filterable());
    }
}

#[test]
fn select_and_action_have_empty_headers() {
    assert_eq!(column("select").unwrap().header, "");
    assert_eq!(column("action").unwrap().header, "");
}

// =============================================================
// Lookups
// =============================================================

#[test]
fn sortable_consults_the_registry() {
    assert!(sortable("timestamp"));
    assert!(sortable("latency"));
    assert!(!sortable("tags"));
    assert!(!sortable("no_such_column"));
}

#[test]
fn filter_kind_matches_declared_type() {
    assert_eq!(filter_kind("level"), Some(FilterKind::Level));
    assert_eq!(filter_kind("tags"), Some(FilterKind::List));
    assert_eq!(filter_kind("timestamp"), Some(FilterKind::Timestamp));
    assert_eq!(filter_kind("latency"), Some(FilterKind::Number));
    assert_eq!(filter_kind("scores"), None);
    assert_eq!(filter_kind("no_such_column"), None);
}

// =============================================================
// Pruning
// =============================================================

#[test]
fn filterable_columns_prunes_the_omission_list() {
    let all = filterable_columns(&[]);
    let pruned = filterable_columns(&["user_id", "session_id"]);
    assert_eq!(pruned.len(), all.len() - 2);
    assert!(pruned.iter().all(|c| c.id != "user_id" && c.id != "session_id"));
}

#[test]
fn default_hidden_ids_exclude_core_columns() {
    let hidden = default_hidden_ids();
    assert!(hidden.contains(&"prompt_tokens"));
    assert!(!hidden.contains(&"timestamp"));
    assert!(!hidden.contains(&"name"));
}
