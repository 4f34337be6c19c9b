use super::*;
use traces::record::RecordUsage;

fn make_record(id: &str, level: &str) -> TraceRecord {
    TraceRecord {
        id: id.to_owned(),
        project_id: "proj-1".to_owned(),
        timestamp: 1_722_470_400_000,
        name: "chat".to_owned(),
        user_id: None,
        level: level.to_owned(),
        observation_count: 1,
        latency: Some(0.4),
        release: None,
        version: None,
        session_id: None,
        bookmarked: false,
        tags: Vec::new(),
        scores: Vec::new(),
        usage: RecordUsage::default(),
        calculated_input_cost: None,
        calculated_output_cost: None,
        calculated_total_cost: None,
    }
}

// =============================================================
// Row transformation at the response boundary
// =============================================================

#[test]
fn transform_keeps_valid_records_in_order() {
    let rows = transform_records(vec![make_record("a", "DEFAULT"), make_record("b", "ERROR")]);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, "a");
    assert_eq!(rows[1].id, "b");
}

#[test]
fn transform_drops_records_failing_validation() {
    let rows = transform_records(vec![
        make_record("a", "DEFAULT"),
        make_record("", "DEFAULT"),
        make_record("c", "NOT_A_LEVEL"),
    ]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "a");
}

#[test]
fn transform_of_empty_page_is_empty() {
    assert!(transform_records(Vec::new()).is_empty());
}

// =============================================================
// Score chips
// =============================================================

#[test]
fn score_chip_shows_name_and_rounded_value() {
    let score = TraceScore { name: "accuracy".to_owned(), value: 0.904, source: None };
    assert_eq!(score_chip_label(&score), "accuracy: 0.90");
}
