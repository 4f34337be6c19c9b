use super::*;
use crate::record::RecordUsage;
use rust_decimal::Decimal;

fn make_record(id: &str) -> TraceRecord {
    TraceRecord {
        id: id.to_owned(),
        project_id: "proj-1".to_owned(),
        timestamp: 1_722_470_400_000,
        name: "chat-completion".to_owned(),
        user_id: Some("user-7".to_owned()),
        level: "DEFAULT".to_owned(),
        observation_count: 3,
        latency: Some(1.5),
        release: Some("v42".to_owned()),
        version: None,
        session_id: None,
        bookmarked: false,
        tags: vec!["prod".to_owned()],
        scores: Vec::new(),
        usage: RecordUsage { prompt_tokens: 100, completion_tokens: 20, total_tokens: 120 },
        calculated_input_cost: Some(Decimal::new(10, 4)),
        calculated_output_cost: Some(Decimal::new(20, 4)),
        calculated_total_cost: Some(Decimal::new(30, 4)),
    }
}

// =============================================================
// Validation boundary
// =============================================================

#[test]
fn from_record_accepts_valid_record() {
    let row = TraceRow::from_record(make_record("tr-1")).unwrap();
    assert_eq!(row.id, "tr-1");
    assert_eq!(row.level, TraceLevel::Default);
    assert_eq!(row.observation_count, 3);
}

#[test]
fn from_record_rejects_empty_id() {
    assert_eq!(TraceRow::from_record(make_record("")), Err(RowError::MissingId));
}

#[test]
fn from_record_rejects_unknown_level() {
    let mut record = make_record("tr-1");
    record.level = "CATASTROPHIC".to_owned();
    assert_eq!(
        TraceRow::from_record(record),
        Err(RowError::UnknownLevel("CATASTROPHIC".to_owned()))
    );
}

// =============================================================
// Null coercion
// =============================================================

#[test]
fn latency_none_iff_source_null() {
    let mut record = make_record("tr-1");
    record.latency = None;
    assert_eq!(TraceRow::from_record(record).unwrap().latency, None);
}

#[test]
fn latency_zero_is_preserved() {
    let mut record = make_record("tr-1");
    record.latency = Some(0.0);
    assert_eq!(TraceRow::from_record(record).unwrap().latency, Some(0.0));
}

#[test]
fn optional_scalars_pass_through() {
    let row = TraceRow::from_record(make_record("tr-1")).unwrap();
    assert_eq!(row.release.as_deref(), Some("v42"));
    assert_eq!(row.version, None);
    assert_eq!(row.session_id, None);
}

// =============================================================
// Usage / cost regrouping
// =============================================================

#[test]
fn usage_fields_are_flattened() {
    let row = TraceRow::from_record(make_record("tr-1")).unwrap();
    assert_eq!(row.usage.prompt_tokens, 100);
    assert_eq!(row.usage.completion_tokens, 20);
    assert_eq!(row.usage.total_tokens, 120);
}

#[test]
fn cost_summary_groups_calculated_columns() {
    let row = TraceRow::from_record(make_record("tr-1")).unwrap();
    let cost = row.cost.unwrap();
    assert_eq!(cost.input, Some(Decimal::new(10, 4)));
    assert_eq!(cost.output, Some(Decimal::new(20, 4)));
    assert_eq!(cost.total, Some(Decimal::new(30, 4)));
}

#[test]
fn cost_absent_when_all_components_null() {
    let mut record = make_record("tr-1");
    record.calculated_input_cost = None;
    record.calculated_output_cost = None;
    record.calculated_total_cost = None;
    assert_eq!(TraceRow::from_record(record).unwrap().cost, None);
}

#[test]
fn cost_present_when_any_component_set() {
    let mut record = make_record("tr-1");
    record.calculated_input_cost = None;
    record.calculated_output_cost = None;
    let cost = TraceRow::from_record(record).unwrap().cost.unwrap();
    assert_eq!(cost.input, None);
    assert_eq!(cost.total, Some(Decimal::new(30, 4)));
}
