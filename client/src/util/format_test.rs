use super::*;

// =============================================================
// Timestamps
// =============================================================

#[test]
fn format_ts_renders_utc_date_and_time() {
    assert_eq!(format_ts(1_722_470_400_000), "2024-08-01 00:00:00");
    assert_eq!(format_ts(1_722_470_400_000 + 3_723_000), "2024-08-01 01:02:03");
}

#[test]
fn format_ts_handles_early_epoch() {
    assert_eq!(format_ts(86_400_000), "1970-01-02 00:00:00");
}

#[test]
fn format_ts_placeholder_for_unset() {
    assert_eq!(format_ts(0), "--");
    assert_eq!(format_ts(-5), "--");
}

#[test]
fn format_ts_handles_leap_day() {
    // 2024-02-29T12:00:00Z
    assert_eq!(format_ts(1_709_208_000_000), "2024-02-29 12:00:00");
}

// =============================================================
// Durations
// =============================================================

#[test]
fn zero_latency_renders_formatted_not_blank() {
    assert_eq!(format_duration(0.0), "0.00s");
}

#[test]
fn sub_second_renders_millis() {
    assert_eq!(format_duration(0.5), "500ms");
    assert_eq!(format_duration(0.042), "42ms");
}

#[test]
fn seconds_render_with_two_decimals() {
    assert_eq!(format_duration(1.234), "1.23s");
    assert_eq!(format_duration(59.9), "59.90s");
}

#[test]
fn minutes_render_split() {
    assert_eq!(format_duration(75.4), "1m 15s");
}

// =============================================================
// Costs and counts
// =============================================================

#[test]
fn cost_trims_trailing_zeros() {
    assert_eq!(format_cost(rust_decimal::Decimal::new(30, 4)), "$0.003");
    assert_eq!(format_cost(rust_decimal::Decimal::ZERO), "$0");
}

#[test]
fn cost_rounds_to_six_decimals() {
    let amount = rust_decimal::Decimal::new(1_234_567_891, 12); // 0.001234567891
    assert_eq!(format_cost(amount), "$0.001235");
}

#[test]
fn counts_abbreviate() {
    assert_eq!(format_count(999), "999");
    assert_eq!(format_count(1_000), "1k");
    assert_eq!(format_count(1_230), "1.2k");
    assert_eq!(format_count(3_400_000), "3.4M");
}

#[test]
fn usage_summary_shows_all_three_counts() {
    let usage = TokenUsage { prompt_tokens: 1_200, completion_tokens: 20, total_tokens: 1_220 };
    assert_eq!(usage_summary(&usage), "1.2k → 20 (Σ 1.2k)");
}
