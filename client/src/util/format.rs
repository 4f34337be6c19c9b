//! Cell formatting helpers for the trace grid.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use rust_decimal::Decimal;
use traces::row::TokenUsage;

/// Formats a millisecond epoch timestamp as `YYYY-MM-DD HH:MM:SS` (UTC).
#[must_use]
pub fn format_ts(ms: i64) -> String {
    if ms <= 0 {
        return "--".to_owned();
    }
    let days = ms.div_euclid(86_400_000);
    let rem_ms = ms.rem_euclid(86_400_000);
    let (year, month, day) = civil_from_days(days);
    let secs = rem_ms / 1000;
    let s = secs % 60;
    let m = (secs / 60) % 60;
    let h = secs / 3600;
    format!("{year:04}-{month:02}-{day:02} {h:02}:{m:02}:{s:02}")
}

/// Gregorian date from days since the Unix epoch.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146_096) / 365;
    let year = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = if month <= 2 { year + 1 } else { year };
    (year, u32::try_from(month).unwrap_or(1), u32::try_from(day).unwrap_or(1))
}

/// Formats a duration in seconds. A measured zero renders as `0.00s` — only
/// an absent latency leaves the cell blank, and that decision is the
/// caller's.
#[must_use]
pub fn format_duration(secs: f64) -> String {
    if secs <= 0.0 {
        "0.00s".to_owned()
    } else if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.2}s")
    } else {
        let minutes = (secs / 60.0).floor();
        let rest = secs - minutes * 60.0;
        format!("{minutes:.0}m {rest:.0}s")
    }
}

/// Formats a cost amount as dollars, trailing zeros trimmed.
#[must_use]
pub fn format_cost(amount: Decimal) -> String {
    format!("${}", amount.round_dp(6).normalize())
}

/// Abbreviates large counts: `999`, `1.2k`, `3.4M`.
#[must_use]
pub fn format_count(value: i64) -> String {
    if value < 1_000 {
        value.to_string()
    } else if value < 1_000_000 {
        #[allow(clippy::cast_precision_loss)]
        let scaled = value as f64 / 1_000.0;
        format!("{}k", trim_decimal(scaled))
    } else {
        #[allow(clippy::cast_precision_loss)]
        let scaled = value as f64 / 1_000_000.0;
        format!("{}M", trim_decimal(scaled))
    }
}

fn trim_decimal(value: f64) -> String {
    let raw = format!("{value:.1}");
    raw.strip_suffix(".0").map_or(raw.clone(), str::to_owned)
}

/// One-line usage summary: `prompt → completion (Σ total)`.
#[must_use]
pub fn usage_summary(usage: &TokenUsage) -> String {
    format!(
        "{} → {} (Σ {})",
        format_count(usage.prompt_tokens),
        format_count(usage.completion_tokens),
        format_count(usage.total_tokens),
    )
}
