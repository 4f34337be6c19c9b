//! Validated view rows for the trace grid.
//!
//! DESIGN
//! ======
//! [`TraceRow::from_record`] is the single validation boundary between the
//! wire and the UI: the level string is parsed, the id is checked, and the
//! usage/cost sub-fields are regrouped into the flatter shape the grid
//! renders. Cells downstream can rely on the row shape unconditionally
//! instead of re-checking value types per cell.

#[cfg(test)]
#[path = "row_test.rs"]
mod row_test;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::level::TraceLevel;
use crate::record::{TraceRecord, TraceScore};

/// A record the listing cannot render.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    #[error("record has an empty id")]
    MissingId,
    #[error("unknown trace level: {0}")]
    UnknownLevel(String),
}

/// Aggregated token usage, view shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: i64,
    pub completion_tokens: i64,
    pub total_tokens: i64,
}

/// Cost triple, present when at least one component was calculated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostSummary {
    pub input: Option<Decimal>,
    pub output: Option<Decimal>,
    pub total: Option<Decimal>,
}

/// The flattened row shape the grid renders.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraceRow {
    pub id: String,
    pub timestamp: i64,
    pub name: String,
    pub user_id: Option<String>,
    pub level: TraceLevel,
    pub observation_count: i64,
    /// Duration in seconds. `None` only when the source value was null —
    /// a measured `0` stays `Some(0.0)`.
    pub latency: Option<f64>,
    pub release: Option<String>,
    pub version: Option<String>,
    pub session_id: Option<String>,
    pub bookmarked: bool,
    pub tags: Vec<String>,
    pub scores: Vec<TraceScore>,
    pub usage: TokenUsage,
    pub cost: Option<CostSummary>,
}

impl TraceRow {
    /// Transform a wire record into the validated row shape.
    ///
    /// # Errors
    ///
    /// Returns [`RowError`] when the id is empty or the level string is not a
    /// known severity.
    pub fn from_record(record: TraceRecord) -> Result<Self, RowError> {
        if record.id.is_empty() {
            return Err(RowError::MissingId);
        }
        let level = TraceLevel::parse(&record.level)
            .ok_or_else(|| RowError::UnknownLevel(record.level.clone()))?;

        let cost = cost_summary(
            record.calculated_input_cost,
            record.calculated_output_cost,
            record.calculated_total_cost,
        );

        Ok(Self {
            id: record.id,
            timestamp: record.timestamp,
            name: record.name,
            user_id: record.user_id,
            level,
            observation_count: record.observation_count,
            latency: record.latency,
            release: record.release,
            version: record.version,
            session_id: record.session_id,
            bookmarked: record.bookmarked,
            tags: record.tags,
            scores: record.scores,
            usage: TokenUsage {
                prompt_tokens: record.usage.prompt_tokens,
                completion_tokens: record.usage.completion_tokens,
                total_tokens: record.usage.total_tokens,
            },
            cost,
        })
    }
}

/// Group the three calculated cost columns into one optional summary.
fn cost_summary(
    input: Option<Decimal>,
    output: Option<Decimal>,
    total: Option<Decimal>,
) -> Option<CostSummary> {
    if input.is_none() && output.is_none() && total.is_none() {
        return None;
    }
    Some(CostSummary { input, output, total })
}
