//! Wire DTOs for the trace query contract.
//!
//! DESIGN
//! ======
//! These types mirror the server payloads field for field so serde round-trips
//! stay lossless on both sides of the wire. The bulk listing record carries
//! summary fields only; the large `input`/`output`/`metadata` values travel
//! exclusively in the per-id [`TraceDetail`] payload so a 50-row page does not
//! ship megabytes of prompt text.

#[cfg(test)]
#[path = "record_test.rs"]
mod record_test;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One trace as returned by the bulk listing endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceRecord {
    /// Unique trace identifier.
    pub id: String,
    /// Project this trace belongs to.
    pub project_id: String,
    /// Start timestamp in milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// Trace name (usually the entry-point operation).
    pub name: String,
    /// End user the trace is attributed to, if reported.
    pub user_id: Option<String>,
    /// Most severe observation level, wire form (e.g. `"WARNING"`).
    pub level: String,
    /// Number of observations nested under this trace.
    pub observation_count: i64,
    /// Wall-clock duration in seconds. `null` when the trace has no
    /// completed observations; `0` is a real measurement and is preserved.
    pub latency: Option<f64>,
    /// Deployment release identifier.
    pub release: Option<String>,
    /// Application-reported version.
    pub version: Option<String>,
    /// Session grouping identifier.
    pub session_id: Option<String>,
    /// Starred/favorited flag.
    pub bookmarked: bool,
    /// User-managed tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Evaluation scores attached to the trace.
    #[serde(default)]
    pub scores: Vec<TraceScore>,
    /// Aggregated token usage across observations.
    pub usage: RecordUsage,
    /// Model cost attributed to prompt tokens.
    pub calculated_input_cost: Option<Decimal>,
    /// Model cost attributed to completion tokens.
    pub calculated_output_cost: Option<Decimal>,
    /// Total model cost.
    pub calculated_total_cost: Option<Decimal>,
}

/// An evaluation value (automated or human) attached to a trace.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceScore {
    pub name: String,
    pub value: f64,
    /// Origin of the score (e.g. `"API"`, `"ANNOTATION"`).
    pub source: Option<String>,
}

/// Aggregated token counts, wire form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordUsage {
    pub prompt_tokens: i64,
    pub completion_tokens: i64,
    pub total_tokens: i64,
}

/// Full single-trace payload returned by the per-id endpoint.
///
/// Flattens a [`TraceRecord`] and adds the large fields the listing omits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceDetail {
    #[serde(flatten)]
    pub record: TraceRecord,
    pub input: Option<serde_json::Value>,
    pub output: Option<serde_json::Value>,
    pub metadata: Option<serde_json::Value>,
}

/// One page of the trace listing plus the filtered window's total row count.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TracePage {
    pub traces: Vec<TraceRecord>,
    pub total_count: u64,
}

/// Dynamic option lists for filterable columns.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptionsResponse {
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub releases: Vec<String>,
}
