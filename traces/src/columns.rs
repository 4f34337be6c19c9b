//! Declarative column registry for the trace grid.
//!
//! DESIGN
//! ======
//! Every column the grid can render is declared here once, with its header,
//! cell kind, sortability, default visibility, and filter value type. The
//! client builds headers and the column-visibility menu from this table, the
//! URL codec resolves filter value types through it, and the server uses the
//! sortable flags as the ORDER BY safe-list — one registry, three consumers.

#[cfg(test)]
#[path = "columns_test.rs"]
mod columns_test;

use crate::filter::FilterKind;

/// How a column's cells are rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    /// Tri-state header checkbox + per-row checkbox.
    Select,
    /// Per-row star toggle.
    Bookmark,
    /// Plain scalar text.
    Text,
    /// Epoch-ms timestamp.
    Timestamp,
    /// Severity badge.
    Level,
    /// Seconds, formatted as a duration.
    Duration,
    /// Integer token/observation count.
    Count,
    /// Combined prompt/completion/total usage cell.
    Usage,
    /// Decimal currency amount.
    Cost,
    /// Tag chips with editor popover.
    Tags,
    /// Score name/value chips.
    Scores,
    /// Large field fetched per-row on cell mount (input/output/metadata).
    LazyDetail,
    /// Row action menu (delete).
    Action,
}

/// Static metadata for one grid column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnDef {
    /// Unique column id, also the URL filter/order column name.
    pub id: &'static str,
    /// Accessor key into the view row.
    pub accessor: &'static str,
    pub header: &'static str,
    /// Extra explanation rendered as a header tooltip.
    pub header_tooltip: Option<&'static str>,
    pub kind: ColumnKind,
    pub sortable: bool,
    pub default_visible: bool,
    /// Value type when the column is filterable; `None` means not filterable.
    pub filter_kind: Option<FilterKind>,
}

impl ColumnDef {
    #[must_use]
    pub fn filterable(&self) -> bool {
        self.filter_kind.is_some()
    }
}

const fn col(
    id: &'static str,
    header: &'static str,
    kind: ColumnKind,
    sortable: bool,
    default_visible: bool,
    filter_kind: Option<FilterKind>,
) -> ColumnDef {
    ColumnDef {
        id,
        accessor: id,
        header,
        header_tooltip: None,
        kind,
        sortable,
        default_visible,
        filter_kind,
    }
}

const fn col_tip(
    id: &'static str,
    header: &'static str,
    tooltip: &'static str,
    kind: ColumnKind,
    sortable: bool,
    default_visible: bool,
    filter_kind: Option<FilterKind>,
) -> ColumnDef {
    ColumnDef {
        id,
        accessor: id,
        header,
        header_tooltip: Some(tooltip),
        kind,
        sortable,
        default_visible,
        filter_kind,
    }
}

static REGISTRY: [ColumnDef; 25] = [
    col("select", "", ColumnKind::Select, false, true, None),
    col("bookmarked", "", ColumnKind::Bookmark, true, true, Some(FilterKind::Flag)),
    col("timestamp", "Timestamp", ColumnKind::Timestamp, true, true, Some(FilterKind::Timestamp)),
    col("name", "Name", ColumnKind::Text, true, true, Some(FilterKind::Text)),
    col("user_id", "User", ColumnKind::Text, true, true, Some(FilterKind::Text)),
    col("session_id", "Session", ColumnKind::Text, true, true, Some(FilterKind::Text)),
    col_tip(
        "latency",
        "Latency",
        "Wall-clock duration from the first to the last observation.",
        ColumnKind::Duration,
        true,
        true,
        Some(FilterKind::Number),
    ),
    col("level", "Level", ColumnKind::Level, true, true, Some(FilterKind::Level)),
    col_tip(
        "observation_count",
        "Observations",
        "Number of observations nested under this trace.",
        ColumnKind::Count,
        true,
        false,
        None,
    ),
    col("input", "Input", ColumnKind::LazyDetail, false, true, None),
    col("output", "Output", ColumnKind::LazyDetail, false, true, None),
    col("metadata", "Metadata", ColumnKind::LazyDetail, false, false, None),
    col("scores", "Scores", ColumnKind::Scores, false, true, None),
    col("tags", "Tags", ColumnKind::Tags, false, true, Some(FilterKind::List)),
    col_tip(
        "usage",
        "Usage",
        "Prompt, completion, and total token counts.",
        ColumnKind::Usage,
        false,
        true,
        None,
    ),
    col("prompt_tokens", "Prompt Tokens", ColumnKind::Count, true, false, None),
    col("completion_tokens", "Completion Tokens", ColumnKind::Count, true, false, None),
    col("total_tokens", "Total Tokens", ColumnKind::Count, true, false, None),
    col("input_cost", "Input Cost", ColumnKind::Cost, true, false, None),
    col("output_cost", "Output Cost", ColumnKind::Cost, true, false, None),
    col("total_cost", "Total Cost", ColumnKind::Cost, true, true, Some(FilterKind::Number)),
    col("release", "Release", ColumnKind::Text, true, false, Some(FilterKind::Text)),
    col("version", "Version", ColumnKind::Text, true, false, Some(FilterKind::Text)),
    col("id", "ID", ColumnKind::Text, true, false, None),
    col("action", "", ColumnKind::Action, false, true, None),
];

/// All grid columns, in display order.
#[must_use]
pub fn registry() -> &'static [ColumnDef] {
    &REGISTRY
}

/// Look up one column by id.
#[must_use]
pub fn column(id: &str) -> Option<&'static ColumnDef> {
    REGISTRY.iter().find(|c| c.id == id)
}

/// Whether `id` names a sortable column — the ORDER BY safe-list.
#[must_use]
pub fn sortable(id: &str) -> bool {
    column(id).is_some_and(|c| c.sortable)
}

/// Filter value type for `id`, `None` when the column is not filterable.
#[must_use]
pub fn filter_kind(id: &str) -> Option<FilterKind> {
    column(id).and_then(|c| c.filter_kind)
}

/// Filterable columns minus a caller-provided omission list (a user-scoped
/// view omits e.g. the `user_id` filter the scope already fixes).
#[must_use]
pub fn filterable_columns(omit: &[&str]) -> Vec<&'static ColumnDef> {
    REGISTRY
        .iter()
        .filter(|c| c.filterable() && !omit.contains(&c.id))
        .collect()
}

/// Ids hidden by default, the seed for the column-visibility menu.
#[must_use]
pub fn default_hidden_ids() -> Vec<&'static str> {
    REGISTRY.iter().filter(|c| !c.default_visible).map(|c| c.id).collect()
}
