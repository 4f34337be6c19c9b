//! Domain models and table-state logic for TraceDeck trace listings.
//!
//! DESIGN
//! ======
//! This crate is UI-framework agnostic so the Leptos client, the Axum server,
//! and the CLI can all consume it directly: wire DTOs and the validated view
//! row live here, as do the filter/order/pagination/selection state machines
//! and the URL query-parameter codecs that keep client, server, and CLI
//! speaking one grammar. Nothing in here performs I/O.

pub mod columns;
pub mod filter;
pub mod level;
pub mod options;
pub mod order;
pub mod page;
pub mod params;
pub mod query;
pub mod record;
pub mod row;
pub mod selection;

pub use columns::{ColumnDef, ColumnKind, column, filter_kind, filterable_columns, registry};
pub use filter::{FilterKind, FilterOperator, FilterPredicate, FilterState, FilterValue};
pub use level::{LevelDisplay, TraceLevel, level_display};
pub use options::{FilterOptions, TimeWindow, time_window};
pub use order::{OrderBy, SortDirection};
pub use page::Pagination;
pub use params::TableUrlState;
pub use query::TraceQuery;
pub use record::{
    FilterOptionsResponse, RecordUsage, TraceDetail, TracePage, TraceRecord, TraceScore,
};
pub use row::{CostSummary, RowError, TokenUsage, TraceRow};
pub use selection::{HeaderCheckbox, SelectionState};
