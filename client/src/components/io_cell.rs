//! Lazy detail cells for the large input/output/metadata fields.
//!
//! DESIGN
//! ======
//! These fields are not part of the bulk listing payload — shipping them for
//! every row of a 50-row page would move megabytes per refetch. Each cell
//! fetches the single full record by id when it mounts. The fetch is issued
//! once per mounted cell instance (the row `<For>` is keyed by trace id, so
//! unrelated re-renders reuse the instance and only an id change remounts).

#[cfg(test)]
#[path = "io_cell_test.rs"]
mod io_cell_test;

use leptos::prelude::*;

use traces::record::TraceDetail;

/// Longest preview rendered into a cell.
const PREVIEW_MAX_CHARS: usize = 120;

/// Which large field this cell shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetailField {
    Input,
    Output,
    Metadata,
}

impl DetailField {
    fn pick(self, detail: &TraceDetail) -> Option<&serde_json::Value> {
        match self {
            Self::Input => detail.input.as_ref(),
            Self::Output => detail.output.as_ref(),
            Self::Metadata => detail.metadata.as_ref(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum DetailCellState {
    Loading,
    Failed(String),
    Loaded(String),
}

#[component]
pub fn IoCell(project_id: String, trace_id: String, field: DetailField) -> impl IntoView {
    let state = RwSignal::new(DetailCellState::Loading);
    fetch_detail_once(project_id, trace_id, field, state);

    view! {
        <span class="io-cell">
            {move || match state.get() {
                DetailCellState::Loading => {
                    view! { <span class="io-cell__loading">"…"</span> }.into_any()
                }
                DetailCellState::Failed(message) => {
                    view! { <span class="io-cell__error" title=message>"unavailable"</span> }
                        .into_any()
                }
                DetailCellState::Loaded(preview) => {
                    view! { <span class="io-cell__preview">{preview}</span> }.into_any()
                }
            }}
        </span>
    }
}

/// Issue the per-id detail fetch. Runs once, at component creation.
fn fetch_detail_once(
    project_id: String,
    trace_id: String,
    field: DetailField,
    state: RwSignal<DetailCellState>,
) {
    #[cfg(feature = "csr")]
    {
        leptos::task::spawn_local(async move {
            match crate::net::api::fetch_trace_detail(&project_id, &trace_id).await {
                Ok(detail) => {
                    let preview = preview_text(field.pick(&detail), PREVIEW_MAX_CHARS);
                    state.set(DetailCellState::Loaded(preview));
                }
                Err(message) => state.set(DetailCellState::Failed(message)),
            }
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (project_id, trace_id, field, state);
    }
}

/// Compact single-line preview of a JSON value. An absent value renders as
/// an empty cell rather than an error.
fn preview_text(value: Option<&serde_json::Value>, max_chars: usize) -> String {
    let raw = match value {
        None | Some(serde_json::Value::Null) => return String::new(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    let flat = raw.replace('\n', " ");
    if flat.chars().count() <= max_chars {
        flat
    } else {
        let truncated: String = flat.chars().take(max_chars).collect();
        format!("{truncated}…")
    }
}
