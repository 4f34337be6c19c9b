//! Trace API routes.
//!
//! SYSTEM CONTEXT
//! ==============
//! Handlers translate between the HTTP surface (query strings, JSON bodies,
//! status codes) and the trace service. The query-string grammar is the
//! domain crate's codec — the same one the client writes into its URL — so a
//! listing URL pasted from the browser is directly replayable against the API.

#[cfg(test)]
#[path = "traces_test.rs"]
mod traces_test;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use uuid::Uuid;

use traces::options::time_window;
use traces::order::OrderBy;
use traces::page::{DEFAULT_PAGE_SIZE, Pagination};
use traces::params::parse_predicates;
use traces::record::{FilterOptionsResponse, TraceDetail, TracePage};
use traces::TraceQuery;

use crate::routes::auth::AdminAccess;
use crate::services::trace::{self, TraceError};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub filter: Option<String>,
    pub search: Option<String>,
    pub order: Option<String>,
}

/// Rebuild the assembled query from decoded query-string parameters.
fn query_from_params(project_id: &str, params: &ListParams) -> TraceQuery {
    TraceQuery {
        project_id: project_id.to_owned(),
        page: Pagination::new(
            params.page.unwrap_or(0),
            params.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        ),
        filters: params.filter.as_deref().map(parse_predicates).unwrap_or_default(),
        search: params
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned),
        order_by: params.order.as_deref().and_then(OrderBy::parse),
    }
}

/// `GET /api/projects/{project_id}/traces` — one listing page.
pub async fn list_traces(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<TracePage>, StatusCode> {
    let query = query_from_params(&project_id, &params);
    let page = trace::list_traces(&state.pool, &query)
        .await
        .map_err(trace_error_to_status)?;
    Ok(Json(page))
}

#[derive(Debug, Default, Deserialize)]
pub struct OptionsParams {
    pub filter: Option<String>,
}

/// `GET /api/projects/{project_id}/traces/filter-options` — option lists,
/// time-windowed by the timestamp predicates of the passed filter.
pub async fn filter_options(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Query(params): Query<OptionsParams>,
) -> Result<Json<FilterOptionsResponse>, StatusCode> {
    let predicates = params.filter.as_deref().map(parse_predicates).unwrap_or_default();
    let window = time_window(&predicates);
    let options = trace::filter_options(&state.pool, &project_id, window)
        .await
        .map_err(trace_error_to_status)?;
    Ok(Json(options))
}

/// `GET /api/projects/{project_id}/traces/{trace_id}` — full detail payload.
pub async fn get_trace(
    State(state): State<AppState>,
    Path((project_id, trace_id)): Path<(String, Uuid)>,
) -> Result<Json<TraceDetail>, StatusCode> {
    let detail = trace::get_trace(&state.pool, &project_id, trace_id)
        .await
        .map_err(trace_error_to_status)?;
    Ok(Json(detail))
}

#[derive(Deserialize)]
pub struct DeleteTracesBody {
    pub trace_ids: Vec<Uuid>,
}

/// `DELETE /api/projects/{project_id}/traces` — bulk delete, admin-gated.
pub async fn delete_traces(
    State(state): State<AppState>,
    _admin: AdminAccess,
    Path(project_id): Path<String>,
    Json(body): Json<DeleteTracesBody>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let deleted = trace::delete_traces(&state.pool, &project_id, &body.trace_ids)
        .await
        .map_err(trace_error_to_status)?;
    Ok(Json(serde_json::json!({ "deleted": deleted })))
}

#[derive(Deserialize)]
pub struct BookmarkBody {
    pub bookmarked: bool,
}

/// `POST /api/projects/{project_id}/traces/{trace_id}/bookmark`.
pub async fn set_bookmark(
    State(state): State<AppState>,
    Path((project_id, trace_id)): Path<(String, Uuid)>,
    Json(body): Json<BookmarkBody>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    trace::set_bookmark(&state.pool, &project_id, trace_id, body.bookmarked)
        .await
        .map_err(trace_error_to_status)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

#[derive(Deserialize)]
pub struct TagsBody {
    pub tags: Vec<String>,
}

/// `PUT /api/projects/{project_id}/traces/{trace_id}/tags`.
pub async fn update_tags(
    State(state): State<AppState>,
    Path((project_id, trace_id)): Path<(String, Uuid)>,
    Json(body): Json<TagsBody>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    trace::update_tags(&state.pool, &project_id, trace_id, &body.tags)
        .await
        .map_err(trace_error_to_status)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

pub(crate) fn trace_error_to_status(err: TraceError) -> StatusCode {
    match err {
        TraceError::NotFound(_) => StatusCode::NOT_FOUND,
        TraceError::Database(e) => {
            tracing::error!(error = %e, "trace query failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
