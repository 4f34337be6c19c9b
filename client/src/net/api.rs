//! REST API helpers for communicating with the server.
//!
//! Browser builds (`csr`): real HTTP calls via `gloo-net`. Host builds:
//! stubs returning errors/None, since these endpoints are only meaningful in
//! the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result<_, String>`/`Option` outputs instead of panics so
//! fetch failures surface as the listing's error state, not a crash.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use traces::TraceQuery;
use traces::filter::{FilterOperator, FilterPredicate, FilterValue};
use traces::options::TimeWindow;
use traces::params::{PARAM_FILTER, PARAM_LIMIT, PARAM_ORDER, PARAM_PAGE, PARAM_SEARCH, encode_predicates};
use traces::record::{FilterOptionsResponse, TraceDetail, TracePage};

#[cfg(any(test, feature = "csr"))]
use crate::util::ui_persistence::{ADMIN_TOKEN_KEY, load_json};
use crate::util::url::{encode_component, query_string};

// =============================================================================
// ENDPOINTS
// =============================================================================

/// Listing endpoint with the full query grammar in the query string.
#[must_use]
pub fn traces_endpoint(query: &TraceQuery) -> String {
    let mut pairs: Vec<(&str, String)> = Vec::new();
    if query.page.page_index != 0 {
        pairs.push((PARAM_PAGE, query.page.page_index.to_string()));
    }
    pairs.push((PARAM_LIMIT, query.page.page_size.to_string()));
    if !query.filters.is_empty() {
        pairs.push((PARAM_FILTER, encode_predicates(&query.filters)));
    }
    if let Some(search) = &query.search {
        pairs.push((PARAM_SEARCH, search.clone()));
    }
    if let Some(order) = &query.order_by {
        pairs.push((PARAM_ORDER, order.encode()));
    }
    format!(
        "/api/projects/{}/traces{}",
        encode_component(&query.project_id),
        query_string(&pairs)
    )
}

/// Filter-options endpoint, parameterized by the listing's time window only —
/// option lists must not refetch on unrelated filter edits.
#[must_use]
pub fn filter_options_endpoint(project_id: &str, window: Option<TimeWindow>) -> String {
    let predicates = window_predicates(window);
    let mut pairs: Vec<(&str, String)> = Vec::new();
    if !predicates.is_empty() {
        pairs.push((PARAM_FILTER, encode_predicates(&predicates)));
    }
    format!(
        "/api/projects/{}/traces/filter-options{}",
        encode_component(project_id),
        query_string(&pairs)
    )
}

#[must_use]
pub fn trace_endpoint(project_id: &str, trace_id: &str) -> String {
    format!(
        "/api/projects/{}/traces/{}",
        encode_component(project_id),
        encode_component(trace_id)
    )
}

#[must_use]
pub fn bookmark_endpoint(project_id: &str, trace_id: &str) -> String {
    format!("{}/bookmark", trace_endpoint(project_id, trace_id))
}

#[must_use]
pub fn tags_endpoint(project_id: &str, trace_id: &str) -> String {
    format!("{}/tags", trace_endpoint(project_id, trace_id))
}

#[must_use]
pub fn delete_endpoint(project_id: &str) -> String {
    format!("/api/projects/{}/traces", encode_component(project_id))
}

/// Express a time window as timestamp predicates for the wire.
fn window_predicates(window: Option<TimeWindow>) -> Vec<FilterPredicate> {
    let Some(window) = window else {
        return Vec::new();
    };
    let mut predicates = Vec::new();
    if let Some(from) = window.from {
        predicates.push(FilterPredicate {
            column: "timestamp".to_owned(),
            op: FilterOperator::Gte,
            value: FilterValue::Timestamp(from),
        });
    }
    if let Some(to) = window.to {
        predicates.push(FilterPredicate {
            column: "timestamp".to_owned(),
            op: FilterOperator::Lte,
            value: FilterValue::Timestamp(to),
        });
    }
    predicates
}

#[cfg(any(test, feature = "csr"))]
fn request_failed_message(what: &str, status: u16) -> String {
    format!("{what} request failed: {status}")
}

/// Admin token persisted by ops tooling, if any.
#[cfg(any(test, feature = "csr"))]
fn admin_token() -> Option<String> {
    load_json::<String>(ADMIN_TOKEN_KEY)
}

// =============================================================================
// CALLS
// =============================================================================

/// Fetch one listing page.
///
/// # Errors
///
/// Returns a display-ready message when the request or decode fails.
pub async fn fetch_traces(query: &TraceQuery) -> Result<TracePage, String> {
    #[cfg(feature = "csr")]
    {
        let resp = gloo_net::http::Request::get(&traces_endpoint(query))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("listing", resp.status()));
        }
        resp.json::<TracePage>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = query;
        Err("not available outside the browser".to_owned())
    }
}

/// Fetch the option lists for filterable columns.
pub async fn fetch_filter_options(
    project_id: &str,
    window: Option<TimeWindow>,
) -> Option<FilterOptionsResponse> {
    #[cfg(feature = "csr")]
    {
        let resp = gloo_net::http::Request::get(&filter_options_endpoint(project_id, window))
            .send()
            .await
            .ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<FilterOptionsResponse>().await.ok()
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (project_id, window);
        None
    }
}

/// Fetch the full single-trace payload (input/output/metadata included).
///
/// # Errors
///
/// Returns a display-ready message when the request or decode fails.
pub async fn fetch_trace_detail(project_id: &str, trace_id: &str) -> Result<TraceDetail, String> {
    #[cfg(feature = "csr")]
    {
        let resp = gloo_net::http::Request::get(&trace_endpoint(project_id, trace_id))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("detail", resp.status()));
        }
        resp.json::<TraceDetail>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (project_id, trace_id);
        Err("not available outside the browser".to_owned())
    }
}

/// Set the bookmark flag on one trace.
///
/// # Errors
///
/// Returns a display-ready message when the request fails.
pub async fn set_bookmark(
    project_id: &str,
    trace_id: &str,
    bookmarked: bool,
) -> Result<(), String> {
    #[cfg(feature = "csr")]
    {
        let payload = serde_json::json!({ "bookmarked": bookmarked });
        let resp = gloo_net::http::Request::post(&bookmark_endpoint(project_id, trace_id))
            .json(&payload)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("bookmark", resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (project_id, trace_id, bookmarked);
        Err("not available outside the browser".to_owned())
    }
}

/// Replace the tag set of one trace.
///
/// # Errors
///
/// Returns a display-ready message when the request fails.
pub async fn update_tags(
    project_id: &str,
    trace_id: &str,
    tags: &[String],
) -> Result<(), String> {
    #[cfg(feature = "csr")]
    {
        let payload = serde_json::json!({ "tags": tags });
        let resp = gloo_net::http::Request::put(&tags_endpoint(project_id, trace_id))
            .json(&payload)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("tags", resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (project_id, trace_id, tags);
        Err("not available outside the browser".to_owned())
    }
}

/// Bulk-delete traces. Sends the admin token when one is stored.
///
/// # Errors
///
/// Returns a display-ready message when the request fails or is forbidden.
pub async fn delete_traces(project_id: &str, trace_ids: &[String]) -> Result<(), String> {
    #[cfg(feature = "csr")]
    {
        let payload = serde_json::json!({ "trace_ids": trace_ids });
        let mut request = gloo_net::http::Request::delete(&delete_endpoint(project_id));
        if let Some(token) = admin_token() {
            request = request.header("x-admin-token", &token);
        }
        let resp = request
            .json(&payload)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("delete", resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (project_id, trace_ids);
        Err("not available outside the browser".to_owned())
    }
}

/// Whether this client may use destructive controls. Degrades to `false` on
/// any failure.
pub async fn fetch_capabilities() -> bool {
    #[cfg(feature = "csr")]
    {
        #[derive(serde::Deserialize)]
        struct CapabilitiesResponse {
            can_delete: bool,
        }
        let mut request = gloo_net::http::Request::get("/api/capabilities");
        if let Some(token) = admin_token() {
            request = request.header("x-admin-token", &token);
        }
        let Ok(resp) = request.send().await else {
            return false;
        };
        if !resp.ok() {
            return false;
        }
        resp.json::<CapabilitiesResponse>()
            .await
            .map(|c| c.can_delete)
            .unwrap_or(false)
    }
    #[cfg(not(feature = "csr"))]
    {
        false
    }
}
