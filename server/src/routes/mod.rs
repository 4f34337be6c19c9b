//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the JSON trace API under `/api` and serves the client's static WASM
//! bundle for everything else, so one process runs the whole dashboard.

pub mod auth;
pub mod traces;

use std::path::PathBuf;

use axum::Router;
use axum::response::Json;
use axum::routing::{get, post, put};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// JSON API routes.
fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/projects/{project_id}/traces",
            get(traces::list_traces).delete(traces::delete_traces),
        )
        .route(
            "/api/projects/{project_id}/traces/filter-options",
            get(traces::filter_options),
        )
        .route("/api/projects/{project_id}/traces/{trace_id}", get(traces::get_trace))
        .route(
            "/api/projects/{project_id}/traces/{trace_id}/bookmark",
            post(traces::set_bookmark),
        )
        .route(
            "/api/projects/{project_id}/traces/{trace_id}/tags",
            put(traces::update_tags),
        )
        .route("/api/capabilities", get(auth::capabilities))
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
}

/// Full application router: API plus the static client bundle.
pub fn app(state: AppState) -> Router {
    let dist = client_dist_dir();
    let index = dist.join("index.html");
    let serve_client = ServeDir::new(&dist).not_found_service(ServeFile::new(index));

    api_routes(state)
        .fallback_service(serve_client)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
}

fn client_dist_dir() -> PathBuf {
    std::env::var("TRACEDECK_CLIENT_DIST")
        .unwrap_or_else(|_| "client/dist".to_owned())
        .into()
}

async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}
