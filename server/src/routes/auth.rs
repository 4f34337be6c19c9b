//! Admin-token gate for destructive routes.
//!
//! DESIGN
//! ======
//! Traces are read-mostly; the only destructive operation is bulk delete.
//! That gets an ops-style shared secret rather than a user/session system:
//! when `TRACEDECK_ADMIN_TOKEN` is set, destructive routes require a matching
//! `x-admin-token` header, and `/api/capabilities` tells the client whether
//! its token (or the lack of one) grants delete access so it can scope the
//! delete controls.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use axum::extract::{FromRef, FromRequestParts, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use serde::Serialize;

use crate::state::AppState;

/// Header carrying the shared admin secret.
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Whether a request with `provided` may perform destructive operations
/// against an instance configured with `configured`.
#[must_use]
pub fn admin_allowed(configured: Option<&str>, provided: Option<&str>) -> bool {
    match configured {
        // No token configured: open instance (local/dev).
        None => true,
        Some(expected) => provided == Some(expected),
    }
}

/// Extractor proving the request may hit destructive routes.
pub struct AdminAccess;

impl<S> FromRequestParts<S> for AdminAccess
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let provided = header_token(&parts.headers);
        if admin_allowed(app_state.admin_token.as_deref(), provided.as_deref()) {
            Ok(Self)
        } else {
            Err(StatusCode::FORBIDDEN)
        }
    }
}

#[derive(Serialize)]
pub struct CapabilitiesResponse {
    pub can_delete: bool,
}

/// `GET /api/capabilities` — effective capabilities for this caller.
pub async fn capabilities(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<CapabilitiesResponse> {
    let provided = header_token(&headers);
    Json(CapabilitiesResponse {
        can_delete: admin_allowed(state.admin_token.as_deref(), provided.as_deref()),
    })
}

fn header_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}
