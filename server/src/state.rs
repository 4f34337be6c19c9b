//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! trace API is stateless beyond the connection pool — listing queries hit
//! Postgres directly and rely on its indexes rather than an in-memory cache.

use sqlx::PgPool;

/// Shared application state, injected into Axum handlers via State extractor.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    /// Shared secret required by destructive routes; `None` means open.
    pub admin_token: Option<String>,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool, admin_token: Option<String>) -> Self {
        Self { pool, admin_token }
    }
}
