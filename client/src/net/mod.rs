//! Networking modules for the JSON trace API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` owns endpoint construction and the browser-side HTTP calls. There is
//! no client-side cache layer beyond the page's own state: re-running a fetch
//! is the invalidation mechanism, keyed by the assembled query's cache key.

pub mod api;
