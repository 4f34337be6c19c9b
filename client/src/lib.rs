//! TraceDeck client — a Leptos dashboard for browsing trace listings.
//!
//! ARCHITECTURE
//! ============
//! `pages` own route-scoped orchestration (URL state, fetching, selection);
//! `components` render the grid and its cells; `net` speaks the JSON API;
//! `state` and `util` hold framework-thin helpers. Browser-only dependencies
//! are gated behind the `csr` feature so the crate builds on host targets.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: mount the app onto `<body>`.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::mount_to_body(app::App);
}
