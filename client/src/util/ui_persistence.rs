//! Browser localStorage helpers for UI preference persistence.
//!
//! SYSTEM CONTEXT
//! ==============
//! These helpers centralize browser-only read/write behavior so pages and
//! components can persist preferences (column visibility, the optional admin
//! token) without repeating web-sys glue.

#[cfg(test)]
#[path = "ui_persistence_test.rs"]
mod ui_persistence_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Storage key holding the optional admin token (stored as a JSON string).
pub const ADMIN_TOKEN_KEY: &str = "tracedeck:admin-token";

/// Per-project storage key for hidden column ids.
#[must_use]
pub fn hidden_columns_key(project_id: &str) -> String {
    format!("tracedeck:{project_id}:hidden-columns")
}

/// Load a JSON value from `localStorage` for `key`.
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    #[cfg(feature = "csr")]
    {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten())?;
        let raw = storage.get_item(key).ok().flatten()?;
        serde_json::from_str(&raw).ok()
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = key;
        None
    }
}

/// Save a JSON value to `localStorage` for `key`.
pub fn save_json<T: Serialize>(key: &str, value: &T) {
    #[cfg(feature = "csr")]
    {
        let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) else {
            return;
        };
        let Ok(raw) = serde_json::to_string(value) else {
            return;
        };
        let _ = storage.set_item(key, &raw);
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (key, value);
    }
}
