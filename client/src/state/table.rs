//! URL-backed table state: reading the query map, writing navigation targets.
//!
//! DESIGN
//! ======
//! Interactions never mutate table state in place — they compute the next
//! [`TableUrlState`], navigate to it, and let the page re-derive everything
//! from the URL. That makes the URL update synchronous with (and ahead of)
//! the dependent refetch, and every view shareable as a link.

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;

use traces::params::{
    PARAM_FILTER, PARAM_LIMIT, PARAM_ORDER, PARAM_PAGE, PARAM_SEARCH, TableUrlState,
};

use crate::util::url::query_string;

/// Page-level parameter carrying the caller-provided user scope. Not part of
/// the table codec: the scope is an input to query assembly, not table state.
pub const PARAM_USER: &str = "user";

/// Rebuild the table state from a parameter lookup (the router's query map).
pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> TableUrlState {
    let pairs: Vec<(&str, String)> =
        [PARAM_SEARCH, PARAM_PAGE, PARAM_LIMIT, PARAM_FILTER, PARAM_ORDER]
            .into_iter()
            .filter_map(|key| get(key).map(|value| (key, value)))
            .collect();
    TableUrlState::from_query_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str())))
}

/// The navigation target for `state`, preserving the user-scope parameter.
#[must_use]
pub fn href(project_id: &str, state: &TableUrlState, user_scope: Option<&str>) -> String {
    let mut pairs = state.to_query_pairs();
    if let Some(user) = user_scope {
        pairs.push((PARAM_USER, user.to_owned()));
    }
    format!("/p/{project_id}/traces{}", query_string(&pairs))
}
