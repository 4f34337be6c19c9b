//! Assembled trace listing queries.
//!
//! DESIGN
//! ======
//! [`TraceQuery`] is the single descriptor handed to the fetch layer:
//! pagination, project, effective filter, search, and order in one value.
//! Its [`cache_key`](TraceQuery::cache_key) is deterministic for equal
//! inputs, so child mutations (bookmark toggle, tag edit) can hold the key
//! and invalidate exactly the listing view the user is looking at.

#[cfg(test)]
#[path = "query_test.rs"]
mod query_test;

use serde::{Deserialize, Serialize};

use crate::filter::{FilterPredicate, FilterState};
use crate::order::OrderBy;
use crate::page::Pagination;
use crate::params;

/// One fully-assembled listing query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraceQuery {
    pub project_id: String,
    pub page: Pagination,
    /// Effective filter: user predicates plus the synthetic user-scope
    /// predicate, already concatenated.
    pub filters: Vec<FilterPredicate>,
    pub search: Option<String>,
    pub order_by: Option<OrderBy>,
}

impl TraceQuery {
    /// Combine the URL-backed state and the caller's user scope into the
    /// descriptor sent to the fetch layer.
    #[must_use]
    pub fn assemble(
        project_id: &str,
        page: Pagination,
        filter: &FilterState,
        user_scope: Option<&str>,
        search: Option<&str>,
        order_by: Option<&OrderBy>,
    ) -> Self {
        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);
        Self {
            project_id: project_id.to_owned(),
            page,
            filters: filter.effective(user_scope),
            search,
            order_by: order_by.cloned(),
        }
    }

    /// Canonical identity of this listing view. Equal inputs always produce
    /// equal keys; any component change produces a different key.
    #[must_use]
    pub fn cache_key(&self) -> String {
        format!(
            "traces:{}|p{}x{}|f:{}|s:{}|o:{}",
            self.project_id,
            self.page.page_index,
            self.page.page_size,
            params::encode_predicates(&self.filters),
            self.search.as_deref().unwrap_or(""),
            self.order_by.as_ref().map(OrderBy::encode).unwrap_or_default(),
        )
    }
}
