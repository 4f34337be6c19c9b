//! Filter-option lists and the time window that scopes them.

#[cfg(test)]
#[path = "options_test.rs"]
mod options_test;

use serde::{Deserialize, Serialize};

use crate::filter::{FilterOperator, FilterPredicate, FilterValue};
use crate::record::FilterOptionsResponse;

/// Timestamp bounds extracted from the active filter, epoch ms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub from: Option<i64>,
    pub to: Option<i64>,
}

/// Extract the timestamp bounds of `filters` so the option lists can be
/// restricted to the same window the listing shows. Multiple bounds tighten:
/// the latest `from` and the earliest `to` win. Returns `None` when the
/// filter carries no timestamp predicate at all.
#[must_use]
pub fn time_window(filters: &[FilterPredicate]) -> Option<TimeWindow> {
    let mut window = TimeWindow::default();
    let mut found = false;
    for pred in filters {
        if pred.column != "timestamp" {
            continue;
        }
        let FilterValue::Timestamp(ms) = pred.value else {
            continue;
        };
        match pred.op {
            FilterOperator::Gte => {
                window.from = Some(window.from.map_or(ms, |cur| cur.max(ms)));
                found = true;
            }
            FilterOperator::Lte => {
                window.to = Some(window.to.map_or(ms, |cur| cur.min(ms)));
                found = true;
            }
            _ => {}
        }
    }
    found.then_some(window)
}

/// Option lists for filterable columns, as consumed by the filter builder
/// and the tag editor's typeahead.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub names: Vec<String>,
    pub tags: Vec<String>,
    pub releases: Vec<String>,
}

impl FilterOptions {
    #[must_use]
    pub fn from_response(response: FilterOptionsResponse) -> Self {
        Self { names: response.names, tags: response.tags, releases: response.releases }
    }

    /// Known tags matching a typeahead prefix (case-insensitive), excluding
    /// tags the row already carries.
    #[must_use]
    pub fn tag_suggestions(&self, prefix: &str, already_applied: &[String]) -> Vec<&str> {
        let needle = prefix.to_lowercase();
        self.tags
            .iter()
            .filter(|tag| tag.to_lowercase().starts_with(&needle))
            .filter(|tag| !already_applied.contains(tag))
            .map(String::as_str)
            .collect()
    }
}
