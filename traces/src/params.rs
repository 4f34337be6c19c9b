//! URL query-parameter codecs for the table state.
//!
//! DESIGN
//! ======
//! Filter/sort/pagination/search state lives in the URL, not in component
//! memory, so views survive navigation and links are shareable. This module
//! owns the parameter grammar — `search`, `page`, `limit`, `filter`, `order`
//! — and is used symmetrically by the client (URL sync), the server
//! (query-string parsing), and the CLI.
//!
//! Filter grammar: predicates `column.op.value` joined by `~`; list values
//! comma-joined. Value types are resolved through the column registry.
//! Malformed or unknown segments are dropped, never errors: a stale or
//! hand-mangled link degrades to a weaker filter instead of a broken page.

#[cfg(test)]
#[path = "params_test.rs"]
mod params_test;

use crate::columns;
use crate::filter::{FilterOperator, FilterPredicate, FilterState, FilterValue};
use crate::order::OrderBy;
use crate::page::{DEFAULT_PAGE_SIZE, Pagination};

/// Parameter names owned by this codec.
pub const PARAM_SEARCH: &str = "search";
pub const PARAM_PAGE: &str = "page";
pub const PARAM_LIMIT: &str = "limit";
pub const PARAM_FILTER: &str = "filter";
pub const PARAM_ORDER: &str = "order";

/// Separator between encoded predicates.
const PREDICATE_SEPARATOR: char = '~';
/// Separator between column, operator, and value within one predicate.
const FIELD_SEPARATOR: char = '.';

/// The URL-backed portion of the table state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableUrlState {
    pub search: Option<String>,
    pub page: Pagination,
    pub filter: FilterState,
    pub order_by: Option<OrderBy>,
}

impl TableUrlState {
    /// Rebuild the state from decoded query pairs. Unknown parameters are
    /// ignored; missing ones fall back to defaults.
    pub fn from_query_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut state = Self::default();
        let mut page_index = 0usize;
        let mut page_size = DEFAULT_PAGE_SIZE;
        for (key, value) in pairs {
            match key {
                PARAM_SEARCH => {
                    let trimmed = value.trim();
                    if !trimmed.is_empty() {
                        state.search = Some(trimmed.to_owned());
                    }
                }
                PARAM_PAGE => page_index = value.parse().unwrap_or(0),
                PARAM_LIMIT => page_size = value.parse().unwrap_or(DEFAULT_PAGE_SIZE),
                PARAM_FILTER => state.filter = FilterState::new(parse_predicates(value)),
                PARAM_ORDER => state.order_by = OrderBy::parse(value),
                _ => {}
            }
        }
        state.page = Pagination::new(page_index, page_size);
        state
    }

    /// Render the state as query pairs, omitting parameters at their default
    /// so URLs stay short.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(search) = &self.search {
            if !search.is_empty() {
                pairs.push((PARAM_SEARCH, search.clone()));
            }
        }
        if self.page.page_index != 0 {
            pairs.push((PARAM_PAGE, self.page.page_index.to_string()));
        }
        if self.page.page_size != DEFAULT_PAGE_SIZE {
            pairs.push((PARAM_LIMIT, self.page.page_size.to_string()));
        }
        if !self.filter.is_empty() {
            pairs.push((PARAM_FILTER, encode_predicates(self.filter.predicates())));
        }
        if let Some(order) = &self.order_by {
            pairs.push((PARAM_ORDER, order.encode()));
        }
        pairs
    }
}

/// Encode predicates into the `filter` parameter value.
#[must_use]
pub fn encode_predicates(predicates: &[FilterPredicate]) -> String {
    predicates
        .iter()
        .map(|pred| {
            format!(
                "{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}",
                pred.column,
                pred.op.as_str(),
                pred.value.encode()
            )
        })
        .collect::<Vec<_>>()
        .join(&PREDICATE_SEPARATOR.to_string())
}

/// Parse the `filter` parameter value. Segments that name unknown columns,
/// carry inapplicable operators, or fail value parsing are dropped.
#[must_use]
pub fn parse_predicates(raw: &str) -> Vec<FilterPredicate> {
    raw.split(PREDICATE_SEPARATOR).filter_map(parse_predicate).collect()
}

fn parse_predicate(segment: &str) -> Option<FilterPredicate> {
    let mut fields = segment.splitn(3, FIELD_SEPARATOR);
    let column = fields.next()?;
    let op = FilterOperator::parse(fields.next()?)?;
    let raw_value = fields.next()?;

    let kind = columns::filter_kind(column)?;
    if !FilterOperator::for_kind(kind).contains(&op) {
        return None;
    }
    let value = FilterValue::parse(kind, raw_value)?;
    Some(FilterPredicate { column: column.to_owned(), op, value })
}
