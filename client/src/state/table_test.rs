use super::*;
use std::collections::HashMap;
use traces::filter::{FilterOperator, FilterPredicate, FilterState, FilterValue};
use traces::level::TraceLevel;
use traces::order::{OrderBy, SortDirection};
use traces::page::Pagination;

fn lookup<'a>(map: &'a HashMap<&'a str, &'a str>) -> impl Fn(&str) -> Option<String> + 'a {
    move |key| map.get(key).map(|v| (*v).to_owned())
}

// =============================================================
// Reading
// =============================================================

#[test]
fn from_lookup_reads_all_owned_params() {
    let map = HashMap::from([
        ("search", "checkout"),
        ("page", "2"),
        ("limit", "20"),
        ("filter", "level.gte.WARNING"),
        ("order", "latency.asc"),
    ]);
    let state = from_lookup(lookup(&map));
    assert_eq!(state.search.as_deref(), Some("checkout"));
    assert_eq!(state.page, Pagination::new(2, 20));
    assert_eq!(state.filter.len(), 1);
    assert_eq!(state.order_by, Some(OrderBy::new("latency", SortDirection::Asc)));
}

#[test]
fn from_lookup_with_empty_map_is_default() {
    let map = HashMap::new();
    assert_eq!(from_lookup(lookup(&map)), TableUrlState::default());
}

// =============================================================
// Writing
// =============================================================

#[test]
fn href_for_default_state_is_the_bare_path() {
    assert_eq!(href("proj-1", &TableUrlState::default(), None), "/p/proj-1/traces");
}

#[test]
fn href_preserves_the_user_scope_param() {
    let url = href("proj-1", &TableUrlState::default(), Some("user-7"));
    assert_eq!(url, "/p/proj-1/traces?user=user-7");
}

#[test]
fn href_round_trips_through_from_lookup() {
    let state = TableUrlState {
        search: Some("checkout".to_owned()),
        page: Pagination::new(1, 20),
        filter: FilterState::new(vec![FilterPredicate {
            column: "level".to_owned(),
            op: FilterOperator::Gte,
            value: FilterValue::Level(TraceLevel::Warning),
        }]),
        order_by: Some(OrderBy::new("timestamp", SortDirection::Asc)),
    };
    let url = href("proj-1", &state, None);

    // Decode the query string the way the router would.
    let query = url.split_once('?').map(|(_, q)| q).unwrap_or_default();
    let map: HashMap<String, String> = query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| (k.to_owned(), percent_decode(v)))
        .collect();
    let back = from_lookup(|key| map.get(key).cloned());
    assert_eq!(back, state);
}

fn percent_decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 3 <= bytes.len() {
            let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).unwrap();
            out.push(u8::from_str_radix(hex, 16).unwrap());
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).unwrap()
}
