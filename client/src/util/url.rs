//! Query-string building with percent-encoding.
//!
//! The router and the server both hand us *decoded* parameter values, so
//! encoding only happens here, on the write path.

#[cfg(test)]
#[path = "url_test.rs"]
mod url_test;

/// Percent-encode a query component. Everything outside the unreserved set
/// (`A-Z a-z 0-9 - _ . ~`) is escaped, byte by byte.
#[must_use]
pub fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Render `pairs` as a query string, `?`-prefixed, or `""` when empty.
#[must_use]
pub fn query_string(pairs: &[(&str, String)]) -> String {
    if pairs.is_empty() {
        return String::new();
    }
    let encoded = pairs
        .iter()
        .map(|(key, value)| format!("{key}={}", encode_component(value)))
        .collect::<Vec<_>>()
        .join("&");
    format!("?{encoded}")
}
