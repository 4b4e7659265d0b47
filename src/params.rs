//! Path parameter and query string handling.
//!
//! Two complementary types:
//!
//! - [`RouteParams`] — values extracted from dynamic path segments (e.g.
//!   `:id` in `/notes/:id`), accumulated across nesting levels during
//!   resolution.
//! - [`QueryParams`] — the `?key=value&...` portion of a requested path.
//!   Supports multi-valued keys, typed access, and round-trip serialization
//!   through [`encode_component`] / [`decode_component`].
//!
//! The query machinery is what carries the guard's `redirect` parameter: the
//! originally requested path is percent-encoded into the fallback URL on
//! denial and decoded again by the post-login resume flow.
//!
//! # Example
//!
//! ```
//! use studydeck::{QueryParams, RouteParams};
//!
//! let mut params = RouteParams::new();
//! params.insert("id".to_string(), "42".to_string());
//! assert_eq!(params.get_as::<u32>("id"), Some(42));
//!
//! let query = QueryParams::from_query_string("redirect=%2Fdashboard%2Fprofile");
//! assert_eq!(query.get("redirect").map(String::as_str), Some("/dashboard/profile"));
//! ```

use std::collections::HashMap;

// ============================================================================
// RouteParams
// ============================================================================

/// Parameters extracted from dynamic path segments.
///
/// Child-level values override parent-level values on key collision, which
/// only matters for route trees that reuse a parameter name across levels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteParams {
    params: HashMap<String, String>,
}

impl RouteParams {
    /// Create empty route parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a parameter value by key.
    pub fn get(&self, key: &str) -> Option<&String> {
        self.params.get(key)
    }

    /// Get a parameter and parse it as a specific type.
    ///
    /// Returns `None` if the parameter doesn't exist or cannot be parsed.
    pub fn get_as<T>(&self, key: &str) -> Option<T>
    where
        T: std::str::FromStr,
    {
        self.params.get(key)?.parse().ok()
    }

    /// Insert or overwrite a parameter.
    pub fn insert(&mut self, key: String, value: String) {
        self.params.insert(key, value);
    }

    /// Return `true` if the given key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Iterate over all `(key, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.params.iter()
    }

    /// Return `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Return the number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }
}

// ============================================================================
// QueryParams
// ============================================================================

/// Query parameters parsed from the `?key=value&...` portion of a path.
///
/// Multiple values for the same key are preserved in order.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    params: HashMap<String, Vec<String>>,
}

impl QueryParams {
    /// Create empty query parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a raw query string (the part after `?`, without the `?`).
    ///
    /// Keys and values are percent-decoded. Pairs without `=` are ignored.
    pub fn from_query_string(query: &str) -> Self {
        let mut params: HashMap<String, Vec<String>> = HashMap::new();

        for pair in query.split('&') {
            if let Some((key, value)) = pair.split_once('=') {
                params
                    .entry(decode_component(key))
                    .or_default()
                    .push(decode_component(value));
            }
        }

        Self { params }
    }

    /// Get the first value for a key.
    pub fn get(&self, key: &str) -> Option<&String> {
        self.params.get(key)?.first()
    }

    /// Get all values for a key.
    pub fn get_all(&self, key: &str) -> Option<&Vec<String>> {
        self.params.get(key)
    }

    /// Get the first value for a key, parsed as type `T`.
    pub fn get_as<T>(&self, key: &str) -> Option<T>
    where
        T: std::str::FromStr,
    {
        self.get(key)?.parse().ok()
    }

    /// Append a value for the given key (existing values are kept).
    pub fn insert(&mut self, key: String, value: String) {
        self.params.entry(key).or_default().push(value);
    }

    /// Return `true` if the given key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Serialize back into a query string with percent-encoded keys/values.
    pub fn to_query_string(&self) -> String {
        let pairs: Vec<String> = self
            .params
            .iter()
            .flat_map(|(key, values)| {
                values
                    .iter()
                    .map(move |value| format!("{}={}", encode_component(key), encode_component(value)))
            })
            .collect();

        pairs.join("&")
    }

    /// Return `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Return the number of unique parameter keys.
    pub fn len(&self) -> usize {
        self.params.len()
    }
}

// ============================================================================
// Percent encoding
// ============================================================================

/// Percent-encode a URI component.
///
/// Unreserved characters (`A-Z a-z 0-9 - _ . ~`) pass through; everything
/// else is encoded byte-wise as `%XX`, so `/` becomes `%2F` and the encoded
/// form survives embedding in another query string.
pub fn encode_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// Decode a percent-encoded URI component.
///
/// Invalid `%XX` sequences are kept verbatim rather than rejected; `+` is
/// accepted as a space for tolerance with form-encoded input.
pub fn decode_component(s: &str) -> String {
    let mut bytes = Vec::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '%' {
            let hex: String = chars.by_ref().take(2).collect();
            if hex.len() == 2 {
                if let Ok(byte) = u8::from_str_radix(&hex, 16) {
                    bytes.push(byte);
                    continue;
                }
            }
            bytes.push(b'%');
            bytes.extend_from_slice(hex.as_bytes());
        } else if c == '+' {
            bytes.push(b' ');
        } else {
            let mut buf = [0u8; 4];
            bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
        }
    }

    String::from_utf8_lossy(&bytes).into_owned()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_params_basic() {
        let mut params = RouteParams::new();
        params.insert("id".to_string(), "123".to_string());

        assert_eq!(params.get("id"), Some(&"123".to_string()));
        assert!(params.contains("id"));
        assert!(!params.contains("missing"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_route_params_get_as() {
        let mut params = RouteParams::new();
        params.insert("id".to_string(), "123".to_string());
        params.insert("active".to_string(), "true".to_string());

        assert_eq!(params.get_as::<i32>("id"), Some(123));
        assert_eq!(params.get_as::<bool>("active"), Some(true));
        assert_eq!(params.get_as::<i32>("missing"), None);
    }

    #[test]
    fn test_query_params_basic() {
        let query = QueryParams::from_query_string("page=1&sort=name");

        assert_eq!(query.get("page"), Some(&"1".to_string()));
        assert_eq!(query.get_as::<u32>("page"), Some(1));
        assert_eq!(query.get("sort"), Some(&"name".to_string()));
        assert_eq!(query.get("missing"), None);
    }

    #[test]
    fn test_query_params_multiple_values() {
        let query = QueryParams::from_query_string("tag=math&tag=history");

        let tags = query.get_all("tag").unwrap();
        assert_eq!(tags.len(), 2);
        assert_eq!(query.get("tag"), Some(&"math".to_string()));
    }

    #[test]
    fn test_empty_query_string() {
        let query = QueryParams::from_query_string("");
        assert!(query.is_empty());
    }

    #[test]
    fn test_encode_component_slashes() {
        assert_eq!(encode_component("/dashboard/profile"), "%2Fdashboard%2Fprofile");
        assert_eq!(encode_component("hello world"), "hello%20world");
        assert_eq!(encode_component("abc-123_x.y~z"), "abc-123_x.y~z");
    }

    #[test]
    fn test_decode_component() {
        assert_eq!(decode_component("%2Fdashboard%2Fprofile"), "/dashboard/profile");
        assert_eq!(decode_component("hello%20world"), "hello world");
        assert_eq!(decode_component("hello+world"), "hello world");
        // Malformed escapes are preserved, not dropped.
        assert_eq!(decode_component("50%"), "50%");
        assert_eq!(decode_component("%zz"), "%zz");
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let original = "/dashboard/profile";
        assert_eq!(decode_component(&encode_component(original)), original);

        let tricky = "/dashboard/current_affair?tab=2&q=añ o";
        assert_eq!(decode_component(&encode_component(tricky)), tricky);
    }

    #[test]
    fn test_query_round_trip_via_insert() {
        let mut query = QueryParams::new();
        query.insert("redirect".to_string(), "/dashboard/profile".to_string());

        let s = query.to_query_string();
        assert_eq!(s, "redirect=%2Fdashboard%2Fprofile");

        let parsed = QueryParams::from_query_string(&s);
        assert_eq!(
            parsed.get("redirect"),
            Some(&"/dashboard/profile".to_string())
        );
    }
}
