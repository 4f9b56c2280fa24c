//! Cookie header parsing.

use std::collections::HashMap;

/// Parses a raw `Cookie` header into a name → value map.
///
/// Pairs are separated by `;` and split on the first `=`. Names and values
/// are trimmed. A pair without `=` maps to an empty value, and a repeated
/// name keeps the last value seen.
///
/// # Examples
///
/// ```
/// use localapikey::web::parse_cookie_header;
///
/// let cookies = parse_cookie_header("apikey=XYZ; other=1");
/// assert_eq!(cookies.get("apikey").map(String::as_str), Some("XYZ"));
/// assert_eq!(cookies.get("other").map(String::as_str), Some("1"));
/// ```
pub fn parse_cookie_header(header: &str) -> HashMap<String, String> {
    header
        .split(';')
        .map(|pair| match pair.split_once('=') {
            Some((name, value)) => (name.trim().to_string(), value.trim().to_string()),
            None => (pair.trim().to_string(), String::new()),
        })
        .collect()
}
