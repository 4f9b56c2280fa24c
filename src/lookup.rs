//! Bracket-path lookup into tree-shaped request data.
//!
//! Form and query parsers encode nested fields as `a[b][c]`. The functions
//! here turn such a name into path segments and walk a [`serde_json::Value`]
//! along them.

use serde_json::{Map, Value};

/// Splits a bracket-encoded field name into path segments.
///
/// Every `]` is dropped and the remainder is split on `[`, so `a[b][c]`
/// becomes `["a", "b", "c"]` and a plain `apikey` stays a single segment.
///
/// # Examples
///
/// ```
/// use localapikey::lookup::path_segments;
///
/// assert_eq!(path_segments("a[b][c]"), vec!["a", "b", "c"]);
/// assert_eq!(path_segments("apikey"), vec!["apikey"]);
/// assert_eq!(path_segments("list[]"), vec!["list", ""]);
/// ```
pub fn path_segments(field: &str) -> Vec<String> {
    field.replace(']', "").split('[').map(str::to_owned).collect()
}

/// Resolves a bracket-path `field` against `container`.
///
/// Descends one segment at a time:
/// - a segment missing from the current object (or array) yields `None`
/// - a non-structured value is returned as soon as it is reached, even when
///   segments remain
/// - running out of segments while still holding an object or array yields
///   `None`, since only leaf values are usable keys
///
/// `null` counts as a structure with nothing inside it, so it never resolves.
///
/// # Examples
///
/// ```
/// use localapikey::lookup::lookup;
/// use serde_json::json;
///
/// let body = json!({"a": {"b": {"c": "K"}}});
/// assert_eq!(lookup(&body, "a[b][c]"), Some(&json!("K")));
/// assert_eq!(lookup(&body, "a[b]"), None);
/// assert_eq!(lookup(&body, "a[x]"), None);
/// ```
pub fn lookup<'v>(container: &'v Value, field: &str) -> Option<&'v Value> {
    let mut current = container;

    for segment in path_segments(field) {
        let next = match current {
            Value::Object(map) => map.get(&segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }?;

        match next {
            Value::Object(_) | Value::Array(_) | Value::Null => current = next,
            leaf => return Some(leaf),
        }
    }

    None
}

/// Converts a resolved leaf into a candidate key.
///
/// Empty strings, `false`, zero and `null` do not count as a key, which lets
/// the caller fall through to the next source. Other scalars are rendered as
/// strings.
pub(crate) fn candidate_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// Looks up `field` in `container` and keeps the result only if it is a
/// non-empty candidate key.
pub(crate) fn lookup_key(container: Option<&Value>, field: &str) -> Option<String> {
    container
        .and_then(|c| lookup(c, field))
        .and_then(candidate_key)
}

/// Inserts `value` at the bracket path `field`, creating intermediate objects.
///
/// An intermediate value that is not an object is replaced. This is how
/// bracketed query parameters such as `user[key]=x` become nested data.
pub(crate) fn insert_path(container: &mut Value, field: &str, value: Value) {
    let segments = path_segments(field);
    let Some((last, parents)) = segments.split_last() else {
        return;
    };

    let mut current = container;
    for segment in parents {
        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
        current = match current {
            Value::Object(map) => map
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Map::new())),
            _ => return,
        };
    }

    if !current.is_object() {
        *current = Value::Object(Map::new());
    }
    if let Value::Object(map) = current {
        map.insert(last.clone(), value);
    }
}
