//! URL and JSON accessor helpers

use serde_json::Value;

/// Join a base URL and a path with exactly one `/` between them.
pub fn join_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}

/// Walk a JSON object along a key path.
///
/// An empty path yields the value itself; any missing key or non-object
/// intermediate yields `None`.
pub fn nested_get<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = value;
    for key in path {
        current = current.as_object()?.get(*key)?;
    }
    Some(current)
}
