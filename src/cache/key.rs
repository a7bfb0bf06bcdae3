//! Cache Key Module
//!
//! Canonicalizes a logical request (endpoint + parameters) into a cache
//! key. Determinism is the only contract: the same logical request must
//! always yield the same key regardless of the order the caller supplied
//! its parameters in.

use serde_json::Value;

// == Build Cache Key ==
/// Builds a canonical cache key for an endpoint and its parameters.
///
/// Parameter names are sorted lexicographically and each value is
/// serialized with serde_json's stable encoding (object keys are ordered,
/// so nested values canonicalize too). Null values and empty strings are
/// treated as absent; with no parameters left, the key collapses to the
/// bare endpoint string.
pub fn build_cache_key(endpoint: &str, params: &[(&str, Value)]) -> String {
    let mut parts: Vec<(&str, String)> = params
        .iter()
        .filter(|(_, value)| !is_absent(value))
        .map(|(name, value)| {
            let encoded = serde_json::to_string(value).unwrap_or_else(|_| "null".to_string());
            (*name, encoded)
        })
        .collect();

    if parts.is_empty() {
        return endpoint.to_string();
    }

    parts.sort_by(|a, b| a.0.cmp(b.0));

    let query: Vec<String> = parts
        .into_iter()
        .map(|(name, encoded)| format!("{}={}", name, encoded))
        .collect();

    format!("{}?{}", endpoint, query.join("&"))
}

/// A parameter counts as absent when it is null or an empty string.
fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
