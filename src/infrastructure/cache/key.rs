//! Cache key derivation
//!
//! Deterministic fingerprint of a parameter set. Two calls with the same
//! namespace and semantically equal parameters always produce the same key,
//! regardless of key ordering or absent/null entries, so the keys would stay
//! stable across processes if the cache were ever externalized.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// Derive a cache key from a namespace and a parameter map
///
/// Null entries are dropped, remaining keys are sorted lexicographically, the
/// sorted map is serialized to canonical JSON and md5-digested. The result is
/// `"{namespace}:{hex_digest}"`.
pub fn derive_cache_key(namespace: &str, params: &Map<String, Value>) -> String {
    let sorted: BTreeMap<&String, &Value> = params
        .iter()
        .filter(|(_, value)| !value.is_null())
        .collect();

    // BTreeMap serializes in key order, which makes the string canonical
    let canonical = serde_json::to_string(&sorted).unwrap_or_default();
    let digest = md5::compute(canonical.as_bytes());

    format!("{}:{:x}", namespace, digest)
}

/// Convenience for callers building params inline
///
/// Panics if `params` is not a JSON object; callers pass `serde_json::json!`
/// object literals.
pub fn derive_cache_key_from_value(namespace: &str, params: &Value) -> String {
    match params.as_object() {
        Some(map) => derive_cache_key(namespace, map),
        None => derive_cache_key(namespace, &Map::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_key_is_order_independent() {
        let a = derive_cache_key_from_value("media", &json!({"a": 1, "b": 2}));
        let b = derive_cache_key_from_value("media", &json!({"b": 2, "a": 1}));
        assert_eq!(a, b);
    }

    #[test]
    fn test_null_params_are_excluded() {
        let with_null = derive_cache_key_from_value("media", &json!({"a": 1, "b": null}));
        let without = derive_cache_key_from_value("media", &json!({"a": 1}));
        assert_eq!(with_null, without);
    }

    #[test]
    fn test_namespace_prefixes_key() {
        let key = derive_cache_key_from_value("script", &json!({"prompt": "meditação"}));
        assert!(key.starts_with("script:"));
        // md5 hex digest after the namespace
        assert_eq!(key.len(), "script:".len() + 32);
    }

    #[test]
    fn test_different_values_different_keys() {
        let a = derive_cache_key_from_value("script", &json!({"prompt": "meditação"}));
        let b = derive_cache_key_from_value("script", &json!({"prompt": "exercício"}));
        assert_ne!(a, b);
    }

    #[test]
    fn test_same_params_different_namespaces() {
        let a = derive_cache_key_from_value("script", &json!({"q": 1}));
        let b = derive_cache_key_from_value("media", &json!({"q": 1}));
        assert_ne!(a, b);
    }
}
