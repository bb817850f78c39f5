//! Expand flat dotted keys into nested JSON, and collect the keys a
//! confique struct declares.
//!
//! The merged view is flat: `database.url` is one key. Typed extraction needs
//! `{"database": {"url": ...}}`, which is what this module produces.

use std::collections::HashSet;

use confique::meta::{FieldKind, Meta};
use serde_json::{Map, Value};

/// Convert dotted-key pairs into a nested JSON object.
///
/// `("database.url", "pg://")` becomes `{"database": {"url": "pg://"}}`.
///
/// If a dotted key runs into a non-object value (e.g. both `database` and
/// `database.url` are set), the deeper key replaces it.
pub fn nest_dotted<'a>(entries: impl IntoIterator<Item = (&'a str, Value)>) -> Map<String, Value> {
    let mut root = Map::new();
    for (dotted_key, value) in entries {
        set_nested(&mut root, dotted_key, value);
    }
    root
}

fn set_nested(root: &mut Map<String, Value>, dotted_key: &str, value: Value) {
    let (path, leaf) = match dotted_key.rsplit_once('.') {
        Some((path, leaf)) => (Some(path), leaf),
        None => (None, dotted_key),
    };

    let mut current = root;
    for segment in path.into_iter().flat_map(|p| p.split('.')) {
        let slot = current
            .entry(segment)
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Value::Object(next) = slot else {
            unreachable!("slot was just made an object");
        };
        current = next;
    }
    current.insert(leaf.to_string(), value);
}

/// Dotted paths of every leaf field a confique struct declares.
///
/// `AppConfig { host, database: DbConfig { url } }` yields `host` and
/// `database.url`. Nested section names themselves are not keys.
pub fn declared_keys(meta: &Meta) -> HashSet<String> {
    let mut keys = HashSet::new();
    let mut pending: Vec<(String, &Meta)> = vec![(String::new(), meta)];

    while let Some((section, meta)) = pending.pop() {
        for field in meta.fields {
            let path = match section.as_str() {
                "" => field.name.to_string(),
                section => format!("{section}.{}", field.name),
            };
            match &field.kind {
                FieldKind::Leaf { .. } => {
                    keys.insert(path);
                }
                FieldKind::Nested { meta, .. } => pending.push((path, *meta)),
            }
        }
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flat_key() {
        let map = nest_dotted([("host", json!("0.0.0.0"))]);
        assert_eq!(Value::Object(map), json!({"host": "0.0.0.0"}));
    }

    #[test]
    fn nested_key() {
        let map = nest_dotted([("database.url", json!("pg://"))]);
        assert_eq!(Value::Object(map), json!({"database": {"url": "pg://"}}));
    }

    #[test]
    fn multiple_entries_different_branches() {
        let map = nest_dotted([
            ("host", json!("x")),
            ("database.url", json!("pg://")),
            ("database.pool_size", json!(20)),
        ]);
        assert_eq!(
            Value::Object(map),
            json!({"host": "x", "database": {"url": "pg://", "pool_size": 20}})
        );
    }

    #[test]
    fn deeper_key_replaces_scalar() {
        let map = nest_dotted([("database", json!("flat")), ("database.url", json!("pg://"))]);
        assert_eq!(Value::Object(map), json!({"database": {"url": "pg://"}}));
    }

    #[test]
    fn empty_input_empty_map() {
        assert!(nest_dotted(std::iter::empty()).is_empty());
    }

    // --- declared_keys ---

    use crate::fixtures::test::{AppConfig, TokenConfig};
    use confique::Config;

    #[test]
    fn declared_keys_are_dotted_leaves() {
        let mut keys: Vec<String> = declared_keys(&AppConfig::META).into_iter().collect();
        keys.sort();
        assert_eq!(
            keys,
            [
                "api.key",
                "api.model_name",
                "api.temperature",
                "database.pool_size",
                "database.url",
                "debug",
                "host",
                "port",
            ]
        );
    }

    #[test]
    fn flat_struct_has_no_sections() {
        let keys = declared_keys(&TokenConfig::META);
        assert_eq!(keys, HashSet::from(["token".to_string()]));
    }
}
