//! The immutable configuration snapshot and everything done with it after
//! resolution: validation, typed extraction, and lookup.

use confique::Config;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::LayerfigError;
use crate::merge::Entries;
use crate::ops::{self, ConfigResult};
use crate::overrides;
use crate::schema::Schema;
use crate::types::{ConfigSource, ConfigValue};

/// Final merged configuration.
///
/// A deep copy of the resolver's state at [`build()`](crate::ConfigResolver::build)
/// time; nothing exposes it mutably, so it can be shared freely across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    entries: Entries,
}

impl ResolvedConfig {
    pub(crate) fn new(entries: Entries) -> Self {
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.get(key).map(|e| &e.value)
    }

    /// The layer that supplied the value for `key`.
    pub fn source(&self, key: &str) -> Option<ConfigSource> {
        self.entries.get(key).map(|e| e.source)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ConfigValue::as_str)
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(ConfigValue::as_integer)
    }

    pub fn get_float(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(ConfigValue::as_float)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(ConfigValue::as_bool)
    }

    pub fn host(&self) -> Option<&str> {
        self.get_str("host")
    }

    pub fn port(&self) -> Option<i64> {
        self.get_int("port")
    }

    pub fn debug(&self) -> Option<bool> {
        self.get_bool("debug")
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue, ConfigSource)> {
        self.entries
            .iter()
            .map(|(k, e)| (k.as_str(), &e.value, e.source))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check that every key in `required` is present and non-empty.
    pub fn validate<S: AsRef<str>>(&self, required: &[S]) -> Result<(), LayerfigError> {
        validate(self, required)
    }

    /// [`validate`](Self::validate) against the schema's `required` fields.
    pub fn validate_schema(&self, schema: &Schema) -> Result<(), LayerfigError> {
        let required = schema.required_keys();
        validate(self, required.as_slice())
    }

    /// The snapshot as a nested JSON object (dotted keys become sections).
    pub fn to_json(&self) -> Value {
        Value::Object(overrides::nest_dotted(
            self.entries
                .iter()
                .map(|(k, e)| (k.as_str(), e.value.to_json())),
        ))
    }

    /// Deserialize into a statically declared confique struct.
    ///
    /// Only keys that `C` declares are forwarded; dotted keys fill nested
    /// sections. Fields the snapshot lacks fall back to `C`'s own
    /// `#[config(default)]`, and confique reports fields that end up missing.
    pub fn extract<C: Config>(&self) -> Result<C, LayerfigError>
    where
        C::Layer: for<'de> Deserialize<'de>,
    {
        let valid = overrides::declared_keys(&C::META);
        let nested = overrides::nest_dotted(
            self.entries
                .iter()
                .filter(|(k, _)| valid.contains(k.as_str()))
                .map(|(k, e)| (k.as_str(), e.value.to_json())),
        );

        let layer: C::Layer =
            serde_json::from_value(Value::Object(nested)).map_err(LayerfigError::Deserialize)?;

        C::builder()
            .preloaded(layer)
            .load()
            .map_err(LayerfigError::from)
    }

    /// All entries, for display.
    pub fn listing(&self) -> ConfigResult {
        ops::list_values(self)
    }

    /// A single entry, for display.
    pub fn lookup(&self, key: &str) -> Result<ConfigResult, LayerfigError> {
        ops::get_value(self, key)
    }
}

/// Check that every key in `required` is present and non-empty in `resolved`.
///
/// Reports all offending keys at once, in the order given, without
/// duplicates. Empty strings and JSON nulls count as missing.
pub fn validate<S: AsRef<str>>(
    resolved: &ResolvedConfig,
    required: &[S],
) -> Result<(), LayerfigError> {
    let mut missing: Vec<String> = Vec::new();
    for key in required.iter().map(AsRef::as_ref) {
        let absent = resolved.get(key).is_none_or(ConfigValue::is_empty);
        if absent && !missing.iter().any(|m| m == key) {
            missing.push(key.to_string());
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(LayerfigError::Validation { keys: missing })
    }
}

/// The standard `host`/`port`/`debug` record.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Interface to bind to.
    #[config(default = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[config(default = 8090)]
    pub port: u16,

    /// Enable debug mode.
    #[config(default = false)]
    pub debug: bool,
}
