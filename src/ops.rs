//! Display operations on a resolved snapshot: key lookup and listing.
//!
//! Provides the logic behind an application's `config list` / `config get`
//! commands and the `ConfigResult` enum callers print.

use std::fmt;

use crate::error::LayerfigError;
use crate::resolved::ResolvedConfig;
use crate::types::ConfigSource;

/// Result of a display operation. Returned to the caller for printing.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigResult {
    /// A key's resolved value and the layer it came from.
    KeyValue {
        key: String,
        value: String,
        source: ConfigSource,
    },
    /// All resolved entries, sorted by key.
    Listing {
        entries: Vec<(String, String, ConfigSource)>,
    },
}

impl fmt::Display for ConfigResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigResult::KeyValue { key, value, source } => {
                write!(f, "{key} = {value}  ({source})")
            }
            ConfigResult::Listing { entries } => {
                let width = entries.iter().map(|(k, _, _)| k.len()).max().unwrap_or(0);
                for (i, (key, value, source)) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{key:<width$} = {value}  ({source})")?;
                }
                Ok(())
            }
        }
    }
}

pub fn get_value(config: &ResolvedConfig, key: &str) -> Result<ConfigResult, LayerfigError> {
    let value = config
        .get(key)
        .ok_or_else(|| LayerfigError::KeyNotFound(key.into()))?;
    let source = config
        .source(key)
        .ok_or_else(|| LayerfigError::KeyNotFound(key.into()))?;

    Ok(ConfigResult::KeyValue {
        key: key.into(),
        value: value.to_string(),
        source,
    })
}

pub fn list_values(config: &ResolvedConfig) -> ConfigResult {
    let entries = config
        .iter()
        .map(|(key, value, source)| (key.to_string(), value.to_string(), source))
        .collect();
    ConfigResult::Listing { entries }
}
