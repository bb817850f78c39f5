use std::path::PathBuf;

use thiserror::Error;

use crate::types::{ConfigSource, ValueKind};

#[derive(Debug, Error)]
pub enum LayerfigError {
    /// A config file exists but does not hold a JSON object.
    #[error("Failed to parse {path}: {reason}")]
    Format { path: PathBuf, reason: String },

    /// A layer supplied a value that cannot be coerced to the field's kind.
    #[error("Invalid {expected} value {value:?} for '{key}' from {layer}")]
    Type {
        key: String,
        value: String,
        layer: ConfigSource,
        expected: ValueKind,
    },

    /// Required keys absent or empty after all layers were merged.
    #[error("Missing required configuration: {}", keys.join(", "))]
    Validation { keys: Vec<String> },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unknown command-line argument '{0}'")]
    UnknownFlag(String),

    #[error("Invalid command-line arguments: {0}")]
    InvalidArgs(String),

    #[error("Failed to load {path}: {source}")]
    Dotenv {
        path: PathBuf,
        source: dotenvy::Error,
    },

    #[error("Resolver already built; call .with_defaults() to start a new resolution")]
    Sealed,

    #[error("App name is required for platform config discovery; call .app_name() on the resolver")]
    AppNameRequired,

    #[error("Configuration error: {0}")]
    Extract(#[from] confique::Error),

    /// The merged values do not deserialize into the requested struct.
    #[error("Resolved configuration does not fit the target struct: {0}")]
    Deserialize(#[source] serde_json::Error),

    #[error("Key not found: {0}")]
    KeyNotFound(String),
}
