//! JSON config file loading and discovery.
//!
//! A config file is optional: a missing file yields no layer at all. A file
//! that exists must hold a JSON object, otherwise loading fails with
//! [`LayerfigError::Format`]. Only actual I/O errors (permissions, etc.) are
//! reported as [`LayerfigError::Io`].
//!
//! Discovery resolves a list of [`SearchPath`]s in **priority-ascending**
//! order (last = highest priority) and returns every file found, so the
//! resolver can overlay them in turn.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{trace, warn};

use crate::error::LayerfigError;
use crate::merge::Layer;
use crate::schema::Schema;
use crate::types::{ConfigSource, ConfigValue, SearchPath};

/// Read and parse the JSON config file at `path` into a layer.
///
/// Schema keys are coerced to their declared kind. Keys outside the schema
/// are kept as [`ConfigValue::Raw`]. Returns `Ok(None)` when the file does
/// not exist. The file is fully read and closed before parsing starts.
pub fn read_layer(path: &Path, schema: &Schema) -> Result<Option<Layer>, LayerfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            trace!(path = %path.display(), "config file not found, skipping");
            return Ok(None);
        }
        Err(e) => {
            return Err(LayerfigError::Io {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    parse_layer(&content, path, schema).map(Some)
}

/// Parse file content into a layer. Pure; `path` is only used in errors.
pub fn parse_layer(content: &str, path: &Path, schema: &Schema) -> Result<Layer, LayerfigError> {
    // Editors on Windows like to prepend a byte order mark.
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let parsed: Value = serde_json::from_str(content).map_err(|e| LayerfigError::Format {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let object = match parsed {
        Value::Object(object) => object,
        other => {
            return Err(LayerfigError::Format {
                path: path.to_path_buf(),
                reason: format!(
                    "expected a JSON object at the top level, found {}",
                    json_type(&other)
                ),
            });
        }
    };

    let mut layer = Layer::new();
    for (key, value) in object {
        let coerced = match schema.get(&key) {
            Some(field) => field.kind.coerce_json(&key, &value, ConfigSource::File)?,
            None => {
                warn!(key = %key, path = %path.display(), "unknown config key, keeping as-is");
                ConfigValue::Raw(value)
            }
        };
        layer.insert(key, coerced);
    }
    Ok(layer)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Resolve a [`SearchPath`] to a concrete directory.
///
/// `Platform` needs the app name to build the platform config directory
/// (e.g. `~/.config/{app_name}/` on Linux). Returns `Ok(None)` when the
/// directory cannot be determined (e.g. no home directory).
pub fn resolve_search_path(
    sp: &SearchPath,
    app_name: Option<&str>,
) -> Result<Option<PathBuf>, LayerfigError> {
    let dir = match sp {
        SearchPath::Platform => {
            let app = app_name.ok_or(LayerfigError::AppNameRequired)?;
            directories::ProjectDirs::from("", "", app).map(|p| p.config_dir().to_path_buf())
        }
        SearchPath::Home(subdir) => directories::UserDirs::new().map(|u| u.home_dir().join(subdir)),
        SearchPath::Cwd => std::env::current_dir().ok(),
        SearchPath::Path(p) => Some(p.clone()),
    };
    Ok(dir)
}

/// Load `{dir}/{file_name}` for every search path, in priority-ascending order.
///
/// Missing files are skipped. Parsing stops at the first malformed file.
pub fn load_discovered(
    search_paths: &[SearchPath],
    file_name: &str,
    app_name: Option<&str>,
    schema: &Schema,
) -> Result<Vec<(PathBuf, Layer)>, LayerfigError> {
    let mut found = Vec::new();
    for sp in search_paths {
        let Some(dir) = resolve_search_path(sp, app_name)? else {
            trace!(search_path = ?sp, "search path unavailable, skipping");
            continue;
        };
        let path = dir.join(file_name);
        if let Some(layer) = read_layer(&path, schema)? {
            found.push((path, layer));
        }
    }
    Ok(found)
}
