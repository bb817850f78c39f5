use std::fmt;
use std::path::PathBuf;

use serde_json::Value;

use crate::error::LayerfigError;

/// The origin of a configuration value.
///
/// Ordering is the layer priority: a value from a greater source always
/// overwrites one from a lesser source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfigSource {
    Default,
    File,
    Environment,
    CommandLine,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConfigSource::Default => "default",
            ConfigSource::File => "file",
            ConfigSource::Environment => "environment",
            ConfigSource::CommandLine => "command line",
        };
        f.write_str(name)
    }
}

/// Declared type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    String,
    Integer,
    Float,
    Boolean,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::String => "string",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

impl ValueKind {
    /// Coerce a raw string (env var, `.env` entry, CLI token) into this kind.
    ///
    /// Booleans compare case-insensitively against `"true"`; every other
    /// string is `false`. Integers must parse as `i64`, floats as a finite `f64`.
    pub fn coerce_str(
        self,
        key: &str,
        raw: &str,
        layer: ConfigSource,
    ) -> Result<ConfigValue, LayerfigError> {
        match self {
            ValueKind::String => Ok(ConfigValue::String(raw.to_string())),
            ValueKind::Integer => raw
                .trim()
                .parse::<i64>()
                .map(ConfigValue::Integer)
                .map_err(|_| LayerfigError::Type {
                    key: key.to_string(),
                    value: raw.to_string(),
                    layer,
                    expected: self,
                }),
            ValueKind::Float => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(ConfigValue::Float)
                .ok_or_else(|| LayerfigError::Type {
                    key: key.to_string(),
                    value: raw.to_string(),
                    layer,
                    expected: self,
                }),
            ValueKind::Boolean => Ok(ConfigValue::Boolean(
                raw.trim().eq_ignore_ascii_case("true"),
            )),
        }
    }

    /// Coerce a JSON value from a config file into this kind.
    ///
    /// Native JSON types are taken as-is; strings go through [`coerce_str`](Self::coerce_str)
    /// so `"port": "8000"` behaves like `PORT=8000`.
    pub fn coerce_json(
        self,
        key: &str,
        value: &Value,
        layer: ConfigSource,
    ) -> Result<ConfigValue, LayerfigError> {
        match (self, value) {
            (ValueKind::String, Value::String(s)) => Ok(ConfigValue::String(s.clone())),
            (ValueKind::Integer, Value::Number(n)) if n.is_i64() => {
                Ok(ConfigValue::Integer(n.as_i64().unwrap_or_default()))
            }
            (ValueKind::Float, Value::Number(n)) if n.as_f64().is_some_and(f64::is_finite) => {
                Ok(ConfigValue::Float(n.as_f64().unwrap_or_default()))
            }
            (ValueKind::Boolean, Value::Bool(b)) => Ok(ConfigValue::Boolean(*b)),
            (ValueKind::Integer | ValueKind::Float | ValueKind::Boolean, Value::String(s)) => {
                self.coerce_str(key, s, layer)
            }
            (_, other) => Err(LayerfigError::Type {
                key: key.to_string(),
                value: other.to_string(),
                layer,
                expected: self,
            }),
        }
    }
}

/// A resolved configuration value.
///
/// Schema keys always hold one of the typed scalars. Keys a config file
/// introduces outside the schema keep their JSON value in `Raw`.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Raw(Value),
}

impl ConfigValue {
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            ConfigValue::String(_) => Some(ValueKind::String),
            ConfigValue::Integer(_) => Some(ValueKind::Integer),
            ConfigValue::Float(_) => Some(ValueKind::Float),
            ConfigValue::Boolean(_) => Some(ValueKind::Boolean),
            ConfigValue::Raw(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ConfigValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            ConfigValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Empty strings and JSON nulls count as "not provided" for validation.
    pub fn is_empty(&self) -> bool {
        match self {
            ConfigValue::String(s) => s.is_empty(),
            ConfigValue::Raw(Value::Null) => true,
            ConfigValue::Raw(Value::String(s)) => s.is_empty(),
            _ => false,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            ConfigValue::String(s) => Value::String(s.clone()),
            ConfigValue::Integer(i) => Value::from(*i),
            ConfigValue::Float(f) => {
                serde_json::Number::from_f64(*f).map_or(Value::Null, Value::Number)
            }
            ConfigValue::Boolean(b) => Value::Bool(*b),
            ConfigValue::Raw(v) => v.clone(),
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::String(s) => f.write_str(s),
            ConfigValue::Integer(i) => write!(f, "{i}"),
            ConfigValue::Float(x) => write!(f, "{x}"),
            ConfigValue::Boolean(b) => write!(f, "{b}"),
            ConfigValue::Raw(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

impl From<i64> for ConfigValue {
    fn from(i: i64) -> Self {
        ConfigValue::Integer(i)
    }
}

impl From<i32> for ConfigValue {
    fn from(i: i32) -> Self {
        ConfigValue::Integer(i.into())
    }
}

impl From<u16> for ConfigValue {
    fn from(i: u16) -> Self {
        ConfigValue::Integer(i.into())
    }
}

impl From<f64> for ConfigValue {
    fn from(f: f64) -> Self {
        ConfigValue::Float(f)
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Boolean(b)
    }
}

/// Where to look for config files during discovery.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPath {
    /// Platform config directory (XDG on Linux, ~/Library/Application Support on macOS).
    Platform,
    /// A subdirectory under the user's home directory, e.g. `Home(".myapp")`.
    Home(&'static str),
    /// Current working directory.
    Cwd,
    /// An explicit directory.
    Path(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn source_order_is_layer_priority() {
        assert!(ConfigSource::Default < ConfigSource::File);
        assert!(ConfigSource::File < ConfigSource::Environment);
        assert!(ConfigSource::Environment < ConfigSource::CommandLine);
    }

    #[test]
    fn integer_from_string() {
        let v = ValueKind::Integer
            .coerce_str("port", "9000", ConfigSource::Environment)
            .unwrap();
        assert_eq!(v, ConfigValue::Integer(9000));
    }

    #[test]
    fn integer_rejects_garbage() {
        let err = ValueKind::Integer
            .coerce_str("port", "abc", ConfigSource::Environment)
            .unwrap_err();
        match err {
            LayerfigError::Type {
                key, value, layer, ..
            } => {
                assert_eq!(key, "port");
                assert_eq!(value, "abc");
                assert_eq!(layer, ConfigSource::Environment);
            }
            other => panic!("Expected Type, got {other:?}"),
        }
    }

    #[test]
    fn boolean_is_case_insensitive_true() {
        for raw in ["true", "TRUE", "True"] {
            let v = ValueKind::Boolean
                .coerce_str("debug", raw, ConfigSource::Environment)
                .unwrap();
            assert_eq!(v, ConfigValue::Boolean(true), "{raw}");
        }
    }

    #[test]
    fn boolean_anything_else_is_false() {
        for raw in ["false", "0", "yes", ""] {
            let v = ValueKind::Boolean
                .coerce_str("debug", raw, ConfigSource::Environment)
                .unwrap();
            assert_eq!(v, ConfigValue::Boolean(false), "{raw}");
        }
    }

    #[test]
    fn json_native_types_accepted() {
        let layer = ConfigSource::File;
        assert_eq!(
            ValueKind::Integer.coerce_json("port", &json!(8000), layer).unwrap(),
            ConfigValue::Integer(8000)
        );
        assert_eq!(
            ValueKind::Boolean.coerce_json("debug", &json!(true), layer).unwrap(),
            ConfigValue::Boolean(true)
        );
        assert_eq!(
            ValueKind::String.coerce_json("host", &json!("h"), layer).unwrap(),
            ConfigValue::from("h")
        );
    }

    #[test]
    fn json_string_integer_coerced() {
        let v = ValueKind::Integer
            .coerce_json("port", &json!("8000"), ConfigSource::File)
            .unwrap();
        assert_eq!(v, ConfigValue::Integer(8000));
    }

    #[test]
    fn json_mismatch_is_type_error() {
        let layer = ConfigSource::File;
        assert!(ValueKind::String.coerce_json("host", &json!(1), layer).is_err());
        assert!(ValueKind::Integer.coerce_json("port", &json!(1.5), layer).is_err());
        assert!(ValueKind::Boolean.coerce_json("debug", &json!(null), layer).is_err());
    }

    #[test]
    fn float_from_string_and_number() {
        let env = ValueKind::Float
            .coerce_str("api.temperature", " 0.7 ", ConfigSource::Environment)
            .unwrap();
        assert_eq!(env, ConfigValue::Float(0.7));
        let file = ValueKind::Float
            .coerce_json("api.temperature", &json!(1), ConfigSource::File)
            .unwrap();
        assert_eq!(file, ConfigValue::Float(1.0));
    }

    #[test]
    fn float_rejects_garbage_and_non_finite() {
        for raw in ["warm", "", "NaN", "inf"] {
            let err = ValueKind::Float
                .coerce_str("api.temperature", raw, ConfigSource::Environment)
                .unwrap_err();
            assert!(matches!(err, LayerfigError::Type { .. }), "{raw}");
        }
    }

    #[test]
    fn kind_matches_variant() {
        assert_eq!(ConfigValue::from("h").kind(), Some(ValueKind::String));
        assert_eq!(ConfigValue::from(0.5).kind(), Some(ValueKind::Float));
        assert_eq!(ConfigValue::Raw(json!([])).kind(), None);
    }

    #[test]
    fn emptiness() {
        assert!(ConfigValue::from("").is_empty());
        assert!(ConfigValue::Raw(Value::Null).is_empty());
        assert!(!ConfigValue::from("x").is_empty());
        assert!(!ConfigValue::Integer(0).is_empty());
        assert!(!ConfigValue::Boolean(false).is_empty());
    }

    #[test]
    fn display_is_plain() {
        assert_eq!(ConfigValue::from("0.0.0.0").to_string(), "0.0.0.0");
        assert_eq!(ConfigValue::Integer(8090).to_string(), "8090");
        assert_eq!(ConfigValue::Float(0.7).to_string(), "0.7");
        assert_eq!(ConfigValue::Boolean(false).to_string(), "false");
        assert_eq!(ConfigValue::Raw(json!([1, 2])).to_string(), "[1,2]");
    }
}
