//! The fixed table of known configuration keys.
//!
//! A [`Schema`] lists every key the resolver recognizes together with its
//! kind, its default, the environment variable and command-line flag that may
//! set it, and whether it must be non-empty after resolution. Every field
//! carries a default, so seeding defaults establishes presence for every
//! known key and later layers only ever override.

use crate::types::{ConfigValue, ValueKind};

/// A single schema entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,
    pub kind: ValueKind,
    pub default: ConfigValue,
    pub env: Option<String>,
    pub flag: Option<String>,
    pub required: bool,
    pub doc: Option<String>,
}

impl Field {
    fn new(key: &str, default: ConfigValue, kind: ValueKind) -> Self {
        Self {
            key: key.to_string(),
            kind,
            default,
            env: None,
            flag: None,
            required: false,
            doc: None,
        }
    }

    pub fn string(key: &str, default: &str) -> Self {
        Self::new(key, ConfigValue::from(default), ValueKind::String)
    }

    pub fn integer(key: &str, default: i64) -> Self {
        Self::new(key, ConfigValue::Integer(default), ValueKind::Integer)
    }

    pub fn float(key: &str, default: f64) -> Self {
        Self::new(key, ConfigValue::Float(default), ValueKind::Float)
    }

    pub fn boolean(key: &str, default: bool) -> Self {
        Self::new(key, ConfigValue::Boolean(default), ValueKind::Boolean)
    }

    /// Environment variable that sets this key (e.g. `"PORT"`).
    pub fn env(mut self, name: &str) -> Self {
        self.env = Some(name.to_string());
        self
    }

    /// Long command-line flag, without dashes (e.g. `"port"` for `--port`).
    ///
    /// Boolean fields become presence flags: `--debug` sets `true`.
    pub fn flag(mut self, name: &str) -> Self {
        self.flag = Some(name.to_string());
        self
    }

    /// Mark the key as required: it must be non-empty after resolution.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn doc(mut self, doc: &str) -> Self {
        self.doc = Some(doc.to_string());
        self
    }
}

/// Ordered set of [`Field`]s. Order is the order layers are applied in,
/// which keeps resolution independent of environment iteration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// `host`, `port`, and `debug`, wired to `HOST`/`PORT`/`DEBUG` and
    /// `--host`/`--port`/`--debug`.
    pub fn standard() -> Self {
        Self::new()
            .field(
                Field::string("host", "0.0.0.0")
                    .env("HOST")
                    .flag("host")
                    .doc("Interface to bind to."),
            )
            .field(
                Field::integer("port", 8090)
                    .env("PORT")
                    .flag("port")
                    .doc("Port to listen on."),
            )
            .field(
                Field::boolean("debug", false)
                    .env("DEBUG")
                    .flag("debug")
                    .doc("Enable debug mode."),
            )
    }

    /// Add a field. A field with an existing key replaces the earlier one in place.
    pub fn field(mut self, field: Field) -> Self {
        match self.fields.iter_mut().find(|f| f.key == field.key) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn required_keys(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.key.as_str())
            .collect()
    }

    pub(crate) fn by_flag(&self, flag: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.flag.as_deref() == Some(flag))
    }
}
