//! Command-line layer.
//!
//! Flags come from the schema: every field with a `flag` becomes a long
//! option. String and integer fields take a value (`--port 9000` or
//! `--port=9000`); boolean fields are presence flags (`--debug`). A boolean
//! flag that is absent leaves the lower layers' value untouched. Repeating a
//! flag is allowed and the last occurrence wins.
//!
//! The parser is a `clap::Command` built at runtime from the schema, so the
//! token grammar matches what users of clap-based tools expect.
//!
//! # Unknown arguments
//!
//! One policy, selected by `strict`:
//!
//! - **strict** (default): any token that is not a known flag or the value
//!   of one fails with [`LayerfigError::UnknownFlag`].
//! - **lenient**: unknown flags and stray tokens are dropped before parsing,
//!   so an application can hand over its whole argv.

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, Command};
use tracing::debug;

use crate::error::LayerfigError;
use crate::merge::Layer;
use crate::schema::Schema;
use crate::types::{ConfigSource, ConfigValue, ValueKind};

/// Parse `args` (without the program name) into a layer.
pub fn args_to_layer<I, T>(schema: &Schema, args: I, strict: bool) -> Result<Layer, LayerfigError>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let tokens: Vec<String> = args.into_iter().map(Into::into).collect();
    let tokens = if strict {
        tokens
    } else {
        retain_known(schema, tokens)
    };

    let matches = command_for(schema)
        .try_get_matches_from(&tokens)
        .map_err(from_clap_error)?;

    let mut layer = Layer::new();
    for field in schema.fields() {
        let Some(flag) = field.flag.as_deref() else {
            continue;
        };
        match field.kind {
            ValueKind::Boolean => {
                if matches.value_source(flag) == Some(ValueSource::CommandLine) {
                    layer.insert(field.key.clone(), ConfigValue::Boolean(true));
                }
            }
            ValueKind::String | ValueKind::Integer | ValueKind::Float => {
                if let Some(raw) = matches.get_one::<String>(flag) {
                    let value = field
                        .kind
                        .coerce_str(&field.key, raw, ConfigSource::CommandLine)?;
                    layer.insert(field.key.clone(), value);
                }
            }
        }
    }
    Ok(layer)
}

fn command_for(schema: &Schema) -> Command {
    let mut command = Command::new("layerfig")
        .no_binary_name(true)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .args_override_self(true);

    for field in schema.fields() {
        let Some(flag) = &field.flag else {
            continue;
        };
        let arg = Arg::new(flag.clone()).long(flag.clone());
        let arg = match field.kind {
            ValueKind::Boolean => arg.action(ArgAction::SetTrue),
            ValueKind::String | ValueKind::Integer | ValueKind::Float => arg
                .action(ArgAction::Set)
                .value_name(field.key.clone())
                .allow_negative_numbers(true),
        };
        let arg = match &field.doc {
            Some(doc) => arg.help(doc.clone()),
            None => arg,
        };
        command = command.arg(arg);
    }
    command
}

/// Drop everything that is not a known flag (or the value following one).
fn retain_known(schema: &Schema, tokens: Vec<String>) -> Vec<String> {
    let mut kept = Vec::with_capacity(tokens.len());
    let mut iter = tokens.into_iter();

    while let Some(token) = iter.next() {
        let field = token
            .strip_prefix("--")
            .map(|name| name.split_once('=').map_or(name, |(name, _)| name))
            .and_then(|name| schema.by_flag(name));

        let Some(field) = field else {
            debug!(token = %token, "ignoring unrecognized command-line argument");
            continue;
        };

        let takes_next = field.kind != ValueKind::Boolean && !token.contains('=');
        kept.push(token);
        if takes_next && let Some(value) = iter.next() {
            kept.push(value);
        }
    }
    kept
}

fn from_clap_error(e: clap::Error) -> LayerfigError {
    if e.kind() == ErrorKind::UnknownArgument
        && let Some(ContextValue::String(arg)) = e.get(ContextKind::InvalidArg)
    {
        return LayerfigError::UnknownFlag(arg.clone());
    }
    let rendered = e.to_string();
    let first_line = rendered.lines().next().unwrap_or_default();
    LayerfigError::InvalidArgs(first_line.trim_start_matches("error: ").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Layer, LayerfigError> {
        args_to_layer(&Schema::standard(), args.iter().copied(), true)
    }

    fn parse_lenient(args: &[&str]) -> Result<Layer, LayerfigError> {
        args_to_layer(&Schema::standard(), args.iter().copied(), false)
    }

    #[test]
    fn empty_args_empty_layer() {
        assert!(parse(&[]).unwrap().is_empty());
    }

    #[test]
    fn port_separate_value() {
        let layer = parse(&["--port", "9000"]).unwrap();
        assert_eq!(layer["port"], ConfigValue::Integer(9000));
        assert_eq!(layer.len(), 1);
    }

    #[test]
    fn port_inline_value() {
        let layer = parse(&["--port=9000"]).unwrap();
        assert_eq!(layer["port"], ConfigValue::Integer(9000));
    }

    #[test]
    fn host_string() {
        let layer = parse(&["--host", "127.0.0.1"]).unwrap();
        assert_eq!(layer["host"], ConfigValue::from("127.0.0.1"));
    }

    #[test]
    fn debug_presence_sets_true() {
        let layer = parse(&["--debug"]).unwrap();
        assert_eq!(layer["debug"], ConfigValue::Boolean(true));
    }

    #[test]
    fn debug_absent_not_in_layer() {
        let layer = parse(&["--port", "1"]).unwrap();
        assert!(!layer.contains_key("debug"));
    }

    #[test]
    fn repeated_flag_last_wins() {
        let layer = parse(&["--port", "1000", "--port", "2000"]).unwrap();
        assert_eq!(layer["port"], ConfigValue::Integer(2000));
    }

    #[test]
    fn negative_integer_value() {
        let layer = parse(&["--port", "-1"]).unwrap();
        assert_eq!(layer["port"], ConfigValue::Integer(-1));
    }

    #[test]
    fn bad_port_is_type_error() {
        let err = parse(&["--port", "abc"]).unwrap_err();
        match err {
            LayerfigError::Type { key, value, layer, .. } => {
                assert_eq!(key, "port");
                assert_eq!(value, "abc");
                assert_eq!(layer, ConfigSource::CommandLine);
            }
            other => panic!("Expected Type, got {other:?}"),
        }
    }

    #[test]
    fn strict_rejects_unknown_flag() {
        let err = parse(&["--verbose"]).unwrap_err();
        match err {
            LayerfigError::UnknownFlag(flag) => assert_eq!(flag, "--verbose"),
            other => panic!("Expected UnknownFlag, got {other:?}"),
        }
    }

    #[test]
    fn strict_rejects_stray_positional() {
        let err = parse(&["serve"]).unwrap_err();
        assert!(matches!(err, LayerfigError::UnknownFlag(_)));
    }

    #[test]
    fn strict_rejects_help() {
        assert!(matches!(parse(&["--help"]), Err(LayerfigError::UnknownFlag(_))));
    }

    #[test]
    fn missing_value_is_invalid_args() {
        let err = parse(&["--port"]).unwrap_err();
        assert!(matches!(err, LayerfigError::InvalidArgs(_)));
    }

    #[test]
    fn lenient_drops_unknown_flags_and_positionals() {
        let layer = parse_lenient(&["serve", "--verbose", "--port", "9000", "-x", "--debug"]).unwrap();
        assert_eq!(layer["port"], ConfigValue::Integer(9000));
        assert_eq!(layer["debug"], ConfigValue::Boolean(true));
        assert_eq!(layer.len(), 2);
    }

    #[test]
    fn lenient_drops_unknown_inline_flag() {
        let layer = parse_lenient(&["--log-level=info", "--host=h"]).unwrap();
        assert_eq!(layer["host"], ConfigValue::from("h"));
        assert_eq!(layer.len(), 1);
    }

    #[test]
    fn lenient_still_coerces() {
        assert!(matches!(
            parse_lenient(&["--port", "abc"]),
            Err(LayerfigError::Type { .. })
        ));
    }

    #[test]
    fn custom_schema_flags() {
        use crate::schema::Field;
        let schema = Schema::standard().field(Field::string("api_key", "").flag("api-key"));
        let layer = args_to_layer(&schema, ["--api-key", "sk-1"], true).unwrap();
        assert_eq!(layer["api_key"], ConfigValue::from("sk-1"));
    }
}
