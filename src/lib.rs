//! Layered configuration resolution for services and command-line tools.
//!
//! Layerfig merges compiled defaults, an optional JSON config file,
//! environment variables, and command-line flags into one immutable
//! [`ResolvedConfig`], recording which layer every value came from.
//!
//! ```ignore
//! let mut resolver = ConfigResolver::default();
//! resolver
//!     .with_defaults()
//!     .with_file("config.json")?
//!     .with_process_environment()?
//!     .with_command_line(std::env::args().skip(1))?;
//! let config = resolver.build();
//! config.validate(&["host", "port"])?;
//! let server: ServerConfig = config.extract()?;
//! ```
//!
//! # Layer precedence
//!
//! ```text
//! Defaults              Schema field defaults
//!        ↑ overridden by
//! Config file           JSON object, one or more files
//!        ↑ overridden by
//! Environment           HOST, PORT, DEBUG, ... (or a dotenv cascade)
//!        ↑ overridden by
//! Command line          --host, --port, --debug, .with_override()
//! ```
//!
//! Every layer is **sparse**: it only touches the keys it explicitly sets.
//! A config file with just `{"port": 8000}` leaves `host` at whatever a
//! lower layer put there. Priority is a property of the layer, not of call
//! order, so applying the file after the command line still cannot
//! overwrite a command-line value.
//!
//! # The schema
//!
//! A [`Schema`] is the fixed table of known keys. Each [`Field`] declares a
//! [`ValueKind`], a default, and optionally an environment variable, a
//! command-line flag, and whether the key is required. The
//! [standard schema](Schema::standard) is:
//!
//! | Key | Kind | Default | Env var | Flag |
//! |-----|------|---------|---------|------|
//! | `host` | string | `0.0.0.0` | `HOST` | `--host <v>` |
//! | `port` | integer | `8090` | `PORT` | `--port <v>` |
//! | `debug` | boolean | `false` | `DEBUG` | `--debug` |
//!
//! Dotted keys (`database.url`) nest into sections when the snapshot is
//! [extracted](ResolvedConfig::extract) into a confique struct.
//!
//! # Value coercion
//!
//! Environment variables and flag values arrive as strings:
//!
//! - **integer** fields must parse as a base-10 integer, otherwise the layer
//!   fails with [`LayerfigError::Type`] naming the key and the raw value.
//! - **boolean** fields are `true` when the text equals `"true"` ignoring
//!   case. Anything else is `false`.
//! - A set environment variable always applies, even when empty. An empty
//!   required string is then reported by validation.
//!
//! `--debug` is a presence flag: present means `true`, absent leaves the
//! current value alone. It never sets `false`.
//!
//! # Atomic layers
//!
//! Each `with_*` call parses its whole source before touching the merged
//! mapping. A malformed file, a bad integer, or an unknown flag returns an
//! error and leaves the resolver exactly as it was.
//!
//! # Build and reuse
//!
//! [`build()`](ConfigResolver::build) returns a deep-copied snapshot and
//! seals the resolver. Calling `build()` again returns an equal snapshot;
//! applying another layer fails with [`LayerfigError::Sealed`] until
//! [`with_defaults()`](ConfigResolver::with_defaults) starts a fresh cycle.
//!
//! # Dotenv files
//!
//! [`EnvFiles`] builds an environment view from `.env`, the process
//! environment, `.env.{profile}`, and `.env.local` without mutating the
//! process. Pass its result to
//! [`with_environment()`](ConfigResolver::with_environment).
//!
//! # Command-line policy
//!
//! Strict by default: any token that is not a schema flag fails with
//! [`LayerfigError::UnknownFlag`]. With
//! [`.strict(false)`](ConfigResolver::strict) unknown tokens are dropped,
//! which lets an application hand its full argument list to the resolver.
//!
//! # Logging
//!
//! Layers emit [`tracing`] events (`debug` when a layer is applied, `warn`
//! for keys a config file adds outside the schema). The library never
//! installs a subscriber.
//!
//! # Error handling
//!
//! All fallible operations return [`LayerfigError`]. Type errors carry the
//! key, the offending value, and the layer; validation errors list every
//! missing key at once.

pub mod error;
pub mod types;

mod builder;
mod cli;
mod dotenv;
mod env;
mod file;
mod merge;
mod ops;
mod overrides;
mod resolved;
mod schema;

#[cfg(test)]
mod fixtures;

pub use builder::ConfigResolver;
pub use dotenv::{EnvFiles, PROFILE_VAR};
pub use error::LayerfigError;
pub use ops::ConfigResult;
pub use resolved::{ResolvedConfig, ServerConfig, validate};
pub use schema::{Field, Schema};
pub use types::{ConfigSource, ConfigValue, SearchPath, ValueKind};
