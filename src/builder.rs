use std::path::Path;

use tracing::debug;

use crate::cli;
use crate::env;
use crate::error::LayerfigError;
use crate::file;
use crate::merge::{self, Entries, Layer};
use crate::resolved::ResolvedConfig;
use crate::schema::Schema;
use crate::types::{ConfigSource, ConfigValue, SearchPath};

/// Accumulates configuration layers and produces a [`ResolvedConfig`].
///
/// Layers overlay each other in the fixed priority
/// `Default < File < Environment < CommandLine`. Each layer only touches the
/// keys it sets. Every layer is computed in full before it is applied, so a
/// failing layer leaves the resolver exactly as it was.
///
/// ```ignore
/// let mut resolver = ConfigResolver::default();
/// resolver
///     .with_defaults()
///     .with_file("config.json")?
///     .with_environment(std::env::vars())?
///     .with_command_line(["--port", "9000"])?;
/// let config = resolver.build();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    schema: Schema,
    entries: Entries,
    seeded: bool,
    sealed: bool,
    strict: bool,
    app_name: Option<String>,
}

impl Default for ConfigResolver {
    /// A resolver over [`Schema::standard()`].
    fn default() -> Self {
        Self::new(Schema::standard())
    }
}

impl ConfigResolver {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            entries: Entries::new(),
            seeded: false,
            sealed: false,
            strict: true,
            app_name: None,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Unknown command-line argument policy (default: `true`).
    ///
    /// Strict rejects anything that is not a schema flag; lenient drops it.
    pub fn strict(&mut self, strict: bool) -> &mut Self {
        self.strict = strict;
        self
    }

    /// Application name, used to locate the platform config directory.
    pub fn app_name(&mut self, name: &str) -> &mut Self {
        self.app_name = Some(name.to_string());
        self
    }

    /// Seed every schema key with its default.
    ///
    /// Discards anything applied so far and unseals a built resolver, so this
    /// is also how a new resolution cycle starts. Other layers seed defaults
    /// implicitly when this was never called.
    pub fn with_defaults(&mut self) -> &mut Self {
        let defaults: Layer = self
            .schema
            .fields()
            .iter()
            .map(|f| (f.key.clone(), f.default.clone()))
            .collect();

        self.entries.clear();
        merge::overlay(&mut self.entries, defaults, ConfigSource::Default);
        self.seeded = true;
        self.sealed = false;
        debug!(keys = self.entries.len(), "seeded defaults");
        self
    }

    /// Overlay the JSON object in `path`. A missing file is not an error.
    pub fn with_file(&mut self, path: impl AsRef<Path>) -> Result<&mut Self, LayerfigError> {
        self.prepare()?;
        let path = path.as_ref();
        if let Some(layer) = file::read_layer(path, &self.schema)? {
            debug!(path = %path.display(), keys = layer.len(), "applied file layer");
            merge::overlay(&mut self.entries, layer, ConfigSource::File);
        }
        Ok(self)
    }

    /// Overlay `{dir}/{file_name}` from each search path, lowest priority first.
    ///
    /// All files are parsed before any is applied.
    pub fn with_discovered_files(
        &mut self,
        file_name: &str,
        search_paths: &[SearchPath],
    ) -> Result<&mut Self, LayerfigError> {
        self.prepare()?;
        let found = file::load_discovered(
            search_paths,
            file_name,
            self.app_name.as_deref(),
            &self.schema,
        )?;
        for (path, layer) in found {
            debug!(path = %path.display(), keys = layer.len(), "applied file layer");
            merge::overlay(&mut self.entries, layer, ConfigSource::File);
        }
        Ok(self)
    }

    /// Overlay values from an injected environment view.
    ///
    /// Pass `std::env::vars()`, the output of [`EnvFiles::load`](crate::EnvFiles::load),
    /// or synthetic pairs. Only variables named in the schema are read.
    pub fn with_environment(
        &mut self,
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> Result<&mut Self, LayerfigError> {
        self.prepare()?;
        let layer = env::env_to_layer(&self.schema, vars)?;
        debug!(keys = layer.len(), "applied environment layer");
        merge::overlay(&mut self.entries, layer, ConfigSource::Environment);
        Ok(self)
    }

    /// Shorthand for `with_environment(std::env::vars())`.
    pub fn with_process_environment(&mut self) -> Result<&mut Self, LayerfigError> {
        self.with_environment(std::env::vars())
    }

    /// Overlay command-line flags. `args` excludes the program name.
    pub fn with_command_line<I, T>(&mut self, args: I) -> Result<&mut Self, LayerfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.prepare()?;
        let layer = cli::args_to_layer(&self.schema, args, self.strict)?;
        debug!(keys = layer.len(), "applied command-line layer");
        merge::overlay(&mut self.entries, layer, ConfigSource::CommandLine);
        Ok(self)
    }

    /// Set a single value at command-line priority. `None` is ignored, which
    /// suits optional values from an application's own argument parser.
    pub fn with_override<V: Into<ConfigValue>>(
        &mut self,
        key: &str,
        value: Option<V>,
    ) -> Result<&mut Self, LayerfigError> {
        self.prepare()?;
        let Some(value) = value else {
            return Ok(self);
        };
        let value: ConfigValue = value.into();
        let value = match self.schema.get(key) {
            Some(field) if value.kind() == Some(field.kind) => value,
            Some(field) => {
                field
                    .kind
                    .coerce_json(key, &value.to_json(), ConfigSource::CommandLine)?
            }
            None => value,
        };
        merge::overlay(
            &mut self.entries,
            Layer::from([(key.to_string(), value)]),
            ConfigSource::CommandLine,
        );
        Ok(self)
    }

    /// Snapshot the merged mapping and seal the resolver.
    ///
    /// Calling `build()` again without changes returns an equal snapshot.
    /// Further layers are refused until [`with_defaults`](Self::with_defaults)
    /// starts over.
    pub fn build(&mut self) -> ResolvedConfig {
        if !self.seeded {
            self.with_defaults();
        }
        self.sealed = true;
        ResolvedConfig::new(self.entries.clone())
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    fn prepare(&mut self) -> Result<(), LayerfigError> {
        if self.sealed {
            return Err(LayerfigError::Sealed);
        }
        if !self.seeded {
            self.with_defaults();
        }
        Ok(())
    }
}
