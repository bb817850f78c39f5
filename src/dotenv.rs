//! `.env` file cascade.
//!
//! Builds an environment view from dotenv files plus the real process
//! environment, without ever writing to the process environment. The result
//! is handed to [`ConfigResolver::with_environment`](crate::ConfigResolver::with_environment)
//! like any other injected environment.
//!
//! Precedence, lowest to highest:
//!
//! ```text
//! .env                  shared defaults, never beats the real environment
//! process environment
//! .env.{profile}        e.g. .env.development, .env.production
//! .env.local            machine-specific, never committed
//! ```
//!
//! When a profile is set it is also exposed as `ENVIRONMENT`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::LayerfigError;

/// Variable holding the active profile name in the produced view.
pub const PROFILE_VAR: &str = "ENVIRONMENT";

#[derive(Debug, Clone, PartialEq)]
pub struct EnvFiles {
    dir: PathBuf,
    profile: Option<String>,
}

impl EnvFiles {
    /// Look for dotenv files in `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            profile: None,
        }
    }

    /// Select the profile whose `.env.{name}` file is loaded.
    pub fn profile(mut self, name: &str) -> Self {
        self.profile = Some(name.to_string());
        self
    }

    /// Merge the dotenv files with `process` (usually `std::env::vars()`).
    ///
    /// Missing files are skipped. A malformed file fails the whole load.
    pub fn load(
        &self,
        process: impl IntoIterator<Item = (String, String)>,
    ) -> Result<BTreeMap<String, String>, LayerfigError> {
        let mut merged = BTreeMap::new();

        merged.extend(read_env_file(&self.dir.join(".env"))?);
        merged.extend(process);
        if let Some(profile) = &self.profile {
            merged.extend(read_env_file(&self.dir.join(format!(".env.{profile}")))?);
        }
        merged.extend(read_env_file(&self.dir.join(".env.local"))?);

        if let Some(profile) = &self.profile {
            merged.insert(PROFILE_VAR.to_string(), profile.clone());
        }
        Ok(merged)
    }
}

fn read_env_file(path: &Path) -> Result<Vec<(String, String)>, LayerfigError> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) if e.not_found() => {
            trace!(path = %path.display(), "dotenv file not found, skipping");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(LayerfigError::Dotenv {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let pairs = iter
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| LayerfigError::Dotenv {
            path: path.to_path_buf(),
            source: e,
        })?;
    debug!(path = %path.display(), vars = pairs.len(), "loaded dotenv file");
    Ok(pairs)
}
