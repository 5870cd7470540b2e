// pwml-rs: Project Wings Mod Loader - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Layered configuration sources.
//!
//! ```text
//! ConfigLoader::new()
//!   .add_toml_file_optional("pwml.toml")   skipped when absent
//!   .add_toml_file(path)                   one per --config
//!   .with_env_prefix("PWML")               PWML_GAME__DIR=...
//!   .set_option("game/dir=...")            --set, --game-dir, log flags
//!   .build()  -->  Config (validated)
//! ```
//!
//! Later sources win; environment variables beat every file and explicit
//! options beat the environment.

use std::fmt;
use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File, FileFormat};

use super::Config;
use crate::error::Result;

/// A place settings were read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `pwml.toml` found in the working directory.
    Optional(PathBuf),
    /// A file named with `--config`.
    Required(PathBuf),
    /// TOML text handed over directly.
    Inline,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Optional(path) => write!(f, "[optional] {}", path.display()),
            Self::Required(path) => write!(f, "[file] {}", path.display()),
            Self::Inline => write!(f, "[inline]"),
        }
    }
}

/// Collects sources in priority order and builds a [`Config`].
pub struct ConfigLoader {
    builder: ConfigBuilder<DefaultState>,
    env_prefix: Option<String>,
    sources: Vec<ConfigSource>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            sources: Vec::new(),
        }
    }

    /// Adds a TOML file that must exist when [`Self::build`] runs.
    #[must_use]
    pub fn add_toml_file(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(true));
        self.sources.push(ConfigSource::Required(path.to_path_buf()));
        self
    }

    /// Adds a TOML file that is ignored when absent.
    #[must_use]
    pub fn add_toml_file_optional(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(false));
        if path.exists() {
            self.sources.push(ConfigSource::Optional(path.to_path_buf()));
        }
        self
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.sources.push(ConfigSource::Inline);
        self
    }

    /// Reads `<PREFIX>_<SECTION>__<KEY>` variables at build time.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Applies a `section/key=value` (or `section.key=value`) override.
    ///
    /// # Errors
    ///
    /// Returns an error if the option has no `=`, has an empty key, or names
    /// an unusable key.
    pub fn set_option(mut self, option: &str) -> Result<Self> {
        let Some((key, value)) = option
            .split_once('=')
            .map(|(k, v)| (k.trim(), v.trim()))
            .filter(|(k, _)| !k.is_empty())
        else {
            anyhow::bail!("invalid option '{option}', expected KEY=VALUE");
        };
        self.builder = self
            .builder
            .set_override(key.replace('/', "."), value)
            .map_err(|e| anyhow::anyhow!("invalid option '{option}': {e}"))?;
        Ok(self)
    }

    /// Files and strings added so far, in priority order.
    #[must_use]
    pub fn sources(&self) -> &[ConfigSource] {
        &self.sources
    }

    /// Merges every source, then deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error for a missing required file, invalid TOML, an
    /// unknown key, a mistyped value or a value that fails validation.
    pub fn build(self) -> Result<Config> {
        let builder = match &self.env_prefix {
            Some(prefix) => self.builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            ),
            None => self.builder,
        };
        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
