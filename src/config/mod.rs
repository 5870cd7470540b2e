// pwml-rs: Project Wings Mod Loader - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for pwml-rs.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. pwml.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. PWML_* env vars
//! 5. CLI overrides (--set, --game-dir, log flags)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! PWML_GAME__DIR=/opt/wings            → game.dir = "/opt/wings"
//! PWML_GAME__BOOTSTRAP=false           → game.bootstrap = false
//! PWML_GLOBAL__OUTPUT_LOG_LEVEL=4      → global.output_log_level = 4
//! PWML_APPLY__ORDER=active-list        → apply.order = "active-list"
//! ```
//!
//! # Example
//!
//! ```toml
//! [game]
//! dir = "C:/Games/Wings2"
//! vanilla = "vanilla"
//!
//! [apply]
//! order = "active-list"
//! ```

pub mod loader;
pub mod paths;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, Result};

use types::{ApplyConfig, GameConfig, GlobalConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Game installation options.
    pub game: GameConfig,
    /// Apply options.
    pub apply: ApplyConfig,
}

impl Config {
    /// Validate values that serde cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` if the baseline mod id is empty
    /// or is not a plain directory name.
    pub fn validate(&self) -> Result<()> {
        let vanilla = &self.game.vanilla;
        let is_plain_name = !vanilla.is_empty()
            && vanilla != "."
            && vanilla != ".."
            && !vanilla.contains(['/', '\\']);
        if !is_plain_name {
            return Err(ConfigError::InvalidValue {
                section: "game".to_string(),
                key: "vanilla".to_string(),
                message: format!("'{vanilla}' is not a valid mod directory name"),
            }
            .into());
        }
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let fmt_path = |p: Option<&Path>| {
            p.map_or_else(|| "(none)".to_string(), |p| p.display().to_string())
        };

        let mut options = BTreeMap::new();
        options.insert(
            "global.output_log_level",
            self.global.output_log_level.to_string(),
        );
        options.insert(
            "global.file_log_level",
            self.global.file_log_level.to_string(),
        );
        options.insert("global.log_file", fmt_path(self.global.log_file.as_deref()));
        options.insert("game.dir", fmt_path(self.game.dir.as_deref()));
        options.insert("game.vanilla", self.game.vanilla.clone());
        options.insert("game.bootstrap", self.game.bootstrap.to_string());
        options.insert("apply.order", self.apply.order.to_string());

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
