// pwml-rs: Project Wings Mod Loader - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for pwml-rs.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, GameConfig, ApplyConfig
//! ```
//!
//! # Load Order
//!
//! ```text
//! LoadOrder: Id (default) | ActiveList
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::logging::LogLevel;

/// Order in which active mods are layered over each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadOrder {
    /// Ascending byte-wise mod id.
    #[default]
    Id,
    /// Order of ids in `active_mods.json`.
    ActiveList,
}

impl std::fmt::Display for LoadOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id => write!(f, "id"),
            Self::ActiveList => write!(f, "active-list"),
        }
    }
}

impl std::str::FromStr for LoadOrder {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "id" => Ok(Self::Id),
            "active-list" | "active_list" => Ok(Self::ActiveList),
            _ => Err(ConfigError::InvalidValue {
                section: "apply".to_string(),
                key: "order".to_string(),
                message: format!("expected 'id' or 'active-list', got '{s}'"),
            }),
        }
    }
}

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-5).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-5).
    pub file_log_level: LogLevel,
    /// Path to log file; no file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::Info,
            file_log_level: LogLevel::Trace,
            log_file: None,
        }
    }
}

/// Game installation options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Game working directory (default: current directory).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    /// Id of the baseline mod created on first run.
    pub vanilla: String,
    /// Snapshot the stock game into the baseline mod on first run.
    pub bootstrap: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            dir: None,
            vanilla: "vanilla".to_string(),
            bootstrap: true,
        }
    }
}

impl GameConfig {
    /// Resolves the working directory, falling back to the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no directory is configured and the current
    /// directory cannot be determined.
    pub fn resolve_dir(&self) -> std::io::Result<PathBuf> {
        match &self.dir {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir(),
        }
    }
}

/// Apply (composition) options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApplyConfig {
    /// Layering order of active mods.
    pub order: LoadOrder,
}
