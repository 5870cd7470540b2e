// pwml-rs: Project Wings Mod Loader - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! JSON files owned by the registry.
//!
//! ```text
//! mods/<id>/metadata.json   {"name": "...", "short_description": "..."}
//! active_mods.json          {"active": ["vanilla", "expansion", ...]}
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ModError, Result};
use crate::utility::fs::write::write_atomic;

/// Display name and summary of the baseline mod.
pub const VANILLA_NAME: &str = "Vanilla";
pub const VANILLA_SHORT_DESCRIPTION: &str = "Base Wings 2 by Miika Virpioja et al.";

/// Contents of `metadata.json`.
///
/// Unknown fields are allowed so mod authors can carry extra data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModMetadata {
    pub name: String,
    pub short_description: String,
}

impl ModMetadata {
    /// Metadata of the synthetic baseline mod.
    #[must_use]
    pub fn vanilla() -> Self {
        Self {
            name: VANILLA_NAME.to_string(),
            short_description: VANILLA_SHORT_DESCRIPTION.to_string(),
        }
    }

    /// Reads the metadata of mod `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ModError::MissingMetadata`] if the file does not exist and
    /// [`ModError::InvalidMetadata`] if it is unreadable, not JSON, or lacks
    /// one of the string fields.
    pub fn read(path: &Path, id: &str) -> std::result::Result<Self, ModError> {
        let invalid = |message: String| ModError::InvalidMetadata {
            path: path.display().to_string(),
            message,
        };

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ModError::MissingMetadata { id: id.to_string() });
            }
            Err(e) => return Err(invalid(e.to_string())),
        };

        serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))
    }

    /// Writes compact JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string(self)?;
        write_atomic(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}

/// Ordered, duplicate-free list of active mod ids as persisted on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveSet {
    ids: Vec<String>,
}

impl ActiveSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `id` unless present. Returns whether it was added.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Removes `id`. Returns whether it was present.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|known| known != id);
        self.ids.len() != before
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|known| known == id)
    }

    /// Ids in list order.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Parses `{"active": [...]}`.
    ///
    /// Non-string entries are skipped and repeated ids keep their first
    /// position.
    ///
    /// # Errors
    ///
    /// Returns a message if the text is not JSON or has no `active` array.
    pub fn parse(text: &str) -> std::result::Result<Self, String> {
        let root: serde_json::Value = serde_json::from_str(text).map_err(|e| e.to_string())?;
        let entries = root
            .get("active")
            .and_then(serde_json::Value::as_array)
            .ok_or_else(|| "expected an object with an \"active\" array".to_string())?;

        Ok(entries
            .iter()
            .filter_map(serde_json::Value::as_str)
            .collect())
    }

    /// Loads the persisted list; a missing file is an empty set.
    ///
    /// # Errors
    ///
    /// Returns [`ModError::InvalidActiveSet`] if the file exists but is
    /// unreadable or malformed.
    pub fn load(path: &Path) -> std::result::Result<Self, ModError> {
        let invalid = |message: String| ModError::InvalidActiveSet {
            path: path.display().to_string(),
            message,
        };

        match std::fs::read_to_string(path) {
            Ok(text) => Self::parse(&text).map_err(invalid),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(invalid(e.to_string())),
        }
    }

    /// Renders compact `{"active": [...]}` JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::json!({ "active": self.ids }).to_string()
    }

    /// Writes the list atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        write_atomic(path, self.to_json())
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<S> for ActiveSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}
