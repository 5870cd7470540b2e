// pwml-rs: Project Wings Mod Loader - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-mod weapon declaration files.
//!
//! ```text
//! data/weapons/<name>/weapon.json     {"ship":true,"pilot":false}
//! data/weapons/builtin_weapons.json   {"weapons":[{"name":..,"ship":..,"pilot":..}]}
//! ```
//!
//! `weapon.json` marks a directory as a weapon and carries its flags; it is
//! metadata only and never installed. `builtin_weapons.json` lists weapons
//! that exist in the game without any bundled files.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{Roster, Weapon, WeaponRole};
use crate::error::ModError;
use crate::utility::fs::write::write_atomic;

/// Contents of a `weapon.json` sidecar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WeaponDeclaration {
    pub ship: bool,
    pub pilot: bool,
}

impl WeaponDeclaration {
    #[must_use]
    pub fn role(self) -> WeaponRole {
        WeaponRole::from_flags(self.ship, self.pilot)
    }

    /// Reads a declaration; both flags must be JSON booleans.
    ///
    /// # Errors
    ///
    /// Returns [`ModError::InvalidWeaponDeclaration`] if the file is
    /// unreadable or malformed.
    pub fn read(path: &Path) -> Result<Self, ModError> {
        read_json(path)
    }

    /// Writes the declaration as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ModError::InvalidWeaponDeclaration`] if the file cannot be
    /// written.
    pub fn write(self, path: &Path) -> Result<(), ModError> {
        write_json(path, &self, false)
    }
}

impl From<WeaponRole> for WeaponDeclaration {
    fn from(role: WeaponRole) -> Self {
        Self {
            ship: role.is_ship(),
            pilot: role.is_pilot(),
        }
    }
}

/// One entry of `builtin_weapons.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuiltinWeapon {
    pub name: String,
    pub ship: bool,
    pub pilot: bool,
}

impl From<BuiltinWeapon> for Weapon {
    fn from(entry: BuiltinWeapon) -> Self {
        Self::new(entry.name, WeaponRole::from_flags(entry.ship, entry.pilot))
    }
}

impl From<Weapon> for BuiltinWeapon {
    fn from(weapon: Weapon) -> Self {
        Self {
            ship: weapon.is_ship(),
            pilot: weapon.is_pilot(),
            name: weapon.name,
        }
    }
}

/// Contents of `builtin_weapons.json`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BuiltinWeapons {
    pub weapons: Vec<BuiltinWeapon>,
}

impl BuiltinWeapons {
    /// Index of every weapon in `roster`, in name order.
    #[must_use]
    pub fn from_roster(roster: &Roster) -> Self {
        Self {
            weapons: roster.weapons().map(BuiltinWeapon::from).collect(),
        }
    }

    /// Converts the index into a roster.
    #[must_use]
    pub fn into_roster(self) -> Roster {
        self.weapons.into_iter().map(Weapon::from).collect()
    }

    /// # Errors
    ///
    /// Returns [`ModError::InvalidWeaponDeclaration`] if the file is
    /// unreadable or malformed.
    pub fn read(path: &Path) -> Result<Self, ModError> {
        read_json(path)
    }

    /// Writes the index as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ModError::InvalidWeaponDeclaration`] if the file cannot be
    /// written.
    pub fn write(&self, path: &Path) -> Result<(), ModError> {
        write_json(path, self, true)
    }
}

fn invalid(path: &Path, message: impl std::fmt::Display) -> ModError {
    ModError::InvalidWeaponDeclaration {
        path: path.display().to_string(),
        message: message.to_string(),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ModError> {
    let content = std::fs::read_to_string(path).map_err(|e| invalid(path, e))?;
    serde_json::from_str(&content).map_err(|e| invalid(path, e))
}

fn write_json<T: Serialize>(path: &Path, value: &T, pretty: bool) -> Result<(), ModError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(|e| invalid(path, e))?;
    write_atomic(path, json).map_err(|e| invalid(path, e))
}
