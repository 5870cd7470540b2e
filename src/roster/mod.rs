// pwml-rs: Project Wings Mod Loader - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Weapon roster: the set of weapons the game loads at startup.
//!
//! ```text
//! weapon.json ----------+
//! builtin_weapons.json -+--> Roster::declare() --(OR flags)--> Roster
//! Weapons.dat --parse---+                                         |
//!                                                     serialize   v
//!                                                            Weapons.dat
//!
//! Roster: BTreeMap<name, WeaponRole>
//!         one entry per name, byte-wise ascending
//! ```

pub mod codec;
pub mod declaration;

#[cfg(test)]
mod tests;

use bitflags::bitflags;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

bitflags! {
    /// How a weapon can be equipped.
    ///
    /// An empty role is valid: the weapon is known to the game but neither
    /// ships nor pilots can pick it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct WeaponRole: u8 {
        /// Mounted on a ship.
        const SHIP = 1 << 0;
        /// Carried by a pilot.
        const PILOT = 1 << 1;
    }
}

impl WeaponRole {
    /// Builds a role from the two boolean flags used on disk.
    #[must_use]
    pub fn from_flags(ship: bool, pilot: bool) -> Self {
        let mut role = Self::empty();
        role.set(Self::SHIP, ship);
        role.set(Self::PILOT, pilot);
        role
    }

    #[must_use]
    pub const fn is_ship(self) -> bool {
        self.contains(Self::SHIP)
    }

    #[must_use]
    pub const fn is_pilot(self) -> bool {
        self.contains(Self::PILOT)
    }
}

impl std::fmt::Display for WeaponRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.is_ship(), self.is_pilot()) {
            (true, true) => write!(f, "ship+pilot"),
            (true, false) => write!(f, "ship"),
            (false, true) => write!(f, "pilot"),
            (false, false) => write!(f, "none"),
        }
    }
}

/// A single weapon declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Weapon {
    name: String,
    role: WeaponRole,
}

impl Weapon {
    #[must_use]
    pub fn new(name: impl Into<String>, role: WeaponRole) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn role(&self) -> WeaponRole {
        self.role
    }

    #[must_use]
    pub const fn is_ship(&self) -> bool {
        self.role.is_ship()
    }

    #[must_use]
    pub const fn is_pilot(&self) -> bool {
        self.role.is_pilot()
    }
}

/// Accumulated weapon declarations, keyed by name.
///
/// Flags only ever grow: declaring a known weapon again ORs the new role
/// into the existing one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    entries: BTreeMap<String, WeaponRole>,
}

impl Roster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `name` with `role`, merging into an existing entry.
    ///
    /// Returns `true` if the name was not known before.
    pub fn declare(&mut self, name: &str, role: WeaponRole) -> bool {
        match self.entries.entry(name.to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(role);
                true
            }
            Entry::Occupied(mut slot) => {
                *slot.get_mut() |= role;
                false
            }
        }
    }

    /// Declares every weapon of `other`.
    pub fn extend(&mut self, other: &Self) {
        for (name, role) in &other.entries {
            self.declare(name, *role);
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<WeaponRole> {
        self.entries.get(name).copied()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forgets `name`, returning its role if it was known.
    pub fn remove(&mut self, name: &str) -> Option<WeaponRole> {
        self.entries.remove(name)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// All weapons in byte-wise name order.
    pub fn weapons(&self) -> impl Iterator<Item = Weapon> + '_ {
        self.entries
            .iter()
            .map(|(name, role)| Weapon::new(name.clone(), *role))
    }

    /// All names in byte-wise order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Names whose role contains `role`, in byte-wise order.
    pub fn names_with(&self, role: WeaponRole) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(move |(_, r)| r.contains(role))
            .map(|(name, _)| name.as_str())
    }
}

impl FromIterator<Weapon> for Roster {
    fn from_iter<I: IntoIterator<Item = Weapon>>(iter: I) -> Self {
        let mut roster = Self::new();
        for weapon in iter {
            roster.declare(weapon.name(), weapon.role());
        }
        roster
    }
}
