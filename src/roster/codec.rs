// pwml-rs: Project Wings Mod Loader - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `Weapons.dat` text format.
//!
//! ```text
//! Weapons:          <- every known weapon
//!   bomb
//!   laser
//! Ship weapons:     <- WeaponRole::SHIP
//!   laser
//! Pilot weapons:    <- WeaponRole::PILOT
//!   bomb
//! ```
//!
//! Parsing is a three-state machine driven by the header lines; lines are
//! trimmed, blank lines ignored, and the last line counts even without a
//! terminating newline. Output is always the canonical form above.

use std::fmt::Write as _;
use std::path::Path;
use tracing::debug;

use super::{Roster, WeaponRole};
use crate::error::RosterError;
use crate::utility::encoding::read_legacy_text;
use crate::utility::fs::write::write_atomic;

const WEAPONS_HEADER: &str = "Weapons:";
const SHIP_HEADER: &str = "Ship weapons:";
const PILOT_HEADER: &str = "Pilot weapons:";

/// Section of the file the parser is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Weapons,
    Ship,
    Pilot,
}

impl Stage {
    fn from_header(line: &str) -> Option<Self> {
        match line {
            WEAPONS_HEADER => Some(Self::Weapons),
            SHIP_HEADER => Some(Self::Ship),
            PILOT_HEADER => Some(Self::Pilot),
            _ => None,
        }
    }

    const fn role(self) -> WeaponRole {
        match self {
            Self::Weapons => WeaponRole::empty(),
            Self::Ship => WeaponRole::SHIP,
            Self::Pilot => WeaponRole::PILOT,
        }
    }
}

/// Parses `Weapons.dat` text into a roster.
///
/// Accepts LF or CRLF line endings. Lines before any header belong to the
/// `Weapons:` section.
#[must_use]
pub fn parse(text: &str) -> Roster {
    let mut roster = Roster::new();
    let mut stage = Stage::Weapons;

    for line in text.split('\n').map(str::trim) {
        if line.is_empty() {
            continue;
        }
        if let Some(next) = Stage::from_header(line) {
            stage = next;
            continue;
        }
        roster.declare(line, stage.role());
    }

    roster
}

/// Renders a roster in canonical `Weapons.dat` form.
#[must_use]
pub fn serialize(roster: &Roster) -> String {
    let mut out = String::new();
    write_section(&mut out, WEAPONS_HEADER, roster.names());
    write_section(&mut out, SHIP_HEADER, roster.names_with(WeaponRole::SHIP));
    write_section(&mut out, PILOT_HEADER, roster.names_with(WeaponRole::PILOT));
    out
}

fn write_section<'a>(out: &mut String, header: &str, names: impl Iterator<Item = &'a str>) {
    out.push_str(header);
    out.push('\n');
    for name in names {
        // Infallible for String
        let _ = writeln!(out, "  {name}");
    }
}

/// Reads and parses a `Weapons.dat` file.
///
/// # Errors
///
/// Returns [`RosterError::Read`] if the file cannot be read; no partial
/// roster is produced.
pub fn read_weapons_dat(path: &Path) -> Result<Roster, RosterError> {
    let (text, encoding) = read_legacy_text(path).map_err(|source| RosterError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let roster = parse(&text);
    debug!(
        path = %path.display(),
        %encoding,
        weapons = roster.len(),
        "parsed weapon roster"
    );
    Ok(roster)
}

/// Serializes `roster` and writes it to `path` atomically.
///
/// # Errors
///
/// Returns [`RosterError::Write`] if the file cannot be written.
pub fn write_weapons_dat(path: &Path, roster: &Roster) -> Result<(), RosterError> {
    write_atomic(path, serialize(roster)).map_err(|source| RosterError::Write {
        path: path.display().to_string(),
        source,
    })?;
    debug!(path = %path.display(), weapons = roster.len(), "wrote weapon roster");
    Ok(())
}
