// pwml-rs: Project Wings Mod Loader - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mod listing and activation commands.

use anyhow::bail;

use crate::cli::mods::{InfoArgs, ListArgs, ToggleArgs};
use crate::error::{ModError, Result};
use crate::manager::ModManager;

/// Renders one line per mod: active marker, id, display name.
///
/// ```text
/// * expansion  Expansion Pack
///   tournament Tournament Levels
/// * vanilla    Vanilla
/// ```
#[must_use]
pub fn format_mod_list(manager: &ModManager, active_only: bool) -> Vec<String> {
    let mods: Vec<_> = manager
        .registry()
        .iter()
        .filter(|m| !active_only || m.is_active())
        .collect();
    let width = mods.iter().map(|m| m.id().len()).max().unwrap_or(0);

    mods.into_iter()
        .map(|m| {
            let marker = if m.is_active() { '*' } else { ' ' };
            format!("{marker} {:<width$} {}", m.id(), m.name())
                .trim_end()
                .to_string()
        })
        .collect()
}

/// Main handler for list command.
pub fn run_list_command(args: &ListArgs, manager: &ModManager) {
    let lines = format_mod_list(manager, args.active);
    if lines.is_empty() {
        println!("No mods found");
    }
    for line in lines {
        println!("{line}");
    }
}

/// Prints name, short description and long description of one mod.
///
/// # Errors
///
/// Returns an error if no mod has the given id.
pub fn run_info_command(args: &InfoArgs, manager: &mut ModManager) -> Result<()> {
    let Some(entry) = manager.registry().get(&args.id) else {
        return Err(ModError::NotFound(args.id.clone()).into());
    };
    let state = if entry.is_active() { "active" } else { "inactive" };
    println!("{} ({state})", entry.name());
    println!("{}", entry.short_description());

    if let Some(description) = manager.description(&args.id) {
        println!();
        println!("{}", description.trim_end());
    }
    Ok(())
}

/// Activates or deactivates the matching mods and persists the active list.
///
/// # Errors
///
/// Returns an error if a pattern is invalid, nothing matched, or the active
/// list cannot be written.
pub fn run_toggle_command(args: &ToggleArgs, manager: &mut ModManager, active: bool) -> Result<()> {
    let ids = manager.resolve(&args.mods)?;
    if ids.is_empty() {
        bail!("no installed mod matches {}", args.mods.join(", "));
    }

    for id in &ids {
        manager.set_active(id, active)?;
    }
    manager.save_active_set()?;

    let verb = if active { "enabled" } else { "disabled" };
    for id in &ids {
        println!("{verb} {id}");
    }
    Ok(())
}
