// pwml-rs: Project Wings Mod Loader - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments of the mod commands.

use clap::Args;

/// Arguments for the list command.
#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Only lists active mods.
    #[arg(short = 'a', long)]
    pub active: bool,
}

/// Arguments for the info command.
#[derive(Debug, Clone, Args)]
pub struct InfoArgs {
    /// Mod id.
    #[arg(value_name = "ID")]
    pub id: String,
}

/// Arguments for the enable and disable commands.
#[derive(Debug, Clone, Args)]
pub struct ToggleArgs {
    /// Mod ids or glob patterns (e.g. `weapons-*`).
    #[arg(value_name = "ID", required = true, num_args = 1..)]
    pub mods: Vec<String>,
}
