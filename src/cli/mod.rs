// pwml-rs: Project Wings Mod Loader - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for pwml-rs using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! pwml [global options] <command>
//! version
//! options
//! list [--active]
//! info <id>
//! enable <id|glob>...
//! disable <id|glob>...
//! apply
//! ```

pub mod global;
pub mod mods;


use crate::cli::global::GlobalOptions;
use crate::cli::mods::{InfoArgs, ListArgs, ToggleArgs};
use clap::{Parser, Subcommand};

/// Project Wings Mod Loader - Rust Port
///
/// Composes mods into a Wings 2 installation.
#[derive(Debug, Parser)]
#[command(
    name = "pwml",
    author,
    version,
    about = "Project Wings Mod Loader",
    long_about = "pwml-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Composes the mods found under <game>/mods into the game's\n\
                  weapons, levels, objects, sound, music and graphics folders.\n\n\
                  Run `pwml -d path/to/wings enable my-mod` followed by\n\
                  `pwml -d path/to/wings apply`. See `pwml <command> --help`\n\
                  for more information about a command.",
    after_help = "CONFIG FILES:\n\n\
                  pwml reads `pwml.toml` from the current directory if present.\n\
                  Additional files can be given with --config, later files\n\
                  override earlier ones. PWML_<SECTION>__<KEY> environment\n\
                  variables and --set override every file.\n\n\
                  On first run, the stock game is copied into the mod named by\n\
                  `game.vanilla` and that mod is activated."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their effective values.
    Options,

    /// Lists installed mods.
    List(ListArgs),

    /// Shows the name and descriptions of a mod.
    Info(InfoArgs),

    /// Activates mods.
    Enable(ToggleArgs),

    /// Deactivates mods.
    Disable(ToggleArgs),

    /// Rebuilds the game folders from the active mods.
    Apply,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
