// pwml-rs: Project Wings Mod Loader - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   config (options), mods (list, info, enable, disable), apply
//! ```

pub mod apply;
pub mod config;
pub mod mods;
