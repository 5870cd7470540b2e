// pwml-rs: Project Wings Mod Loader - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |        list / info / enable / apply
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |  config       manager     |
//!              |  TOML layers  ModManager  |
//!              '-------------+-------------'
//!                            |
//!          +-----------------+-----------------+
//!          v                 v                 v
//!      bootstrap          registry          compose
//!    vanilla snapshot   mods, active set   wipe/layer/flush
//!          |                                   |
//!          +-----------------+-----------------+
//!                            v
//!                  roster          manifest
//!               Weapons.dat      XML merge
//!
//!   +-----------------------------------------+
//!   |  foundation   error, logging, utility   |
//!   +-----------------------------------------+
//! ```

pub mod bootstrap;
pub mod cli;
pub mod cmd;
pub mod compose;
pub mod config;
pub mod error;
pub mod logging;
pub mod manager;
pub mod manifest;
pub mod registry;
pub mod roster;
pub mod utility;
