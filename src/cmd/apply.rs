// pwml-rs: Project Wings Mod Loader - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Apply command implementation for pwml-rs.

use anyhow::bail;

use crate::compose::ApplyReport;
use crate::error::Result;
use crate::manager::ModManager;

/// One-line summary of an apply.
#[must_use]
pub fn format_summary(report: &ApplyReport) -> String {
    format!(
        "applied {} mod(s): {} weapon(s), {} file(s) copied, {} problem(s) in {:.2?}",
        report.applied.len(),
        report.roster.len(),
        report.copied.files,
        report.problems.len(),
        report.elapsed,
    )
}

/// Main handler for apply command.
///
/// # Errors
///
/// Returns an error if any problem was met during apply; the game folders
/// hold whatever could be built.
pub fn run_apply_command(manager: &ModManager) -> Result<()> {
    let report = manager.apply();

    println!("{}", format_summary(&report));
    for problem in &report.problems {
        eprintln!("  {problem}");
    }

    if !report.is_clean() {
        bail!("apply finished with {} problem(s)", report.problems.len());
    }
    Ok(())
}
