// pwml-rs: Project Wings Mod Loader - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for mod discovery, activation and the list output.

use pwml_rs::cmd::mods::format_mod_list;
use pwml_rs::config::Config;
use pwml_rs::error::ModError;
use pwml_rs::manager::ModManager;
use pwml_rs::registry::ModRegistry;
use std::path::Path;
use tempfile::TempDir;

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn game_with_mods() -> TempDir {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path();
    for (id, name) in [
        ("vanilla", "Vanilla"),
        ("expansion", "Expansion Pack"),
        ("weapons-heavy", "Heavy Weapons"),
        ("weapons-light", "Light Weapons"),
    ] {
        write(
            &root.join("mods").join(id).join("metadata.json"),
            &format!(r#"{{"name": "{name}", "short_description": "{name} for Wings 2", "author": "x"}}"#),
        );
    }
    std::fs::create_dir_all(root.join("mods/unfinished")).unwrap();
    write(&root.join("active_mods.json"), r#"{"active": ["vanilla"]}"#);
    temp
}

fn open(root: &Path) -> ModManager {
    let mut config = Config::default();
    config.game.dir = Some(root.to_path_buf());
    ModManager::open(&config).unwrap()
}

// =============================================================================
// Scan
// =============================================================================

#[test]
fn registry_skips_candidates_without_metadata() {
    let temp = game_with_mods();
    let registry = ModRegistry::scan(&temp.path().join("mods")).unwrap();

    assert_eq!(
        registry.list(),
        ["expansion", "vanilla", "weapons-heavy", "weapons-light"]
    );
    assert!(matches!(
        registry.problems(),
        [ModError::MissingMetadata { id }] if id == "unfinished"
    ));
}

#[test]
fn list_output_marks_active_mods() {
    let temp = game_with_mods();
    let manager = open(temp.path());

    assert_eq!(
        format_mod_list(&manager, false),
        [
            "  expansion     Expansion Pack",
            "* vanilla       Vanilla",
            "  weapons-heavy Heavy Weapons",
            "  weapons-light Light Weapons",
        ]
    );
    assert_eq!(format_mod_list(&manager, true), ["* vanilla Vanilla"]);
}

// =============================================================================
// Activation
// =============================================================================

#[test]
fn glob_patterns_toggle_several_mods() {
    let temp = game_with_mods();
    let mut manager = open(temp.path());

    let ids = manager
        .resolve(&["weapons-*".to_string(), "vanilla".to_string()])
        .unwrap();
    assert_eq!(ids, ["weapons-heavy", "weapons-light", "vanilla"]);

    for id in &ids {
        manager.set_active(id, true).unwrap();
    }
    manager.save_active_set().unwrap();

    let saved = std::fs::read_to_string(temp.path().join("active_mods.json")).unwrap();
    assert_eq!(
        saved,
        r#"{"active":["vanilla","weapons-heavy","weapons-light"]}"#
    );
}

#[test]
fn invalid_glob_is_an_error() {
    let temp = game_with_mods();
    let manager = open(temp.path());
    assert!(manager.resolve(&["weapons-[".to_string()]).is_err());
}

#[test]
fn activation_survives_reopen() {
    let temp = game_with_mods();
    {
        let mut manager = open(temp.path());
        manager.set_active("expansion", true).unwrap();
        manager.set_active("vanilla", false).unwrap();
        manager.save_active_set().unwrap();
    }

    let manager = open(temp.path());
    assert!(manager.is_active("expansion"));
    assert!(!manager.is_active("vanilla"));
    assert_eq!(manager.name("expansion"), Some("Expansion Pack"));
}
