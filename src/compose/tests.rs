// pwml-rs: Project Wings Mod Loader - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{CompositionEngine, join_menu_music};
use crate::config::paths::{AssetFolder, GameLayout};
use crate::registry::Mod;
use crate::roster::WeaponRole;
use std::path::Path;
use tempfile::TempDir;

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn make_mod(game: &GameLayout, id: &str) -> Mod {
    let layout = game.mod_layout(id);
    write(
        &layout.metadata_file(),
        &format!(r#"{{"name": "{id}", "short_description": "{id}"}}"#),
    );
    Mod::load(layout).unwrap()
}

fn game_fixture() -> (TempDir, GameLayout) {
    let temp = tempfile::tempdir().unwrap();
    let game = GameLayout::new(temp.path());
    (temp, game)
}

#[test]
fn test_join_menu_music() {
    let join = |fragments: &[&str]| {
        String::from_utf8(join_menu_music(fragments.iter().map(|f| f.as_bytes()))).unwrap()
    };
    assert_eq!(join(&["A\n", "B"]), "A\nB");
    assert_eq!(join(&["A\r\n", "", "\n", "B\n\n"]), "A\nB");
    assert_eq!(join(&["one\ntwo\n", "three"]), "one\ntwo\nthree");
    assert_eq!(join(&[]), "");
}

#[test]
fn test_join_menu_music_keeps_legacy_bytes() {
    let joined = join_menu_music([b"caf\xe9.ogg\r\n".as_slice(), b"na\xefve.ogg".as_slice()]);
    assert_eq!(joined, b"caf\xe9.ogg\nna\xefve.ogg");
}

#[test]
fn test_apply_without_mods_leaves_empty_folders() {
    let (_temp, game) = game_fixture();
    write(&game.asset_dir(AssetFolder::Levels).join("old.lev"), "stale");
    write(&game.menu_music_file(), "stale");
    write(&game.graphics_manifest(), "<stale/>");

    let report = CompositionEngine::new(&game).apply(&[]);

    assert!(report.is_clean(), "{:?}", report.problems);
    for folder in AssetFolder::ALL {
        let entries: Vec<_> = std::fs::read_dir(game.asset_dir(folder))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        if folder == AssetFolder::Weapons {
            assert_eq!(entries, ["Weapons.dat"]);
        } else {
            assert!(entries.is_empty(), "{folder} not empty: {entries:?}");
        }
    }
    insta::assert_snapshot!(
        std::fs::read_to_string(game.weapons_dat()).unwrap(),
        @r"
    Weapons:
    Ship weapons:
    Pilot weapons:
    "
    );
}

#[test]
fn test_weapon_flags_are_or_combined_across_mods() {
    let (_temp, game) = game_fixture();
    let vanilla = game.mod_layout("vanilla");
    write(&vanilla.weapon_declaration("laser"), r#"{"ship": true, "pilot": false}"#);
    write(
        &vanilla.asset_dir(AssetFolder::Weapons).join("laser/laser.png"),
        "v",
    );
    let expansion = game.mod_layout("expansion");
    write(&expansion.weapon_declaration("laser"), r#"{"ship": false, "pilot": true}"#);
    write(
        &expansion.asset_dir(AssetFolder::Weapons).join("laser/laser.png"),
        "e",
    );
    let vanilla = make_mod(&game, "vanilla");
    let expansion = make_mod(&game, "expansion");

    let report = CompositionEngine::new(&game).apply(&[&vanilla, &expansion]);

    assert!(report.is_clean(), "{:?}", report.problems);
    assert_eq!(report.applied, ["vanilla", "expansion"]);
    assert_eq!(report.roster.len(), 1);
    assert_eq!(report.roster.get("laser"), Some(WeaponRole::SHIP | WeaponRole::PILOT));

    let live = game.asset_dir(AssetFolder::Weapons).join("laser");
    assert_eq!(std::fs::read_to_string(live.join("laser.png")).unwrap(), "e");
    assert!(!live.join("weapon.json").exists());
    insta::assert_snapshot!(
        std::fs::read_to_string(game.weapons_dat()).unwrap(),
        @r"
    Weapons:
      laser
    Ship weapons:
      laser
    Pilot weapons:
      laser
    "
    );
}

#[test]
fn test_weapon_folders_need_a_valid_declaration() {
    let (_temp, game) = game_fixture();
    let layout = game.mod_layout("pack");
    let weapons = layout.asset_dir(AssetFolder::Weapons);
    write(&weapons.join("undeclared/sprite.png"), "x");
    write(&weapons.join("broken/weapon.json"), r#"{"ship": "yes"}"#);
    write(&weapons.join("bomb/weapon.json"), r#"{"ship": false, "pilot": true}"#);
    write(
        &layout.builtin_weapons_file(),
        r#"{"weapons": [{"name": "fist", "ship": false, "pilot": true}]}"#,
    );
    let pack = make_mod(&game, "pack");

    let report = CompositionEngine::new(&game).apply(&[&pack]);

    assert_eq!(report.problems.len(), 1);
    assert_eq!(
        report.roster.names().collect::<Vec<_>>(),
        ["bomb", "fist"]
    );
    let live = game.asset_dir(AssetFolder::Weapons);
    assert!(live.join("bomb").is_dir());
    assert!(!live.join("undeclared").exists());
    assert!(!live.join("broken").exists());
    assert!(!live.join("builtin_weapons.json").exists());
}

#[test]
fn test_collected_files_are_rebuilt_not_copied() {
    let (_temp, game) = game_fixture();
    let a = game.mod_layout("a");
    write(&a.collected_file(AssetFolder::Music).unwrap(), "A\n");
    write(&a.asset_dir(AssetFolder::Music).join("a.ogg"), "a");
    write(
        &a.collected_file(AssetFolder::Graphics).unwrap(),
        r#"<graphics version="1"><sprite id="a"/></graphics>"#,
    );
    write(&a.asset_dir(AssetFolder::Objects).join("rock.obj"), "rock");
    let b = game.mod_layout("b");
    write(&b.collected_file(AssetFolder::Music).unwrap(), "B");
    write(
        &b.collected_file(AssetFolder::Graphics).unwrap(),
        r#"<other><sprite id="b"/></other>"#,
    );
    write(
        &b.collected_file(AssetFolder::Sound).unwrap(),
        "<sounds><sound id=\"boom\"/></sounds>",
    );
    let (a, b) = (make_mod(&game, "a"), make_mod(&game, "b"));

    let report = CompositionEngine::new(&game).apply(&[&a, &b]);

    assert!(report.is_clean(), "{:?}", report.problems);
    assert_eq!((report.menu_music, report.graphics, report.sounds), (2, 2, 1));
    assert_eq!(std::fs::read_to_string(game.menu_music_file()).unwrap(), "A\nB");
    assert!(game.asset_dir(AssetFolder::Music).join("a.ogg").is_file());
    assert!(game.asset_dir(AssetFolder::Objects).join("rock.obj").is_file());
    insta::assert_snapshot!(
        std::fs::read_to_string(game.graphics_manifest()).unwrap(),
        @r#"
    <?xml version="1.0" encoding="UTF-8"?>
    <graphics version="1">
      <sprite id="a"/>
      <sprite id="b"/>
    </graphics>
    "#
    );
    assert_eq!(
        std::fs::read_to_string(game.sounds_manifest()).unwrap(),
        "<sounds><sound id=\"boom\"/></sounds>"
    );
}

#[test]
fn test_menu_music_keeps_stock_encoding() {
    let (_temp, game) = game_fixture();
    let stock = game.mod_layout("vanilla").collected_file(AssetFolder::Music).unwrap();
    write(&stock, "");
    std::fs::write(&stock, b"th\xe8me.ogg\r\n").unwrap();
    let vanilla = make_mod(&game, "vanilla");

    let report = CompositionEngine::new(&game).apply(&[&vanilla]);

    assert!(report.is_clean(), "{:?}", report.problems);
    assert_eq!(std::fs::read(game.menu_music_file()).unwrap(), b"th\xe8me.ogg");
}

#[test]
fn test_malformed_manifest_is_reported() {
    let (_temp, game) = game_fixture();
    let a = game.mod_layout("a");
    write(&a.collected_file(AssetFolder::Sound).unwrap(), "<sounds><a/></sounds>");
    let b = game.mod_layout("b");
    write(&b.collected_file(AssetFolder::Sound).unwrap(), "<sounds><unclosed>");
    let (a, b) = (make_mod(&game, "a"), make_mod(&game, "b"));

    let report = CompositionEngine::new(&game).apply(&[&a, &b]);

    assert_eq!(report.problems.len(), 1);
    assert!(report.problems[0].to_string().contains("manifest"));
    assert!(game.weapons_dat().is_file());
}

#[test]
fn test_apply_is_idempotent() {
    let (_temp, game) = game_fixture();
    let layout = game.mod_layout("m");
    write(&layout.weapon_declaration("gun"), r#"{"ship": true, "pilot": true}"#);
    write(&layout.asset_dir(AssetFolder::Levels).join("l.lev"), "level");
    write(&layout.collected_file(AssetFolder::Music).unwrap(), "song\n");
    let m = make_mod(&game, "m");

    let mut engine = CompositionEngine::new(&game);
    let first = engine.apply(&[&m]);
    let weapons_dat = std::fs::read(game.weapons_dat()).unwrap();
    let music = std::fs::read(game.menu_music_file()).unwrap();

    let second = engine.apply(&[&m]);

    assert!(first.is_clean() && second.is_clean());
    assert_eq!(first.roster, second.roster);
    assert_eq!(std::fs::read(game.weapons_dat()).unwrap(), weapons_dat);
    assert_eq!(std::fs::read(game.menu_music_file()).unwrap(), music);
}
