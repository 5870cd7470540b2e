// pwml-rs: Project Wings Mod Loader - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::codec::{parse, read_weapons_dat, serialize, write_weapons_dat};
use super::declaration::{BuiltinWeapon, BuiltinWeapons, WeaponDeclaration};
use super::{Roster, Weapon, WeaponRole};
use crate::error::{ModError, RosterError};

const STOCK: &str = "Weapons:
  laser
  bomb
  minigun
Ship weapons:
  laser
  minigun
Pilot weapons:
  bomb
  minigun
";

#[test]
fn test_declare_ors_flags() {
    let mut roster = Roster::new();
    assert!(roster.declare("laser", WeaponRole::SHIP));
    assert!(!roster.declare("laser", WeaponRole::PILOT));
    assert!(!roster.declare("laser", WeaponRole::empty()));

    assert_eq!(roster.len(), 1);
    assert_eq!(roster.get("laser"), Some(WeaponRole::SHIP | WeaponRole::PILOT));
}

#[test]
fn test_role_from_flags_and_display() {
    assert_eq!(WeaponRole::from_flags(true, false), WeaponRole::SHIP);
    assert_eq!(WeaponRole::from_flags(false, true), WeaponRole::PILOT);
    assert_eq!(WeaponRole::from_flags(false, false), WeaponRole::empty());
    assert_eq!(WeaponRole::all().to_string(), "ship+pilot");
    assert_eq!(WeaponRole::empty().to_string(), "none");
}

#[test]
fn test_parse_stock_roster() {
    let roster = parse(STOCK);
    assert_eq!(roster.get("laser"), Some(WeaponRole::SHIP));
    assert_eq!(roster.get("bomb"), Some(WeaponRole::PILOT));
    assert_eq!(roster.get("minigun"), Some(WeaponRole::all()));
    assert_eq!(roster.len(), 3);
}

#[test]
fn test_parse_without_leading_header_or_final_newline() {
    let roster = parse("  plain\nShip weapons:\n  rocket");
    assert_eq!(roster.get("plain"), Some(WeaponRole::empty()));
    assert_eq!(roster.get("rocket"), Some(WeaponRole::SHIP));
}

#[test]
fn test_parse_crlf_and_blank_lines() {
    let roster = parse("Weapons:\r\n\r\n   \r\n  mine \r\nPilot weapons:\r\n\tmine\r\n");
    assert_eq!(roster.len(), 1);
    assert_eq!(roster.get("mine"), Some(WeaponRole::PILOT));
}

#[test]
fn test_parse_section_only_entry_is_created() {
    let roster = parse("Weapons:\nPilot weapons:\n  ghost\n");
    assert_eq!(roster.get("ghost"), Some(WeaponRole::PILOT));
    assert!(roster.names().eq(["ghost"]));
}

#[test]
fn test_parse_headers_need_exact_match() {
    let roster = parse("weapons:\nShip Weapons:\n");
    assert!(roster.contains("weapons:"));
    assert!(roster.contains("Ship Weapons:"));
}

#[test]
fn test_serialize_is_sorted_bytewise() {
    let mut roster = Roster::new();
    roster.declare("laser", WeaponRole::SHIP);
    roster.declare("Zap", WeaponRole::PILOT);
    roster.declare("las", WeaponRole::all());
    roster.declare("bomb", WeaponRole::empty());

    insta::assert_snapshot!(serialize(&roster), @r"
    Weapons:
      Zap
      bomb
      las
      laser
    Ship weapons:
      las
      laser
    Pilot weapons:
      Zap
      las
    ");
}

#[test]
fn test_serialize_empty_roster_is_headers_only() {
    assert_eq!(
        serialize(&Roster::new()),
        "Weapons:\nShip weapons:\nPilot weapons:\n"
    );
}

#[test]
fn test_parse_serialize_parse_is_stable() {
    let first = parse(STOCK);
    let text = serialize(&first);
    let second = parse(&text);
    assert_eq!(first, second);
    assert_eq!(serialize(&second), text);
}

#[test]
fn test_role_sections_are_subsets_of_weapons() {
    let roster = parse(STOCK);
    let all: Vec<&str> = roster.names().collect();
    for name in roster
        .names_with(WeaponRole::SHIP)
        .chain(roster.names_with(WeaponRole::PILOT))
    {
        assert!(all.contains(&name));
    }
}

#[test]
fn test_weapons_dat_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("weapons/Weapons.dat");

    write_weapons_dat(&path, &parse(STOCK)).unwrap();
    let roster = read_weapons_dat(&path).unwrap();

    assert_eq!(roster, parse(STOCK));
}

#[test]
fn test_read_weapons_dat_legacy_encoding() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Weapons.dat");
    std::fs::write(&path, b"Weapons:\r\n  l\xe4ser\r\nShip weapons:\r\n  l\xe4ser").unwrap();

    let roster = read_weapons_dat(&path).unwrap();
    assert_eq!(roster.get("läser"), Some(WeaponRole::SHIP));
}

#[test]
fn test_read_weapons_dat_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_weapons_dat(&dir.path().join("Weapons.dat")).unwrap_err();
    assert!(matches!(err, RosterError::Read { .. }));
}

#[test]
fn test_weapon_declaration_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("laser/weapon.json");

    WeaponDeclaration::from(WeaponRole::SHIP).write(&path).unwrap();
    insta::assert_snapshot!(
        std::fs::read_to_string(&path).unwrap(),
        @r#"{"ship":true,"pilot":false}"#
    );
    assert_eq!(
        WeaponDeclaration::read(&path).unwrap().role(),
        WeaponRole::SHIP
    );
}

#[test]
fn test_weapon_declaration_requires_boolean_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("weapon.json");

    std::fs::write(&path, r#"{"ship": true}"#).unwrap();
    assert!(matches!(
        WeaponDeclaration::read(&path),
        Err(ModError::InvalidWeaponDeclaration { .. })
    ));

    std::fs::write(&path, r#"{"ship": "yes", "pilot": false}"#).unwrap();
    assert!(WeaponDeclaration::read(&path).is_err());
}

#[test]
fn test_builtin_weapons_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("builtin_weapons.json");
    let roster: Roster = [
        Weapon::new("minigun", WeaponRole::all()),
        Weapon::new("bomb", WeaponRole::PILOT),
    ]
    .into_iter()
    .collect();

    let index = BuiltinWeapons::from_roster(&roster);
    assert_eq!(
        index.weapons[0],
        BuiltinWeapon {
            name: "bomb".to_string(),
            ship: false,
            pilot: true
        }
    );

    index.write(&path).unwrap();
    let back = BuiltinWeapons::read(&path).unwrap();
    assert_eq!(back.into_roster(), roster);
}
