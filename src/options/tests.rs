// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{OptionTable, Scope};

#[test]
fn rejects_unknown_option_names() {
    let mut table = OptionTable::new();
    let err = table.set(&Scope::Global, "not-a-real-option", "x");
    assert!(err.is_err());
}

#[test]
fn accepts_underscore_prefixed_user_variables() {
    let mut table = OptionTable::new();
    table.set(&Scope::Global, "_myvar", "hello").unwrap();
    assert_eq!(table.get("anything", "_myvar").as_deref(), Some("hello"));
}

#[test]
fn project_overrides_group_overrides_global() {
    let mut table = OptionTable::new();
    table.bind_project_group("kcalc", "kdeutils");
    table.set(&Scope::Global, "branch", "master").unwrap();
    assert_eq!(table.get("kcalc", "branch").as_deref(), Some("master"));

    table
        .set(&Scope::Group("kdeutils".to_string()), "branch", "release/24")
        .unwrap();
    assert_eq!(table.get("kcalc", "branch").as_deref(), Some("release/24"));

    table
        .set(&Scope::Project("kcalc".to_string()), "branch", "work/feature")
        .unwrap();
    assert_eq!(table.get("kcalc", "branch").as_deref(), Some("work/feature"));
}

#[test]
fn append_options_concatenate_global_and_project() {
    let mut table = OptionTable::new();
    table
        .set(&Scope::Global, "cmake-options", "-DFOO=1")
        .unwrap();
    table
        .set(&Scope::Project("kcalc".to_string()), "cmake-options", "-DBAR=2")
        .unwrap();
    assert_eq!(
        table.get("kcalc", "cmake-options").as_deref(),
        Some("-DFOO=1 -DBAR=2")
    );
}

#[test]
fn sticky_masks_file_derived_values() {
    let mut table = OptionTable::new();
    table.set(&Scope::Global, "branch", "master").unwrap();
    table.set_sticky("branch", "cli-override").unwrap();
    assert_eq!(table.get("kcalc", "branch").as_deref(), Some("cli-override"));
}

#[test]
fn expand_substitutes_and_detects_cycles() {
    let mut table = OptionTable::new();
    table.set(&Scope::Global, "branch", "master").unwrap();
    table
        .set(&Scope::Global, "source-dir", "/src/${branch}")
        .unwrap();
    assert_eq!(
        table.expand("kcalc", "${source-dir}").unwrap(),
        "/src/master"
    );

    table
        .set(&Scope::Global, "_a", "${_b}")
        .unwrap();
    table.set(&Scope::Global, "_b", "${_a}").unwrap();
    assert!(table.expand("kcalc", "${_a}").is_err());
}
