// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::ProjectDatabase;

fn sample_db() -> ProjectDatabase {
    let yaml = r#"
- path: kde/kdeutils/kcalc
  repo: https://example.org/kcalc.git
  branches:
    stable: release/24.08
    "*": master
  dependencies:
    - kde/frameworks/kconfig
- path: kde/kdeutils/kcharselect
  repo: https://example.org/kcharselect.git
  dependencies:
    - kde/frameworks/kconfig
- path: kde/frameworks/kconfig
  repo: https://example.org/kconfig.git
"#;
    let dir = tempfile::tempdir().unwrap();
    let manifest = dir.path().join("dependency-data.yml");
    std::fs::write(&manifest, yaml).unwrap();
    ProjectDatabase::load(&manifest).unwrap()
}

#[test]
fn lookup_matches_full_path_and_bare_name() {
    let db = sample_db();
    assert!(db.lookup("kde/kdeutils/kcalc").is_some());
    assert!(db.lookup("kcalc").is_some());
    assert!(db.lookup("nonexistent").is_none());
}

#[test]
fn expand_exact_project_returns_single_path() {
    let db = sample_db();
    let paths = db.expand("kcalc").unwrap();
    assert_eq!(paths, vec!["kde/kdeutils/kcalc"]);
}

#[test]
fn expand_hierarchy_returns_all_descendants() {
    let db = sample_db();
    let mut paths = db.expand("kde/kdeutils").unwrap();
    paths.sort();
    assert_eq!(
        paths,
        vec!["kde/kdeutils/kcalc", "kde/kdeutils/kcharselect"]
    );
}

#[test]
fn expand_trailing_star_matches_bare_suffix_form() {
    let db = sample_db();
    let mut star = db.expand("kde/kdeutils/*").unwrap();
    let mut bare = db.expand("kde/kdeutils").unwrap();
    star.sort();
    bare.sort();
    assert_eq!(star, bare);
}

#[test]
fn expand_unknown_pattern_errors() {
    let db = sample_db();
    assert!(db.expand("does/not/exist").is_err());
}

#[test]
fn dependencies_returns_direct_deps_only() {
    let db = sample_db();
    let deps = db.dependencies("kcalc", "stable").unwrap();
    assert_eq!(deps, vec!["kde/frameworks/kconfig"]);
}

#[test]
fn resolve_branch_prefers_group_then_wildcard() {
    let db = sample_db();
    assert_eq!(db.resolve_branch("kcalc", "stable").unwrap(), "release/24.08");
    assert_eq!(db.resolve_branch("kcalc", "unstable").unwrap(), "master");
    assert_eq!(db.resolve_branch("kcharselect", "stable").unwrap(), "master");
}
