// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::slicing::{apply_slicing, SliceSpec};
use super::resolve;
use crate::db::ProjectDatabase;
use crate::options::OptionTable;
use crate::rcfile::parser::parse_str;
use std::path::Path;

fn load_db(yaml: &str) -> ProjectDatabase {
    let dir = tempfile::tempdir().unwrap();
    let manifest = dir.path().join("dependency-data.yml");
    std::fs::write(&manifest, yaml).unwrap();
    ProjectDatabase::load(&manifest).unwrap()
}

#[test]
fn resolves_bare_project_nodes_with_no_selectors() {
    let rc = parse_str("project kcalc:\n  tag: v24.08.0\nproject ark:\n  branch: master\n", Path::new(".")).unwrap();
    let mut options = OptionTable::new();

    let (plan, _mask) = resolve(&rc, None, &mut options, &[], &[], "stable").unwrap();
    let names: Vec<&str> = plan.projects().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["kcalc", "ark"]);
}

#[test]
fn expands_kde_projects_group_via_database() {
    let db = load_db(
        r#"
- path: kde/kdeutils/kcalc
  repo: https://example.org/kcalc.git
- path: kde/kdeutils/kcharselect
  repo: https://example.org/kcharselect.git
"#,
    );
    let rc = parse_str(
        "group kdeutils:\n  repository: kde-projects\n  use-projects:\n    - kde/kdeutils\n",
        Path::new("."),
    )
    .unwrap();
    let mut options = OptionTable::new();

    let (plan, _mask) = resolve(&rc, Some(&db), &mut options, &[], &[], "stable").unwrap();
    let mut names: Vec<&str> = plan.projects().iter().map(|p| p.name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["kde/kdeutils/kcalc", "kde/kdeutils/kcharselect"]);
}

#[test]
fn orders_by_dependency_then_file_order() {
    let db = load_db(
        r#"
- path: a
  repo: https://example.org/a.git
  dependencies: [c]
- path: b
  repo: https://example.org/b.git
- path: c
  repo: https://example.org/c.git
"#,
    );
    let rc = parse_str("project a:\nproject b:\nproject c:\n", Path::new(".")).unwrap();
    let mut options = OptionTable::new();

    let (plan, _mask) = resolve(&rc, Some(&db), &mut options, &[], &[], "stable").unwrap();
    let names: Vec<&str> = plan.projects().iter().map(|p| p.name.as_str()).collect();
    let pos_a = names.iter().position(|n| *n == "a").unwrap();
    let pos_c = names.iter().position(|n| *n == "c").unwrap();
    assert!(pos_c < pos_a, "dependency c must build before dependent a");
}

#[test]
fn detects_dependency_cycles() {
    let db = load_db(
        r#"
- path: a
  repo: https://example.org/a.git
  dependencies: [b]
- path: b
  repo: https://example.org/b.git
  dependencies: [a]
"#,
    );
    let rc = parse_str("project a:\nproject b:\n", Path::new(".")).unwrap();
    let mut options = OptionTable::new();

    let err = resolve(&rc, Some(&db), &mut options, &[], &[], "stable").unwrap_err();
    assert!(err.to_string().contains("cycle"));
}

#[test]
fn global_ignore_projects_removes_matching_candidates() {
    let rc = parse_str(
        "global:\n  ignore-projects: kcharselect\nproject kcalc:\nproject kcharselect:\n",
        Path::new("."),
    )
    .unwrap();
    let mut options = OptionTable::new();
    if let Some(global) = rc.global() {
        for (name, value) in &global.options {
            options.set(&crate::options::Scope::Global, name, value.clone()).unwrap();
        }
    }

    let (plan, _mask) = resolve(&rc, None, &mut options, &[], &[], "stable").unwrap();
    let names: Vec<&str> = plan.projects().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["kcalc"]);
}

#[test]
fn unknown_selector_without_database_errors() {
    let rc = parse_str("project kcalc:\n", Path::new(".")).unwrap();
    let mut options = OptionTable::new();
    let err = resolve(&rc, None, &mut options, &["+nonexistent".to_string()], &[], "stable").unwrap_err();
    assert!(err.to_string().contains("unknown project"));
}

#[test]
fn slicing_resume_from_and_stop_before_bound_the_plan() {
    let rc = parse_str("project a:\nproject b:\nproject c:\nproject d:\n", Path::new(".")).unwrap();
    let mut options = OptionTable::new();
    let (plan, _mask) = resolve(&rc, None, &mut options, &[], &[], "stable").unwrap();

    let spec = SliceSpec {
        resume_from: Some("b".to_string()),
        stop_before: Some("d".to_string()),
        ..Default::default()
    };
    let sliced = apply_slicing(plan, &spec);
    let names: Vec<&str> = sliced.projects().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["b", "c"]);
}
