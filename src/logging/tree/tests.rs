// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::LogTree;

#[test]
fn create_makes_a_dated_run_directory_and_latest_symlink() {
    let root = tempfile::tempdir().unwrap();
    let tree = LogTree::create(root.path()).unwrap();

    assert!(tree.run_dir().is_dir());
    let latest = root.path().join("latest");
    assert!(latest.symlink_metadata().is_ok());
    assert_eq!(fs_err_or_canonical(&latest), fs_err_or_canonical(tree.run_dir()));
}

#[test]
fn repeat_runs_on_the_same_day_get_incrementing_suffixes() {
    let root = tempfile::tempdir().unwrap();
    let first = LogTree::create(root.path()).unwrap();
    let second = LogTree::create(root.path()).unwrap();
    assert_ne!(first.run_dir(), second.run_dir());
}

#[test]
fn phase_log_path_creates_the_project_directory() {
    let root = tempfile::tempdir().unwrap();
    let tree = LogTree::create(root.path()).unwrap();
    let log = tree.phase_log_path("kcalc", "cmake.log").unwrap();
    assert_eq!(log.file_name().unwrap(), "cmake.log");
    assert!(log.parent().unwrap().is_dir());
}

#[test]
fn mark_error_points_error_log_at_the_failing_phase_log() {
    let root = tempfile::tempdir().unwrap();
    let tree = LogTree::create(root.path()).unwrap();
    let cmake_log = tree.phase_log_path("kcalc", "cmake.log").unwrap();
    std::fs::write(&cmake_log, "CMake Error").unwrap();

    tree.mark_error("kcalc", &cmake_log).unwrap();
    let error_link = tree.project_dir("kcalc").unwrap().join("error.log");
    assert_eq!(fs_err_or_canonical(&error_link), fs_err_or_canonical(&cmake_log));
}

#[test]
fn record_status_appends_one_line_per_call() {
    let root = tempfile::tempdir().unwrap();
    let tree = LogTree::create(root.path()).unwrap();
    tree.record_status("kcalc", "built").unwrap();
    tree.record_status("ark", "failed").unwrap();

    let text = std::fs::read_to_string(tree.run_dir().join("status-list.log")).unwrap();
    assert_eq!(text.lines().count(), 2);
    assert!(text.contains("kcalc\tbuilt"));
    assert!(text.contains("ark\tfailed"));
}

fn fs_err_or_canonical(path: &std::path::Path) -> std::path::PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
