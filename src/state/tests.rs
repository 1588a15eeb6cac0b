// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{PersistentState, ProjectState};

#[test]
fn load_missing_file_returns_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mob-state.json");
    let state = PersistentState::load(&path).unwrap();
    assert!(state.projects.is_empty());
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mob-state.json");

    let mut state = PersistentState::default();
    state.last_run_timestamp = Some("2026-07-26T00:00:00Z".to_string());
    state.set_project(
        "kcalc",
        ProjectState {
            last_built_revision: Some("abc123".to_string()),
            last_cmake_options: vec!["-DCMAKE_BUILD_TYPE=Release".to_string()],
            previously_failed: false,
        },
    );
    state.save(&path).unwrap();

    let reloaded = PersistentState::load(&path).unwrap();
    assert_eq!(reloaded.last_run_timestamp.as_deref(), Some("2026-07-26T00:00:00Z"));
    assert_eq!(reloaded.project("kcalc").last_built_revision.as_deref(), Some("abc123"));
}

#[test]
fn save_preserves_unknown_keys_across_rewrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mob-state.json");
    std::fs::write(&path, r#"{"futureKey": {"nested": true}}"#).unwrap();

    let mut state = PersistentState::load(&path).unwrap();
    state.last_run_timestamp = Some("now".to_string());
    state.save(&path).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("futureKey"));
}

#[test]
fn save_does_not_leave_a_temp_file_behind() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mob-state.json");
    PersistentState::default().save(&path).unwrap();
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn locate_prefers_rc_file_directory_when_found_in_cwd() {
    let dir = tempfile::tempdir().unwrap();
    let rc_path = dir.path().join("mobrc.yaml");
    let state_path = PersistentState::locate(Some(&rc_path), true);
    assert_eq!(state_path, dir.path().join("mob-state.json"));
}
