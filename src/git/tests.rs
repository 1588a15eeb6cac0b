// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::git::cmd::{fetch_refspec, remote_branch_exists};
use crate::git::updater::{TargetRef, UpdateOutcome, UpdateRequest, update};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

/// Initialize a git repository with an initial commit (for tests needing branches).
/// Uses shell git for simplicity and to avoid coupling tests to gix internals.
/// Returns the name of the default branch (master or main depending on git config).
fn init_test_repo_with_commit(path: &Path) -> std::io::Result<String> {
    let output = Command::new("git")
        .args(["init", "--quiet"])
        .current_dir(path)
        .output()?;
    if !output.status.success() {
        return Err(std::io::Error::other(
            String::from_utf8_lossy(&output.stderr).to_string(),
        ));
    }

    Command::new("git")
        .args(["config", "user.email", "test@example.com"])
        .current_dir(path)
        .output()?;
    Command::new("git")
        .args(["config", "user.name", "Test"])
        .current_dir(path)
        .output()?;

    let output = Command::new("git")
        .args(["commit", "--allow-empty", "-m", "Initial commit", "--quiet"])
        .current_dir(path)
        .output()?;
    if !output.status.success() {
        return Err(std::io::Error::other(
            String::from_utf8_lossy(&output.stderr).to_string(),
        ));
    }

    let output = Command::new("git")
        .args(["branch", "--show-current"])
        .current_dir(path)
        .output()?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

#[test]
fn test_remote_branch_exists_with_invalid_url() {
    // Use a file:// URL pointing to a nonexistent path instead of an HTTPS URL.
    // This avoids real network access while still exercising the "inaccessible remote" path:
    // git ls-remote fails --> function returns Ok(false).
    let nonexistent = temp_dir();
    let invalid_path = nonexistent.path().join("does_not_exist");
    let invalid_url = format!("file://{}", invalid_path.display());

    let result = remote_branch_exists(&invalid_url, "main");
    assert!(
        result.is_ok(),
        "remote_branch_exists should not error on unreachable remotes, got: {result:?}"
    );
    assert!(
        !result.unwrap(),
        "should return false for inaccessible remote"
    );
}

#[test]
fn test_remote_branch_exists_with_local_repo() {
    let remote_repo = temp_dir();
    let branch =
        init_test_repo_with_commit(remote_repo.path()).expect("failed to init remote repo");
    let remote_url = format!("file://{}", remote_repo.path().display());

    let result = remote_branch_exists(&remote_url, &branch);
    assert!(result.is_ok());
    assert!(result.unwrap(), "{branch} branch should exist in local repo");

    let result = remote_branch_exists(&remote_url, "nonexistent-branch");
    assert!(result.is_ok());
    assert!(!result.unwrap(), "nonexistent branch should return false");
}

#[test]
fn test_fetch_refspec_invalid_remote() {
    let temp = temp_dir();
    let _ = init_test_repo_with_commit(temp.path()).expect("failed to init repo");

    let nonexistent = temp_dir();
    let invalid_path = nonexistent.path().join("does_not_exist");
    let invalid_url = format!("file://{}", invalid_path.display());

    let result = fetch_refspec(
        temp.path(),
        &invalid_url,
        "refs/heads/main:refs/remotes/origin/main",
    );

    assert!(
        result.is_err(),
        "fetch_refspec should fail with unreachable remote"
    );
}

#[test]
fn test_updater_clones_into_missing_source_dir() {
    let remote_repo = temp_dir();
    let branch =
        init_test_repo_with_commit(remote_repo.path()).expect("failed to init remote repo");
    let remote_url = format!("file://{}", remote_repo.path().display());

    let dest = temp_dir();
    let source_dir = dest.path().join("project");

    let request = UpdateRequest {
        project_name: "project".to_string(),
        source_dir: source_dir.clone(),
        repository_url: remote_url,
        target: TargetRef::Branch(branch),
        git_user: None,
        hold_work_branches: false,
        disable_agent_check: true,
        pretend: false,
    };

    let outcome = update(&request).expect("update should not error");
    assert!(matches!(outcome, UpdateOutcome::Ok { .. }));
    assert!(source_dir.join(".git").exists());
}

#[test]
fn test_updater_pretend_does_not_write() {
    let remote_repo = temp_dir();
    let branch =
        init_test_repo_with_commit(remote_repo.path()).expect("failed to init remote repo");
    let remote_url = format!("file://{}", remote_repo.path().display());

    let dest = temp_dir();
    let source_dir = dest.path().join("project");

    let request = UpdateRequest {
        project_name: "project".to_string(),
        source_dir: source_dir.clone(),
        repository_url: remote_url,
        target: TargetRef::Branch(branch),
        git_user: None,
        hold_work_branches: false,
        disable_agent_check: true,
        pretend: true,
    };

    let outcome = update(&request).expect("update should not error");
    assert!(matches!(outcome, UpdateOutcome::Ok { .. }));
    assert!(!source_dir.exists(), "pretend mode must not clone");
}

#[test]
fn test_updater_skips_held_work_branch() {
    let remote_repo = temp_dir();
    init_test_repo_with_commit(remote_repo.path()).expect("failed to init remote repo");
    let remote_url = format!("file://{}", remote_repo.path().display());

    let source_dir = temp_dir();
    Command::new("git")
        .args(["clone", "--quiet", &remote_url, "."])
        .current_dir(source_dir.path())
        .output()
        .expect("clone should succeed");
    Command::new("git")
        .args(["checkout", "-b", "work/my-feature"])
        .current_dir(source_dir.path())
        .output()
        .expect("checkout should succeed");

    let request = UpdateRequest {
        project_name: "project".to_string(),
        source_dir: source_dir.path().to_path_buf(),
        repository_url: remote_url,
        target: TargetRef::Branch("main".to_string()),
        git_user: None,
        hold_work_branches: true,
        disable_agent_check: true,
        pretend: false,
    };

    let outcome = update(&request).expect("update should not error");
    assert!(matches!(outcome, UpdateOutcome::Skipped { .. }));
}
