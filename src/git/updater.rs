// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The git source-control plug-in driven by the updater phase.
//!
//! ```text
//! update(request)
//!   no source dir  --> clone(target_ref) --> UpdateOk
//!   source dir, held work branch --> UpdateSkipped
//!   source dir, otherwise --> fetch --> ff-or-merge(target_ref)
//!                                         |-- ok     --> UpdateOk{files_changed}
//!                                         '-- diverged --> UpdateFailed(NonFastForward)
//! ```
//!
//! This module knows nothing about the project database or option table;
//! callers resolve those into an [`UpdateRequest`] before invoking [`update`].

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::backend::{GitMutation, GitQuery, GixBackend, ShellBackend};
use super::cmd;
use crate::error::{GitError, Result};

/// The ref a project should be brought to, in descending priority order
/// per §4.4: `revision` wins over `tag` wins over `branch` wins over the
/// project database's default branch for the active branch-group.
#[derive(Debug, Clone)]
pub enum TargetRef {
    /// A specific commit-ish (SHA, or any rev-parse-able expression).
    Revision(String),
    /// A tag name.
    Tag(String),
    /// A branch name.
    Branch(String),
}

impl TargetRef {
    const fn as_str(&self) -> &str {
        match self {
            Self::Revision(s) | Self::Tag(s) | Self::Branch(s) => s.as_str(),
        }
    }

    /// Whether this ref names a branch that can be fast-forwarded directly
    /// by resetting to `origin/<branch>`, as opposed to a tag or raw
    /// revision which must be merged onto.
    const fn is_remote_branch(&self) -> bool {
        matches!(self, Self::Branch(_))
    }
}

/// Everything the git plug-in needs to update one project, already resolved
/// by the caller (option table + project database, not this module's job).
#[derive(Debug, Clone)]
pub struct UpdateRequest {
    pub project_name: String,
    pub source_dir: PathBuf,
    pub repository_url: String,
    pub target: TargetRef,
    pub git_user: Option<(String, String)>,
    pub hold_work_branches: bool,
    pub disable_agent_check: bool,
    pub pretend: bool,
}

/// Outcome of updating a single project, mirrors the scheduler bus's
/// terminal update messages (§4.3).
#[derive(Debug, Clone)]
pub enum UpdateOutcome {
    Ok {
        revision: String,
        files_changed: usize,
    },
    Skipped {
        reason: String,
    },
    Failed {
        error_kind: UpdateErrorKind,
        error_text: String,
    },
}

/// Failure taxonomy per §4.4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateErrorKind {
    NetworkError,
    AuthError,
    NonFastForwardError,
    ConflictError,
    UnknownRefError,
    FilesystemError,
}

/// Runs the update algorithm for one project.
///
/// # Errors
///
/// Returns an error only for conditions the scheduler should treat as fatal
/// (e.g. the source directory's parent cannot be created). Ordinary git
/// failures are reported as `UpdateOutcome::Failed`, not `Err`.
pub fn update(request: &UpdateRequest) -> Result<UpdateOutcome> {
    if request.source_dir.exists() {
        update_existing(request)
    } else {
        clone_fresh(request)
    }
}

fn clone_fresh(request: &UpdateRequest) -> Result<UpdateOutcome> {
    check_ssh_agent(request);

    if request.pretend {
        debug!(project = %request.project_name, url = %request.repository_url, "pretend: would clone");
        return Ok(UpdateOutcome::Ok {
            revision: "pretend".to_string(),
            files_changed: 0,
        });
    }

    if let Some(parent) = request.source_dir.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let branch = matches!(request.target, TargetRef::Branch(_)).then(|| request.target.as_str());

    if let Err(e) = cmd::clone(&request.repository_url, &request.source_dir, branch, false) {
        return Ok(UpdateOutcome::Failed {
            error_kind: classify_shell_error(&e.to_string()),
            error_text: e.to_string(),
        });
    }

    if let Some((name, email)) = &request.git_user {
        let _ = cmd::set_config(&request.source_dir, "user.name", name);
        let _ = cmd::set_config(&request.source_dir, "user.email", email);
    }

    match &request.target {
        TargetRef::Revision(rev) | TargetRef::Tag(rev) => {
            if let Err(e) = cmd::checkout(&request.source_dir, rev) {
                return Ok(UpdateOutcome::Failed {
                    error_kind: UpdateErrorKind::UnknownRefError,
                    error_text: e.to_string(),
                });
            }
        }
        TargetRef::Branch(_) => {}
    }

    let revision = cmd::rev_parse_head(&request.source_dir).unwrap_or_default();
    Ok(UpdateOutcome::Ok {
        revision,
        files_changed: 0,
    })
}

fn update_existing(request: &UpdateRequest) -> Result<UpdateOutcome> {
    if request.hold_work_branches
        && let Ok(Some(branch)) = GixBackend::current_branch(&request.source_dir)
        && (branch.starts_with("work/") || branch.starts_with("mr/"))
    {
        return Ok(UpdateOutcome::Skipped {
            reason: "held work branch".to_string(),
        });
    }

    check_ssh_agent(request);

    if request.pretend {
        debug!(project = %request.project_name, "pretend: would fetch and fast-forward");
        return Ok(UpdateOutcome::Ok {
            revision: "pretend".to_string(),
            files_changed: 0,
        });
    }

    let previous_head = cmd::rev_parse_head(&request.source_dir).unwrap_or_default();

    if let Err(e) = cmd::fetch(&request.source_dir, "origin") {
        return Ok(UpdateOutcome::Failed {
            error_kind: classify_shell_error(&e.to_string()),
            error_text: e.to_string(),
        });
    }

    let ff_target = if request.target.is_remote_branch() {
        format!("origin/{}", request.target.as_str())
    } else {
        request.target.as_str().to_string()
    };

    let merge_result = cmd::merge_ff_only(&request.source_dir, &ff_target);
    if let Err(e) = merge_result {
        if !GixBackend::has_uncommitted_changes(&request.source_dir).unwrap_or(false)
            && request.target.is_remote_branch()
        {
            // Not a true divergence (e.g. a rebase upstream); a hard reset
            // to the remote tip is the established fallback for branches.
            if let Err(reset_err) = cmd::reset_hard(&request.source_dir, &ff_target) {
                return Ok(UpdateOutcome::Failed {
                    error_kind: UpdateErrorKind::NonFastForwardError,
                    error_text: reset_err.to_string(),
                });
            }
        } else {
            return Ok(UpdateOutcome::Failed {
                error_kind: UpdateErrorKind::NonFastForwardError,
                error_text: e.to_string(),
            });
        }
    }

    let new_head = cmd::rev_parse_head(&request.source_dir).unwrap_or_default();
    let files_changed = count_changed_files(&request.source_dir, &previous_head, &new_head);

    Ok(UpdateOutcome::Ok {
        revision: new_head,
        files_changed,
    })
}

/// Counts files touched between two revisions via `git diff --name-only`.
/// Best-effort: returns 0 if either revision is empty or the diff fails.
fn count_changed_files(repo_path: &Path, from: &str, to: &str) -> usize {
    if from.is_empty() || to.is_empty() || from == to {
        return 0;
    }
    ShellBackend::git_command(&["diff", "--name-only", from, to], repo_path)
        .map(|out| out.lines().filter(|l| !l.trim().is_empty()).count())
        .unwrap_or(0)
}

/// Warns once if the repository URL uses an SSH transport and no SSH agent
/// appears to be running, per §4.4's agent check.
fn check_ssh_agent(request: &UpdateRequest) {
    if request.disable_agent_check {
        return;
    }
    let is_ssh = request.repository_url.starts_with("git+ssh://")
        || request.repository_url.starts_with("ssh://")
        || (request.repository_url.contains('@') && request.repository_url.contains(':'));
    if is_ssh && std::env::var_os("SSH_AGENT_PID").is_none() {
        warn!(
            project = %request.project_name,
            "no SSH agent detected (SSH_AGENT_PID unset); authentication may fail"
        );
    }
}

/// Maps a shell-backend error message onto the §4.4 failure taxonomy.
/// Shell git does not give structured errors, so this is a best-effort
/// text classification, consistent with the stderr idioms of stock git.
fn classify_shell_error(message: &str) -> UpdateErrorKind {
    let lower = message.to_ascii_lowercase();
    if lower.contains("could not resolve host")
        || lower.contains("connection timed out")
        || lower.contains("unable to access")
    {
        UpdateErrorKind::NetworkError
    } else if lower.contains("permission denied")
        || lower.contains("authentication failed")
        || lower.contains("could not read username")
    {
        UpdateErrorKind::AuthError
    } else if lower.contains("couldn't find remote ref") || lower.contains("not a valid ref") {
        UpdateErrorKind::UnknownRefError
    } else if lower.contains("conflict") {
        UpdateErrorKind::ConflictError
    } else if lower.contains("no such file or directory") {
        UpdateErrorKind::FilesystemError
    } else {
        UpdateErrorKind::NetworkError
    }
}

/// Converts an [`UpdateErrorKind`] to the boxed [`GitError`] variant used
/// when the scheduler decides a failure should become a fatal bail-out
/// (e.g. under `stop-on-failure` with no dependents to skip).
#[must_use]
pub fn to_git_error(project: &str, kind: UpdateErrorKind, message: &str) -> GitError {
    match kind {
        UpdateErrorKind::AuthError => GitError::AuthError {
            url: project.to_string(),
            message: message.to_string(),
        },
        UpdateErrorKind::NonFastForwardError => GitError::NonFastForwardError {
            path: project.to_string(),
            branch: message.to_string(),
        },
        _ => GitError::CommandFailed {
            command: format!("update {project}"),
            message: message.to_string(),
        },
    }
}
