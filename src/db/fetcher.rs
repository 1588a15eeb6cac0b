// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Fetches and caches the metadata repository (§3, §4.2).
//!
//! The database is downloaded at most once per run, then cached for
//! subsequent runs by pulling in place rather than re-cloning.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{DbError, MobResult};
use crate::git::backend::{GitQuery, GixBackend};
use crate::git::cmd;

/// Manifest file name expected at the metadata repository's root.
pub const MANIFEST_FILE: &str = "dependency-data.yml";

/// Default local clone location for the metadata repository, honoring
/// `XDG_CACHE_HOME` with a `$HOME/.cache` fallback.
#[must_use]
pub fn default_cache_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("XDG_CACHE_HOME") {
        if !dir.is_empty() {
            return PathBuf::from(dir).join("mob-rs/projects-db");
        }
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".cache/mob-rs/projects-db")
}

/// Clones or updates the metadata repository at `cache_dir`, returning the
/// path to its dependency manifest.
///
/// # Errors
///
/// Returns a [`DbError::LoadFailed`] if the clone/pull fails.
pub fn sync(repo_url: &str, cache_dir: &Path) -> MobResult<PathBuf> {
    if GixBackend::is_git_repo(cache_dir) {
        info!(path = %cache_dir.display(), "updating project database");
        cmd::fetch(cache_dir, "origin").map_err(|e| DbError::LoadFailed {
            path: cache_dir.display().to_string(),
            message: e.to_string(),
        })?;
        cmd::merge_ff_only(cache_dir, "origin/HEAD").or_else(|_| {
            cmd::merge_ff_only(cache_dir, "origin/master")
        }).map_err(|e| DbError::LoadFailed {
            path: cache_dir.display().to_string(),
            message: e.to_string(),
        })?;
    } else {
        info!(url = repo_url, path = %cache_dir.display(), "cloning project database");
        if let Some(parent) = cache_dir.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DbError::LoadFailed {
                path: cache_dir.display().to_string(),
                message: e.to_string(),
            })?;
        }
        cmd::clone(repo_url, cache_dir, None, true).map_err(|e| DbError::LoadFailed {
            path: cache_dir.display().to_string(),
            message: e.to_string(),
        })?;
    }

    Ok(cache_dir.join(MANIFEST_FILE))
}
