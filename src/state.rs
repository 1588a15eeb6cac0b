// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Persistent cross-run state (§3, §6): a single forward-compatible JSON
//! object living alongside the rc-file (or in the XDG state directory when
//! no rc-file was found in the current directory), written atomically by
//! the builder at the end of a run.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FsError, MobResult};

const FILE_NAME: &str = "mob-state.json";

/// Per-project bookkeeping the scheduler and build-system drivers consult
/// on the next run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectState {
    pub last_built_revision: Option<String>,
    pub last_cmake_options: Vec<String>,
    pub previously_failed: bool,
}

/// The full persistent-state document. `extra` preserves any keys this
/// binary doesn't know about so a rewrite never drops foreign data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistentState {
    #[serde(default)]
    pub last_run_timestamp: Option<String>,
    #[serde(default)]
    pub projects: BTreeMap<String, ProjectState>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl PersistentState {
    /// Locates the state file for an rc-file at `rc_path`, honoring the
    /// "alongside the rc-file if it was found in the current directory,
    /// otherwise XDG state" rule.
    #[must_use]
    pub fn locate(rc_path: Option<&Path>, found_in_cwd: bool) -> PathBuf {
        if let (Some(rc_path), true) = (rc_path, found_in_cwd) {
            if let Some(dir) = rc_path.parent() {
                return dir.join(FILE_NAME);
            }
        }
        xdg_state_dir().join(FILE_NAME)
    }

    /// Loads the state file at `path`, returning an empty (default) state
    /// if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an [`FsError`] if the file exists but cannot be read, or a
    /// parse error if its contents are not valid JSON.
    pub fn load(path: &Path) -> MobResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|e| FsError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(&text).map_err(|e| {
            FsError::IoError { path: path.display().to_string(), source: std::io::Error::other(e) }.into()
        })
    }

    /// Writes the state file at `path` atomically: serialize to a sibling
    /// temp file, then rename over the destination.
    ///
    /// # Errors
    ///
    /// Returns an [`FsError`] if the temp file cannot be written or the
    /// rename fails.
    pub fn save(&self, path: &Path) -> MobResult<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| FsError::IoError {
                path: dir.display().to_string(),
                source: e,
            })?;
        }
        let body = serde_json::to_string_pretty(self).map_err(|e| {
            FsError::IoError { path: path.display().to_string(), source: std::io::Error::other(e) }
        })?;

        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, body).map_err(|e| FsError::IoError {
            path: tmp_path.display().to_string(),
            source: e,
        })?;
        std::fs::rename(&tmp_path, path).map_err(|e| FsError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(())
    }

    #[must_use]
    pub fn project(&self, name: &str) -> ProjectState {
        self.projects.get(name).cloned().unwrap_or_default()
    }

    pub fn set_project(&mut self, name: &str, state: ProjectState) {
        self.projects.insert(name.to_string(), state);
    }
}

fn xdg_state_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("XDG_STATE_HOME") {
        if !dir.is_empty() {
            return PathBuf::from(dir).join("mob-rs");
        }
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".local/state/mob-rs")
}

#[cfg(test)]
mod tests;
