// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The on-disk log tree (§3, §4.6): one directory per run under
//! `<log-root>/YYYY-MM-DD_NN/`, one subdirectory per project, a `latest`
//! symlink to the current run, and per-project `error.log` symlinks
//! pointing at the phase log that first recorded a fatal error.
//!
//! Teeing subprocess stdout/stderr into these files is out of scope here;
//! that stays on `tracing`'s own file appender (see `logging::init_logging`).

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::{FsError, MobResult};

const STATUS_LIST_FILE: &str = "status-list.log";
const LATEST_LINK: &str = "latest";
const ERROR_LOG: &str = "error.log";

/// Manages one run's directory under a log root.
pub struct LogTree {
    run_dir: PathBuf,
}

impl LogTree {
    /// Creates today's run directory under `log_root`, numbered `_01`,
    /// `_02`, ... for repeat runs on the same day, and repoints `latest`.
    ///
    /// # Errors
    ///
    /// Returns an [`FsError`] if the directory or symlink cannot be created.
    pub fn create(log_root: &Path) -> MobResult<Self> {
        fs::create_dir_all(log_root).map_err(|e| FsError::IoError {
            path: log_root.display().to_string(),
            source: e,
        })?;

        let date = Local::now().format("%Y-%m-%d").to_string();
        let mut n = 1u32;
        let run_dir = loop {
            let candidate = log_root.join(format!("{date}_{n:02}"));
            if !candidate.exists() {
                break candidate;
            }
            n += 1;
        };
        fs::create_dir_all(&run_dir).map_err(|e| FsError::IoError {
            path: run_dir.display().to_string(),
            source: e,
        })?;

        let tree = Self { run_dir };
        tree.update_latest_symlink(log_root)?;
        Ok(tree)
    }

    #[must_use]
    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }

    /// Creates (if absent) and returns a project's run subdirectory.
    ///
    /// # Errors
    ///
    /// Returns an [`FsError`] if the directory cannot be created.
    pub fn project_dir(&self, project: &str) -> MobResult<PathBuf> {
        let dir = self.run_dir.join(project);
        fs::create_dir_all(&dir).map_err(|e| FsError::IoError { path: dir.display().to_string(), source: e })?;
        Ok(dir)
    }

    /// Path a phase should log to, e.g. `git-update.log`, `cmake.log`,
    /// `build-1.log`, `install.log`.
    ///
    /// # Errors
    ///
    /// Returns an [`FsError`] if the project directory cannot be created.
    pub fn phase_log_path(&self, project: &str, phase_file: &str) -> MobResult<PathBuf> {
        Ok(self.project_dir(project)?.join(phase_file))
    }

    /// Points `<project-dir>/error.log` at the phase log file containing
    /// the first fatal error for that project.
    ///
    /// # Errors
    ///
    /// Returns an [`FsError`] if the symlink cannot be (re)created.
    pub fn mark_error(&self, project: &str, phase_log: &Path) -> MobResult<()> {
        let project_dir = self.project_dir(project)?;
        let link = project_dir.join(ERROR_LOG);
        replace_symlink(phase_log, &link)
    }

    /// Appends one line to the run's `status-list.log`, used to replay
    /// outcomes for `--install-only` (§6).
    ///
    /// # Errors
    ///
    /// Returns an [`FsError`] if the file cannot be opened or written.
    pub fn record_status(&self, project: &str, status: &str) -> MobResult<()> {
        let path = self.run_dir.join(STATUS_LIST_FILE);
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| FsError::IoError { path: path.display().to_string(), source: e })?;
        writeln!(file, "{project}\t{status}")
            .map_err(|e| FsError::IoError { path: path.display().to_string(), source: e })?;
        Ok(())
    }

    fn update_latest_symlink(&self, log_root: &Path) -> MobResult<()> {
        let link = log_root.join(LATEST_LINK);
        replace_symlink(&self.run_dir, &link)
    }
}

#[cfg(unix)]
fn replace_symlink(target: &Path, link: &Path) -> MobResult<()> {
    if link.exists() || link.symlink_metadata().is_ok() {
        fs::remove_file(link).map_err(|e| FsError::IoError { path: link.display().to_string(), source: e })?;
    }
    std::os::unix::fs::symlink(target, link)
        .map_err(|e| FsError::IoError { path: link.display().to_string(), source: e })?;
    Ok(())
}

#[cfg(windows)]
fn replace_symlink(target: &Path, link: &Path) -> MobResult<()> {
    if link.exists() || link.symlink_metadata().is_ok() {
        fs::remove_file(link).map_err(|e| FsError::IoError { path: link.display().to_string(), source: e })?;
    }
    if target.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
    .map_err(|e| FsError::IoError { path: link.display().to_string(), source: e })?;
    Ok(())
}

#[cfg(test)]
mod tests;
