// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   run (default), query, run-program
//! ```

pub mod query;
pub mod run;
pub mod run_program;

use std::path::{Path, PathBuf};

use crate::cli::global::GlobalOptions;
use crate::db::{self, ProjectDatabase};
use crate::error::{ConfigError, MobResult};
use crate::model::BuildPlan;
use crate::options::{OptionTable, Scope};
use crate::rcfile::{self, RcFile};
use crate::resolver::{self, slicing::SliceSpec};
use crate::state::PersistentState;

const RC_FILE_NAME: &str = "rc.yml";

/// Shared setup performed by every subcommand: locate and parse the
/// rc-file, build the option table from it plus command-line overlays,
/// sync/load the project database if configured, and resolve the plan.
pub(crate) struct ResolvedContext {
    pub rc: RcFile,
    pub options: OptionTable,
    pub db: Option<ProjectDatabase>,
    pub plan: BuildPlan,
    pub rc_path: Option<PathBuf>,
    pub found_in_cwd: bool,
}

/// Finds the rc-file, preferring one in the current directory, then
/// `$XDG_CONFIG_HOME/mob-rs/rc.yml`, then `$HOME/.config/mob-rs/rc.yml`.
fn locate_rc_file(explicit: Option<&Path>) -> Option<(PathBuf, bool)> {
    if let Some(path) = explicit {
        return Some((path.to_path_buf(), false));
    }

    let cwd_candidate = PathBuf::from(RC_FILE_NAME);
    if cwd_candidate.is_file() {
        return Some((cwd_candidate, true));
    }

    if let Ok(dir) = std::env::var("XDG_CONFIG_HOME") {
        if !dir.is_empty() {
            let candidate = PathBuf::from(dir).join("mob-rs").join(RC_FILE_NAME);
            if candidate.is_file() {
                return Some((candidate, false));
            }
        }
    }

    let home = std::env::var("HOME").ok()?;
    let candidate = PathBuf::from(home).join(".config/mob-rs").join(RC_FILE_NAME);
    candidate.is_file().then_some((candidate, false))
}

/// Applies `--set` (`KEY=VALUE`) and `--set-project-option-value`
/// (`PROJECT,KEY,VALUE`) overlays onto `options`, and translates the
/// `--src-only`/`--build-only`/`--install-only`/`--no-*` phase toggles and
/// `--refresh-build-first`/`--stop-on-failure` flags into sticky option
/// values (§4.1, §6).
///
/// `--pretend`/`--reconfigure`/`--refresh-build` are handled separately by
/// the caller: they have no entry in the known option catalog and are
/// threaded as explicit booleans through the scheduler instead.
fn apply_cli_overrides(options: &mut OptionTable, global: &GlobalOptions) -> MobResult<()> {
    options.set_sticky("branch-group", global.branch_group.clone())?;

    if global.stop_on_failure {
        options.set_sticky("stop-on-failure", "true")?;
    }
    if global.refresh_build_first {
        options.set_sticky("refresh-build-first", "true")?;
    }
    if global.include_dependencies {
        options.set_sticky("include-dependencies", "true")?;
    }
    if global.no_include_dependencies {
        options.set_sticky("include-dependencies", "false")?;
    }

    // `--src-only` has no catalog entry of its own; it is just shorthand
    // for suppressing the other two phases.
    if global.src_only {
        options.set_sticky("no-build", "true")?;
        options.set_sticky("no-install", "true")?;
    }
    if global.no_src {
        options.set_sticky("no-src", "true")?;
    }
    if global.no_build {
        options.set_sticky("no-build", "true")?;
    }
    if global.no_install {
        options.set_sticky("no-install", "true")?;
    }
    if global.build_only {
        options.set_sticky("build-only", "true")?;
    }
    if global.install_only {
        options.set_sticky("install-only", "true")?;
    }
    if global.uninstall {
        options.set_sticky("uninstall", "true")?;
    }

    for raw in &global.set {
        let Some((key, value)) = raw.split_once('=') else {
            return Err(ConfigError::InvalidValue {
                section: "command-line".to_string(),
                key: raw.clone(),
                message: "expected KEY=VALUE".to_string(),
            }
            .into());
        };
        options.set_sticky(key, value)?;
    }

    for raw in &global.set_project_option_value {
        let mut parts = raw.splitn(3, ',');
        let (Some(project), Some(key), Some(value)) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ConfigError::InvalidValue {
                section: "command-line".to_string(),
                key: raw.clone(),
                message: "expected PROJECT,KEY,VALUE".to_string(),
            }
            .into());
        };
        options.set(&Scope::Project(project.to_string()), key, value)?;
    }

    Ok(())
}

/// Syncs the project database metadata repository, honoring `--pretend`:
/// only the first-ever clone is performed in pretend mode, since pulling
/// an existing clone is itself a write.
fn load_database(options: &OptionTable, pretend: bool) -> MobResult<Option<ProjectDatabase>> {
    let Some(url) = options.get("", "repository") else {
        return Ok(None);
    };

    let cache_dir = db::fetcher::default_cache_dir();
    let manifest_path = cache_dir.join(db::fetcher::MANIFEST_FILE);
    let first_time = !manifest_path.exists();

    let manifest =
        if !pretend || first_time { db::fetcher::sync(&url, &cache_dir)? } else { manifest_path };

    Ok(Some(ProjectDatabase::load(&manifest)?))
}

/// Builds the plan-slicing parameters from the global options and
/// persistent state (`--resume`, `--rebuild-failures`, etc., §6).
fn slice_spec(global: &GlobalOptions, state: &PersistentState) -> SliceSpec {
    let mut spec = SliceSpec {
        resume_from: global.resume_from.clone(),
        resume_after: global.resume_after.clone(),
        stop_before: global.stop_before.clone(),
        stop_after: global.stop_after.clone(),
        rebuild_failures: None,
    };

    if global.rebuild_failures {
        spec.rebuild_failures = Some(
            state
                .projects
                .iter()
                .filter(|(_, s)| s.previously_failed)
                .map(|(name, _)| name.clone())
                .collect(),
        );
    }

    if (global.resume || global.resume_refresh_build_first) && spec.resume_from.is_none() {
        spec.resume_from = state.projects.iter().find(|(_, s)| s.previously_failed).map(|(name, _)| name.clone());
    }

    spec
}

/// Loads the rc-file, builds the option table, syncs the project database
/// if configured, and resolves `global.selectors` into an ordered plan.
pub(crate) fn load_context(global: &GlobalOptions) -> MobResult<ResolvedContext> {
    let located = locate_rc_file(global.rc_file.as_deref());
    let (rc_path, found_in_cwd) = match &located {
        Some((path, in_cwd)) => (Some(path.clone()), *in_cwd),
        None => (None, false),
    };

    let rc = match &rc_path {
        Some(path) => rcfile::parser::parse_file(path)?,
        None => RcFile::default(),
    };

    let mut options = OptionTable::new();
    apply_cli_overrides(&mut options, global)?;

    let db = load_database(&options, global.pretend)?;

    let (plan, mask) = resolver::resolve(
        &rc,
        db.as_ref(),
        &mut options,
        &global.selectors,
        &global.ignore_projects,
        &global.branch_group,
    )?;
    let _ = mask;

    Ok(ResolvedContext { rc, options, db, plan, rc_path, found_in_cwd })
}
