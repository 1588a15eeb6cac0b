// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! A single resolved project (§3 "Project").

use std::path::PathBuf;

/// Where a project's source code comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    /// An explicit repository URL given in the rc-file.
    Url(String),
    /// The special token meaning "resolve via the project database"
    /// (a `kde-projects`-style group member with no explicit repository).
    Database,
}

/// One phase of a project's lifecycle, a subset of which is active per
/// project depending on phase-toggle options (§4.1 "Phase toggles").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Update,
    Uninstall,
    BuildSystemSetup,
    Build,
    Install,
}

/// A fully-resolved project, as produced by the resolver and consumed by
/// the scheduler.
#[derive(Debug, Clone)]
pub struct Project {
    pub name: String,
    pub source: SourceSpec,
    pub group: Option<String>,
    /// Forced build-system plug-in name (e.g. `"cmake"`), or `None` to
    /// auto-detect from the source tree (§4.5).
    pub forced_build_system: Option<String>,
    pub phases: Vec<Phase>,
    pub source_dir: PathBuf,
    pub build_dir: PathBuf,
    pub install_dir: PathBuf,
    pub log_dir: PathBuf,
    /// Direct dependency names, from the project database plus any
    /// `include-dependencies` expansion performed by the resolver.
    pub dependencies: Vec<String>,
}

impl Project {
    #[must_use]
    pub fn has_phase(&self, phase: Phase) -> bool {
        self.phases.contains(&phase)
    }

    /// Removes `phase` from this project's phase list, used by the
    /// resolver to implement `hold-work-branches` (drop `Update`) and
    /// `no-src`/`no-build`/`no-install`/`build-only`/`install-only`.
    pub fn remove_phase(&mut self, phase: Phase) {
        self.phases.retain(|p| *p != phase);
    }
}

/// Computes the starting phase set for a project, before toggles are
/// applied (§4.1 "Phase computation").
#[must_use]
pub fn default_phases() -> Vec<Phase> {
    vec![Phase::Update, Phase::BuildSystemSetup, Phase::Build, Phase::Install]
}
