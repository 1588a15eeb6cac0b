// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Step 8: `--resume`/`--stop-*`/`--rebuild-failures` slicing, applied to
//! an already-ordered [`crate::model::BuildPlan`].

use crate::model::{BuildPlan, Project};

/// Plan-slicing parameters drawn from the command line.
#[derive(Debug, Clone, Default)]
pub struct SliceSpec {
    pub resume_from: Option<String>,
    pub resume_after: Option<String>,
    pub stop_before: Option<String>,
    pub stop_after: Option<String>,
    /// Names previously marked failed in persistent state; used by
    /// `--rebuild-failures` to restrict the plan to just those (plus their
    /// dependents, already present in plan order).
    pub rebuild_failures: Option<Vec<String>>,
}

impl SliceSpec {
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.resume_from.is_none()
            && self.resume_after.is_none()
            && self.stop_before.is_none()
            && self.stop_after.is_none()
            && self.rebuild_failures.is_none()
    }
}

/// Applies `spec` to `plan`, returning the sliced subsequence in the same
/// relative order.
#[must_use]
pub fn apply_slicing(plan: BuildPlan, spec: &SliceSpec) -> BuildPlan {
    if spec.is_noop() {
        return plan;
    }

    let mut projects: Vec<Project> = plan.into_projects();

    if let Some(names) = &spec.rebuild_failures {
        projects.retain(|p| names.contains(&p.name));
    }

    if let Some(name) = &spec.resume_from {
        let start = projects.iter().position(|p| &p.name == name).unwrap_or(0);
        projects = projects.split_off(start);
    } else if let Some(name) = &spec.resume_after {
        let after = projects.iter().position(|p| &p.name == name).map_or(0, |i| i + 1);
        projects = projects.split_off(after.min(projects.len()));
    }

    if let Some(name) = &spec.stop_before {
        if let Some(end) = projects.iter().position(|p| &p.name == name) {
            projects.truncate(end);
        }
    } else if let Some(name) = &spec.stop_after {
        if let Some(end) = projects.iter().position(|p| &p.name == name) {
            projects.truncate(end + 1);
        }
    }

    BuildPlan::new(projects)
}
