// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Row type for the project database (§3 "Project database").

use std::collections::BTreeMap;

use serde::Deserialize;

/// One entry in the metadata repository's dependency manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectDescriptor {
    /// Full logical path, e.g. `kde/kdeutils/kcalc`.
    pub path: String,
    /// Repository URL under a known protocol (`https://`, `git@...`, etc.).
    pub repo: String,
    /// Default branch per branch-group (`"stable"`, `"unstable"`, ...); a
    /// `"*"` entry is the fallback used when the requested group is absent.
    #[serde(default)]
    pub branches: BTreeMap<String, String>,
    /// Direct dependency paths.
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

const fn default_true() -> bool {
    true
}

impl ProjectDescriptor {
    /// The final path component, used as the project's short name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    #[must_use]
    pub fn branch_for(&self, branch_group: &str) -> Option<&str> {
        self.branches
            .get(branch_group)
            .or_else(|| self.branches.get("*"))
            .map(String::as_str)
    }
}
