// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! A named collection of projects (§3 "Group").

/// A group node from the rc-file. Expands into zero or more [`super::Project`]s
/// via its `use_projects` patterns; shared options are copied into each
/// expanded project by the resolver and may be overridden by a matching
/// `override` node.
#[derive(Debug, Clone, Default)]
pub struct Group {
    pub name: String,
    /// Selector patterns (exact name, path suffix, or `parent/*`) naming
    /// this group's members, resolved against the project database.
    pub use_projects: Vec<String>,
    /// `repository: kde-projects` or similar hint telling the resolver to
    /// query the project database instead of expecting explicit projects.
    pub repository_hint: Option<String>,
    /// Project names to drop from this group's expansion (group-scoped
    /// `ignore-projects`).
    pub ignore_projects: Vec<String>,
}
