// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The resolver's output: an ordered build plan plus an ignore mask.

use super::project::Project;

/// An ordered sequence of fully-resolved projects (§3 "Build plan").
///
/// Order is the dependency-topological order the scheduler's builder must
/// respect (§4.2 "Ordering guarantees").
#[derive(Debug, Clone, Default)]
pub struct BuildPlan {
    projects: Vec<Project>,
}

impl BuildPlan {
    #[must_use]
    pub const fn new(projects: Vec<Project>) -> Self {
        Self { projects }
    }

    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn projects_mut(&mut self) -> &mut Vec<Project> {
        &mut self.projects
    }

    #[must_use]
    pub fn into_projects(self) -> Vec<Project> {
        self.projects
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

/// Patterns excluded from the plan by `ignore-projects` (§4.2 `ignore`).
///
/// A project is excluded if its full database path contains all of a
/// pattern's consecutive path components.
#[derive(Debug, Clone, Default)]
pub struct IgnoreMask {
    patterns: Vec<String>,
}

impl IgnoreMask {
    #[must_use]
    pub const fn new(patterns: Vec<String>) -> Self {
        Self { patterns }
    }

    pub fn extend(&mut self, more: impl IntoIterator<Item = String>) {
        self.patterns.extend(more);
    }

    /// Whether `full_path` (e.g. `kde/kdeutils/kcalc`) matches any ignore
    /// pattern, i.e. the pattern's components appear consecutively in it.
    #[must_use]
    pub fn matches(&self, full_path: &str) -> bool {
        let path_parts: Vec<&str> = full_path.split('/').collect();
        self.patterns.iter().any(|pattern| {
            let pattern_parts: Vec<&str> = pattern.split('/').collect();
            contains_consecutive(&path_parts, &pattern_parts)
        })
    }
}

fn contains_consecutive(haystack: &[&str], needle: &[&str]) -> bool {
    if needle.is_empty() {
        return false;
    }
    if needle.len() > haystack.len() {
        return false;
    }
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignore_mask_matches_consecutive_subpath() {
        let mask = IgnoreMask::new(vec!["kdeutils".to_string()]);
        assert!(mask.matches("kde/kdeutils/kcalc"));
        assert!(!mask.matches("kde/kdegraphics/libs"));
    }

    #[test]
    fn ignore_mask_matches_multi_component_pattern() {
        let mask = IgnoreMask::new(vec!["kdegraphics/libs".to_string()]);
        assert!(mask.matches("kde/kdegraphics/libs/kimageformats"));
        assert!(!mask.matches("kde/kdegraphics/other"));
    }
}
