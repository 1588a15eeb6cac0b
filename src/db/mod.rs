// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The project database (§3, §4.2): a directed acyclic dependency graph
//! over project names, keyed by their logical hierarchy path.
//!
//! ```text
//! fetcher::sync(url, cache_dir) --> dependency-data.yml
//!                                         |
//!                                         v
//!                              ProjectDatabase::load()
//!                                         |
//!                    +--------------------+-------------------+
//!                    v                    v                    v
//!               lookup(name)        expand(pattern)     dependencies(name)
//! ```

pub mod fetcher;
pub mod types;

use std::path::Path;

use crate::error::{ConfigError, DbError, MobResult};
use types::ProjectDescriptor;

/// A loaded project database, queried by the resolver.
#[derive(Debug, Clone, Default)]
pub struct ProjectDatabase {
    entries: Vec<ProjectDescriptor>,
}

impl ProjectDatabase {
    /// Loads the database from a `dependency-data.yml` manifest.
    ///
    /// # Errors
    ///
    /// Returns a [`DbError::LoadFailed`] if the manifest cannot be read or parsed.
    pub fn load(manifest_path: &Path) -> MobResult<Self> {
        let text = std::fs::read_to_string(manifest_path).map_err(|e| DbError::LoadFailed {
            path: manifest_path.display().to_string(),
            message: e.to_string(),
        })?;
        let entries: Vec<ProjectDescriptor> =
            serde_yaml::from_str(&text).map_err(|e| ConfigError::ParseError {
                path: manifest_path.display().to_string(),
                message: e.to_string(),
            })?;
        Ok(Self { entries })
    }

    #[must_use]
    pub fn entries(&self) -> &[ProjectDescriptor] {
        &self.entries
    }

    /// Looks up a project by its full path or bare name. Prefers an exact
    /// full-path match, falling back to a unique bare-name match.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&ProjectDescriptor> {
        self.entries
            .iter()
            .find(|e| e.path == name)
            .or_else(|| self.entries.iter().find(|e| e.name() == name))
    }

    /// Expands a selector pattern per §4.2's grammar into the set of full
    /// project paths it names.
    ///
    /// # Errors
    ///
    /// Returns a [`DbError::UnknownProject`] if the pattern matches nothing.
    pub fn expand(&self, pattern: &str) -> MobResult<Vec<String>> {
        // `parent/*` is equivalent to the bare-suffix form `parent`.
        let stem = pattern.strip_suffix("/*").unwrap_or(pattern);

        // Exact full-path or bare-name match (a real project, not a
        // hierarchy prefix) wins outright.
        if let Some(exact) = self.lookup(pattern) {
            return Ok(vec![exact.path.clone()]);
        }

        // Path-suffix match: unique entry whose path ends with the pattern's
        // trailing components.
        let suffix = format!("/{stem}");
        let suffix_matches: Vec<String> = self
            .entries
            .iter()
            .filter(|e| e.path == stem || e.path.ends_with(&suffix))
            .map(|e| e.path.clone())
            .collect();
        if suffix_matches.len() == 1 && suffix_matches[0] == stem {
            return Ok(suffix_matches);
        }

        // Hierarchy expansion: all descendants of `stem`, excluding `stem`
        // itself.
        let descendant_prefix = format!("{stem}/");
        let descendants: Vec<String> = self
            .entries
            .iter()
            .filter(|e| e.path.starts_with(&descendant_prefix))
            .map(|e| e.path.clone())
            .collect();

        if !descendants.is_empty() {
            return Ok(descendants);
        }
        if !suffix_matches.is_empty() {
            return Ok(suffix_matches);
        }

        Err(DbError::UnknownProject(pattern.to_string()).into())
    }

    /// Direct dependency paths for `name`.
    ///
    /// # Errors
    ///
    /// Returns a [`DbError::UnknownProject`] if `name` is not in the database.
    pub fn dependencies(&self, name: &str, _branch_group: &str) -> MobResult<Vec<String>> {
        self.lookup(name)
            .map(|e| e.dependencies.clone())
            .ok_or_else(|| DbError::UnknownProject(name.to_string()).into())
    }

    /// Entries whose path matches `pattern` per [`Self::expand`]'s rules,
    /// for ad-hoc exclusion queries outside the resolver's own ignore-mask
    /// handling.
    ///
    /// # Errors
    ///
    /// Returns a [`DbError::UnknownProject`] if `pattern` matches nothing.
    pub fn ignore(&self, pattern: &str) -> MobResult<Vec<&ProjectDescriptor>> {
        let paths = self.expand(pattern)?;
        Ok(self.entries.iter().filter(|e| paths.contains(&e.path)).collect())
    }

    /// Resolves the branch to use for `name` under `branch_group`, falling
    /// back to the repository's catch-all default.
    ///
    /// # Errors
    ///
    /// Returns a [`DbError::UnknownProject`] if `name` is not in the database.
    pub fn resolve_branch(&self, name: &str, branch_group: &str) -> MobResult<String> {
        let entry = self
            .lookup(name)
            .ok_or_else(|| DbError::UnknownProject(name.to_string()))?;
        Ok(entry
            .branch_for(branch_group)
            .unwrap_or("master")
            .to_string())
    }
}

#[cfg(test)]
mod tests;
