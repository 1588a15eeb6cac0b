// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Canonical per-project configuration (§4.1).
//!
//! ```text
//! OptionTable
//!   global    BTreeMap<name, value>
//!   groups    BTreeMap<group, BTreeMap<name, value>>
//!   projects  BTreeMap<project, BTreeMap<name, value>>
//!   sticky    BTreeMap<name, value>   <- command-line overlays, always win
//!
//! get(project, name):
//!   sticky?  -> that value
//!   Replace: project -> group -> global -> None
//!   Append:  global ++ " " ++ group ++ " " ++ project
//!
//! expand("${a} and ${b}") -> recursive substitution, cycle-checked
//! ```

pub mod catalog;

use std::collections::BTreeMap;

use catalog::Composition;

use crate::error::{ConfigError, MobResult};

/// The scope an option value is being set in.
#[derive(Debug, Clone)]
pub enum Scope {
    Global,
    Group(String),
    Project(String),
}

/// The full set of option values known for one run, layered by scope.
#[derive(Debug, Clone, Default)]
pub struct OptionTable {
    global: BTreeMap<String, String>,
    groups: BTreeMap<String, BTreeMap<String, String>>,
    projects: BTreeMap<String, BTreeMap<String, String>>,
    /// project -> group, so `get` can fall back through the project's group.
    project_group: BTreeMap<String, String>,
    /// Command-line overlays (`--set`, `-s`). Once set, mask every
    /// file-derived value for this option for the rest of the run.
    sticky: BTreeMap<String, String>,
}

impl OptionTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `project` belongs to `group`, so lookups can fall
    /// through group-scoped values. Called by the resolver while
    /// expanding groups into projects.
    pub fn bind_project_group(&mut self, project: &str, group: &str) {
        self.project_group
            .insert(project.to_string(), group.to_string());
    }

    /// Sets an option's value in the given scope.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownOption`] if `name` is not in the
    /// recognized catalog and does not start with `_`.
    pub fn set(&mut self, scope: &Scope, name: &str, value: impl Into<String>) -> MobResult<()> {
        if !catalog::is_known(name) {
            return Err(ConfigError::UnknownOption {
                node: scope_label(scope),
                option: name.to_string(),
            }
            .into());
        }
        self.set_unchecked(scope, name, value.into());
        Ok(())
    }

    fn set_unchecked(&mut self, scope: &Scope, name: &str, value: String) {
        let table = match scope {
            Scope::Global => &mut self.global,
            Scope::Group(group) => self.groups.entry(group.clone()).or_default(),
            Scope::Project(project) => self.projects.entry(project.clone()).or_default(),
        };
        table.insert(name.to_string(), value);
    }

    /// Sets a sticky override that masks every file-derived value for
    /// `name` for the remainder of the run (command-line `--set`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownOption`] if `name` is unrecognized.
    pub fn set_sticky(&mut self, name: &str, value: impl Into<String>) -> MobResult<()> {
        if !catalog::is_known(name) {
            return Err(ConfigError::UnknownOption {
                node: "command-line".to_string(),
                option: name.to_string(),
            }
            .into());
        }
        self.sticky.insert(name.to_string(), value.into());
        Ok(())
    }

    /// Resolves `name` for `project`, per the fallback/append rules in §4.1.
    #[must_use]
    pub fn get(&self, project: &str, name: &str) -> Option<String> {
        if let Some(v) = self.sticky.get(name) {
            return Some(v.clone());
        }

        match catalog::composition(name) {
            Composition::Replace => self
                .projects
                .get(project)
                .and_then(|t| t.get(name))
                .or_else(|| {
                    self.project_group
                        .get(project)
                        .and_then(|g| self.groups.get(g))
                        .and_then(|t| t.get(name))
                })
                .or_else(|| self.global.get(name))
                .cloned(),
            Composition::Append => {
                let mut parts = Vec::new();
                if let Some(v) = self.global.get(name) {
                    parts.push(v.as_str());
                }
                if let Some(v) = self
                    .project_group
                    .get(project)
                    .and_then(|g| self.groups.get(g))
                    .and_then(|t| t.get(name))
                {
                    parts.push(v.as_str());
                }
                if let Some(v) = self.projects.get(project).and_then(|t| t.get(name)) {
                    parts.push(v.as_str());
                }
                if parts.is_empty() {
                    None
                } else {
                    Some(parts.join(" "))
                }
            }
        }
    }

    /// Resolves `name` for `project`, falling back to `default` if unset.
    #[must_use]
    pub fn get_or(&self, project: &str, name: &str, default: &str) -> String {
        self.get(project, name).unwrap_or_else(|| default.to_string())
    }

    /// Resolves `name` for `project` as a boolean (`"true"`/`"1"`/`"yes"`).
    #[must_use]
    pub fn get_bool(&self, project: &str, name: &str) -> bool {
        self.get(project, name)
            .is_some_and(|v| matches!(v.trim(), "true" | "1" | "yes"))
    }

    /// Recursively substitutes `${name}` references in `value` with
    /// `get(project, name)`, resolved for the given project scope.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if expansion would recurse
    /// through the same name twice (a self-reference cycle).
    pub fn expand(&self, project: &str, value: &str) -> MobResult<String> {
        let mut seen = Vec::new();
        self.expand_inner(project, value, &mut seen)
    }

    fn expand_inner(&self, project: &str, value: &str, seen: &mut Vec<String>) -> MobResult<String> {
        let mut out = String::with_capacity(value.len());
        let mut rest = value;

        while let Some(start) = rest.find("${") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let Some(end) = after.find('}') else {
                out.push_str(&rest[start..]);
                rest = "";
                break;
            };
            let name = &after[..end];

            if seen.iter().any(|s| s == name) {
                return Err(ConfigError::InvalidValue {
                    section: project.to_string(),
                    key: name.to_string(),
                    message: format!("cyclic ${{{name}}} substitution"),
                }
                .into());
            }

            let resolved = self.get(project, name).unwrap_or_default();
            seen.push(name.to_string());
            let expanded = self.expand_inner(project, &resolved, seen)?;
            seen.pop();

            out.push_str(&expanded);
            rest = &after[end + 1..];
        }
        out.push_str(rest);
        Ok(out)
    }
}

fn scope_label(scope: &Scope) -> String {
    match scope {
        Scope::Global => "global".to_string(),
        Scope::Group(g) => format!("group {g}"),
        Scope::Project(p) => format!("project {p}"),
    }
}

#[cfg(test)]
mod tests;
