// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Turns an rc-file plus selectors into an ordered build plan (§4.2).
//!
//! ```text
//! RcFile + ProjectDatabase + selectors
//!           |
//!           v  1-3: materialize nodes, resolve selectors, expand groups
//!           v  4-6: ignore-projects, include-dependencies, hold-work-branches
//!           v  7:   dependency-topological order, cycle detection
//!           v
//!     (BuildPlan, IgnoreMask)
//!           |
//!           v  8: apply_slicing() -- resume/stop-before/rebuild-failures
//!     BuildPlan
//! ```

pub mod slicing;

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use crate::db::ProjectDatabase;
use crate::error::{DbError, MobResult};
use crate::git::backend::{GitQuery, GixBackend};
use crate::model::project::default_phases;
use crate::model::{BuildPlan, IgnoreMask, Phase, Project, SourceSpec};
use crate::options::{OptionTable, Scope};
use crate::rcfile::RcFile;

/// One candidate project, gathered in steps 1-3 before ordering.
struct Candidate {
    name: String,
    group: Option<String>,
    dependencies: Vec<String>,
    order_index: usize,
}

/// Resolves `rc` and `selectors` into a build plan and an ignore mask.
///
/// `db` is required only when the rc-file references `kde-projects` groups
/// or selectors that are not defined directly in the rc-file; a purely
/// self-contained rc-file can resolve with `db: None`.
///
/// # Errors
///
/// Returns a [`DbError::UnknownProject`] if a selector or group member
/// cannot be resolved, or a [`DbError::DependencyCycle`] if the dependency
/// graph is not acyclic.
pub fn resolve(
    rc: &RcFile,
    db: Option<&ProjectDatabase>,
    options: &mut OptionTable,
    selectors: &[String],
    cli_ignore: &[String],
    branch_group: &str,
) -> MobResult<(BuildPlan, IgnoreMask)> {
    let mut candidates: Vec<Candidate> = Vec::new();
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut group_ignores: BTreeMap<String, Vec<String>> = BTreeMap::new();

    apply_global_node(rc, options)?;
    apply_group_nodes(rc, db, options, &mut candidates, &mut seen, &mut group_ignores)?;

    if selectors.is_empty() {
        apply_bare_project_nodes(rc, &mut candidates, &mut seen);
    } else {
        apply_selectors(rc, db, selectors, &mut candidates, &mut seen)?;
    }

    apply_project_node_options(rc, options)?;
    apply_overrides(rc, options)?;

    let mask = IgnoreMask::new(global_ignore_patterns(options, cli_ignore));
    prune_group_ignored(&mut candidates, &group_ignores);
    candidates.retain(|c| !mask.matches(&c.name));

    if let Some(db) = db {
        expand_include_dependencies(db, options, branch_group, &mut candidates, &mut seen);
    }

    let mut projects = materialize_projects(&candidates, db, options);
    apply_hold_work_branches(options, &mut projects);
    apply_phase_toggles(options, &mut projects);

    let ordered = order_projects(projects, &candidates)?;

    Ok((BuildPlan::new(ordered), mask))
}

/// Step 3: expand `repository: kde-projects` (and plain) groups into
/// candidate projects, binding each member to the group's options.
fn apply_group_nodes(
    rc: &RcFile,
    db: Option<&ProjectDatabase>,
    options: &mut OptionTable,
    candidates: &mut Vec<Candidate>,
    seen: &mut BTreeSet<String>,
    group_ignores: &mut BTreeMap<String, Vec<String>>,
) -> MobResult<()> {
    for (group_name, node) in rc.groups() {
        for (key, value) in &node.options {
            if key == "ignore-projects" {
                group_ignores.insert(
                    group_name.to_string(),
                    value.split([',', ' ']).filter(|s| !s.is_empty()).map(str::to_string).collect(),
                );
                continue;
            }
            options.set(&Scope::Group(group_name.to_string()), key, value.clone())?;
        }

        let is_kde_projects = node.options.get("repository").is_some_and(|r| r == "kde-projects");

        for pattern in &node.use_projects {
            let members: Vec<String> = if is_kde_projects {
                match db {
                    Some(db) => db.expand(pattern)?,
                    None => return Err(DbError::UnknownProject(pattern.clone()).into()),
                }
            } else if rc.has_node_named(pattern) {
                vec![pattern.clone()]
            } else if let Some(db) = db {
                db.expand(pattern)?
            } else {
                vec![pattern.clone()]
            };

            for member in members {
                if seen.insert(member.clone()) {
                    options.bind_project_group(&member, group_name);
                    candidates.push(Candidate {
                        name: member,
                        group: Some(group_name.to_string()),
                        dependencies: Vec::new(),
                        order_index: candidates.len(),
                    });
                }
            }
        }
    }
    Ok(())
}

/// Applies the rc-file's top-level `global:` node options at [`Scope::Global`].
fn apply_global_node(rc: &RcFile, options: &mut OptionTable) -> MobResult<()> {
    if let Some(node) = rc.global() {
        for (key, value) in &node.options {
            options.set(&Scope::Global, key, value.clone())?;
        }
    }
    Ok(())
}

/// Applies each `project <name>:` node's own option map at
/// [`Scope::Project`], beneath whatever group scope it was bound to.
fn apply_project_node_options(rc: &RcFile, options: &mut OptionTable) -> MobResult<()> {
    for (name, node) in rc.projects() {
        for (key, value) in &node.options {
            options.set(&Scope::Project(name.to_string()), key, value.clone())?;
        }
    }
    Ok(())
}

/// Applies `override <name>:` nodes last, so they win over both group and
/// plain project-node options for the same project.
fn apply_overrides(rc: &RcFile, options: &mut OptionTable) -> MobResult<()> {
    for (name, node) in rc.overrides() {
        for (key, value) in &node.options {
            options.set(&Scope::Project(name.to_string()), key, value.clone())?;
        }
    }
    Ok(())
}

/// No-selector default: every project node explicitly defined in the
/// rc-file that wasn't already pulled in by a group.
fn apply_bare_project_nodes(rc: &RcFile, candidates: &mut Vec<Candidate>, seen: &mut BTreeSet<String>) {
    for (name, _) in rc.projects() {
        if seen.insert(name.to_string()) {
            candidates.push(Candidate {
                name: name.to_string(),
                group: None,
                dependencies: Vec::new(),
                order_index: candidates.len(),
            });
        }
    }
}

/// Step 2: resolve each selector, honoring the `+`-prefix force-database
/// rule and the rc-file splice-in-place rule.
fn apply_selectors(
    rc: &RcFile,
    db: Option<&ProjectDatabase>,
    selectors: &[String],
    candidates: &mut Vec<Candidate>,
    seen: &mut BTreeSet<String>,
) -> MobResult<()> {
    for selector in selectors {
        let (force_db, name) = match selector.strip_prefix('+') {
            Some(rest) => (true, rest),
            None => (false, selector.as_str()),
        };

        let names: Vec<String> = if !force_db && rc.has_node_named(name) {
            vec![name.to_string()]
        } else if let Some(db) = db {
            db.expand(name)?
        } else {
            return Err(DbError::UnknownProject(name.to_string()).into());
        };

        for resolved in names {
            if seen.insert(resolved.clone()) {
                candidates.push(Candidate {
                    name: resolved,
                    group: None,
                    dependencies: Vec::new(),
                    order_index: candidates.len(),
                });
            }
        }
    }
    Ok(())
}

/// Step 4: global `ignore-projects` union with `--ignore-projects`.
fn global_ignore_patterns(options: &OptionTable, cli_ignore: &[String]) -> Vec<String> {
    let mut patterns: Vec<String> = options
        .get("", "ignore-projects")
        .map(|v| v.split([',', ' ']).filter(|s| !s.is_empty()).map(str::to_string).collect())
        .unwrap_or_default();
    patterns.extend(cli_ignore.iter().cloned());
    patterns
}

/// Step 4 (group-scope half): drops members named in a group's own
/// `ignore-projects`, which applies only within that group.
fn prune_group_ignored(candidates: &mut Vec<Candidate>, group_ignores: &BTreeMap<String, Vec<String>>) {
    candidates.retain(|c| match &c.group {
        Some(g) => group_ignores
            .get(g)
            .is_none_or(|ignored| !ignored.iter().any(|pat| c.name.contains(pat.as_str()))),
        None => true,
    });
}

/// Step 5: transitively pull in direct dependencies for any candidate with
/// `include-dependencies` set.
fn expand_include_dependencies(
    db: &ProjectDatabase,
    options: &OptionTable,
    branch_group: &str,
    candidates: &mut Vec<Candidate>,
    seen: &mut BTreeSet<String>,
) {
    let mut queue: Vec<String> = candidates
        .iter()
        .filter(|c| options.get_bool(&c.name, "include-dependencies"))
        .map(|c| c.name.clone())
        .collect();

    while let Some(name) = queue.pop() {
        let Ok(deps) = db.dependencies(&name, branch_group) else {
            continue;
        };
        for dep in deps {
            if seen.insert(dep.clone()) {
                candidates.push(Candidate {
                    name: dep.clone(),
                    group: None,
                    dependencies: Vec::new(),
                    order_index: candidates.len(),
                });
                queue.push(dep);
            }
        }
    }
}

fn materialize_projects(
    candidates: &[Candidate],
    db: Option<&ProjectDatabase>,
    options: &OptionTable,
) -> Vec<Project> {
    candidates
        .iter()
        .map(|c| {
            let descriptor = db.and_then(|d| d.lookup(&c.name));
            let dependencies = descriptor.map(|d| d.dependencies.clone()).unwrap_or_default();
            let source = match descriptor {
                Some(d) => SourceSpec::Url(d.repo.clone()),
                None => SourceSpec::Database,
            };
            let db_path = descriptor.map(|d| d.path.as_str()).unwrap_or(&c.name);
            let (source_dir, build_dir, install_dir, log_dir) =
                derive_paths(&c.name, db_path, options);
            Project {
                name: c.name.clone(),
                source,
                group: c.group.clone(),
                forced_build_system: options.get(&c.name, "override-build-system"),
                phases: default_phases(),
                source_dir,
                build_dir,
                install_dir,
                log_dir,
                dependencies,
            }
        })
        .collect()
}

/// Derives the four on-disk directories for a project from its
/// `source-dir`/`build-dir`/`install-dir`/`log-dir` and `directory-layout`
/// options (§3, §4.1).
fn derive_paths(
    name: &str,
    db_path: &str,
    options: &OptionTable,
) -> (PathBuf, PathBuf, PathBuf, PathBuf) {
    let layout = options.get_or(name, "directory-layout", "invent");
    let relative = match layout.as_str() {
        "flat" => name.to_string(),
        "metadata" => db_path.to_string(),
        _ => name.to_string(),
    };

    let source_root = options.get_or(name, "source-dir", "source");
    let build_root = options.get_or(name, "build-dir", "build");
    let install_root = options.get_or(name, "install-dir", "install");
    let log_root = options.get_or(name, "log-dir", "logs");

    (
        PathBuf::from(expand(options, name, &source_root)).join(&relative),
        PathBuf::from(expand(options, name, &build_root)).join(&relative),
        PathBuf::from(expand(options, name, &install_root)).join(&relative),
        PathBuf::from(expand(options, name, &log_root)).join(&relative),
    )
}

fn expand(options: &OptionTable, name: &str, value: &str) -> String {
    options.expand(name, value).unwrap_or_else(|_| value.to_string())
}

/// Step 6: drop the update phase for projects sitting on a held work
/// branch, when `hold-work-branches` is set for them.
fn apply_hold_work_branches(options: &OptionTable, projects: &mut [Project]) {
    for project in projects.iter_mut() {
        if !options.get_bool(&project.name, "hold-work-branches") {
            continue;
        }
        if !project.source_dir.as_os_str().is_empty() && project.source_dir.exists() {
            if let Ok(Some(branch)) = GixBackend::current_branch(&project.source_dir) {
                if branch.starts_with("work/") || branch.starts_with("mr/") {
                    project.remove_phase(Phase::Update);
                }
            }
        }
    }
}

/// Applies the per-project phase-toggle options (§4.1 "Phase toggles"):
/// `build-only`/`install-only` restrict the phase set outright; otherwise
/// `no-src`/`no-build`/`no-install` each drop one phase, and `uninstall`
/// adds the (normally absent) uninstall phase.
fn apply_phase_toggles(options: &OptionTable, projects: &mut [Project]) {
    for project in projects.iter_mut() {
        let name = project.name.clone();

        if options.get_bool(&name, "build-only") {
            project.phases.retain(|p| matches!(p, Phase::BuildSystemSetup | Phase::Build));
        } else if options.get_bool(&name, "install-only") {
            project.phases.retain(|p| matches!(p, Phase::Install));
        } else {
            if options.get_bool(&name, "no-src") {
                project.remove_phase(Phase::Update);
            }
            if options.get_bool(&name, "no-build") {
                project.remove_phase(Phase::BuildSystemSetup);
                project.remove_phase(Phase::Build);
            }
            if options.get_bool(&name, "no-install") {
                project.remove_phase(Phase::Install);
            }
        }

        if options.get_bool(&name, "uninstall") && !project.has_phase(Phase::Uninstall) {
            project.phases.push(Phase::Uninstall);
        }
    }
}

/// Step 7: dependency-topological order, tie-broken by file-order index
/// then alphabetic name; detects cycles.
fn order_projects(mut projects: Vec<Project>, candidates: &[Candidate]) -> MobResult<Vec<Project>> {
    let order_index: BTreeMap<&str, usize> =
        candidates.iter().map(|c| (c.name.as_str(), c.order_index)).collect();

    let names: BTreeSet<&str> = projects.iter().map(|p| p.name.as_str()).collect();
    let mut in_degree: BTreeMap<String, usize> = BTreeMap::new();
    let mut dependents: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for p in &projects {
        in_degree.entry(p.name.clone()).or_insert(0);
        for dep in &p.dependencies {
            if !names.contains(dep.as_str()) {
                continue;
            }
            *in_degree.entry(p.name.clone()).or_insert(0) += 1;
            dependents.entry(dep.clone()).or_default().push(p.name.clone());
        }
    }

    let mut ready: Vec<String> = in_degree
        .iter()
        .filter(|(_, deg)| **deg == 0)
        .map(|(name, _)| name.clone())
        .collect();
    sort_by_tiebreak(&mut ready, &order_index);

    let mut ordered_names = Vec::with_capacity(projects.len());
    while let Some(next) = ready.first().cloned() {
        ready.remove(0);
        ordered_names.push(next.clone());
        if let Some(deps) = dependents.get(&next) {
            let mut newly_ready = Vec::new();
            for d in deps {
                let deg = in_degree.get_mut(d).expect("dependent tracked in in_degree");
                *deg -= 1;
                if *deg == 0 {
                    newly_ready.push(d.clone());
                }
            }
            ready.extend(newly_ready);
            sort_by_tiebreak(&mut ready, &order_index);
        }
    }

    if ordered_names.len() != projects.len() {
        let stuck: Vec<&str> = in_degree
            .iter()
            .filter(|(_, deg)| **deg > 0)
            .map(|(name, _)| name.as_str())
            .collect();
        return Err(DbError::DependencyCycle { cycle: stuck.join(" -> ") }.into());
    }

    let mut by_name: BTreeMap<String, Project> =
        projects.drain(..).map(|p| (p.name.clone(), p)).collect();
    Ok(ordered_names
        .into_iter()
        .filter_map(|name| by_name.remove(&name))
        .collect())
}

fn sort_by_tiebreak(names: &mut [String], order_index: &BTreeMap<&str, usize>) {
    names.sort_by(|a, b| {
        let ia = order_index.get(a.as_str());
        let ib = order_index.get(b.as_str());
        ia.cmp(&ib).then_with(|| a.cmp(b))
    });
}

#[cfg(test)]
mod tests;
