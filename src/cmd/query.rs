// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The introspection command (§6: `query`): resolves the plan like the
//! default command, but only renders it -- no phase ever runs.

use crate::cli::global::GlobalOptions;
use crate::cli::query::{QueryArgs, QueryMode};
use crate::error::Result;
use crate::options::catalog;

use super::load_context;

/// Resolves the plan and prints the requested view of it.
///
/// # Errors
///
/// Returns an error under the same conditions as [`super::run::run`]'s
/// setup phase (bad rc-file, database sync failure, unresolvable
/// selector).
pub fn run(global: &GlobalOptions, args: &QueryArgs) -> Result<()> {
    let ctx = load_context(global)?;

    if args.dependency_tree || args.dependency_tree_fullpath {
        render_dependency_tree(&ctx, args.dependency_tree_fullpath);
        return Ok(());
    }

    if args.list_installed {
        for project in ctx.plan.projects() {
            if project.install_dir.is_dir() {
                println!("{}", project.name);
            }
        }
        return Ok(());
    }

    match args.mode {
        QueryMode::Plan => {
            for project in ctx.plan.projects() {
                println!("{}", project.name);
            }
        }
        QueryMode::Options => {
            for project in ctx.plan.projects() {
                println!("{}:", project.name);
                for name in catalog::known_options() {
                    match ctx.options.get(&project.name, name) {
                        Some(value) => println!("  {name} = {value}"),
                        None => println!("  {name} (unset)"),
                    }
                }
            }
        }
        QueryMode::RcFiles => match &ctx.rc_path {
            Some(path) => println!("{}", path.display()),
            None => println!("no rc-file found"),
        },
    }

    Ok(())
}

fn render_dependency_tree(ctx: &super::ResolvedContext, fullpath: bool) {
    let label = |name: &str| -> String {
        if fullpath {
            ctx.db.as_ref().and_then(|db| db.entries().iter().find(|e| e.name() == name)).map_or_else(
                || name.to_string(),
                |e| e.path.clone(),
            )
        } else {
            name.to_string()
        }
    };

    for project in ctx.plan.projects() {
        println!("{}", label(&project.name));
        for dep in &project.dependencies {
            if ctx.plan.find(dep).is_some() {
                println!("  {}", label(dep));
            }
        }
    }
}
