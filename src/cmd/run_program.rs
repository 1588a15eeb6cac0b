// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `run-program` (§6 `--run`): sets up a project's environment
//! (`binpath`/`libpath`/`set-env`) and runs a program in it, without
//! driving any phase.

use crate::cli::global::GlobalOptions;
use crate::cli::run_program::RunProgramArgs;
use crate::core::env;
use crate::core::env::container::Env;
use crate::core::env::types::EnvFlags;
use crate::core::process::builder::ProcessBuilder;
use crate::error::Result;

use super::load_context;

/// Runs `args.program` inside the environment of the first selected
/// project (or the bare process environment, if none was selected).
///
/// # Errors
///
/// Returns an error if the rc-file/project database setup fails, or if
/// the program cannot be spawned.
pub async fn run(global: &GlobalOptions, args: &RunProgramArgs) -> Result<i32> {
    let ctx = load_context(global)?;
    let project = global.selectors.first().map(String::as_str).unwrap_or("");
    let env = project_env(&ctx.options, project);

    let builder = ProcessBuilder::new(&args.program)
        .args(&args.args)
        .env(env)
        .name(args.program.clone());

    if args.fork {
        let program = args.program.clone();
        tokio::spawn(async move {
            if let Err(e) = builder.run().await {
                tracing::error!(%program, error = %e, "forked program exited with an error");
            }
        });
        return Ok(0);
    }

    let output = builder.run().await?;
    Ok(output.exit_code())
}

/// Builds the environment a project's tools should see: the current
/// process environment, overlaid with `binpath`/`libpath` (prepended to
/// `PATH`/`LD_LIBRARY_PATH`) and `set-env` (space-separated
/// `KEY=VALUE` pairs), all resolved for `project` (§4.1 "Environment").
fn project_env(options: &crate::options::OptionTable, project: &str) -> Env {
    let mut env = env::current_env();

    if let Some(binpath) = options.get(project, "binpath") {
        env.prepend_path(binpath);
    }
    if let Some(libpath) = options.get(project, "libpath") {
        let var = if cfg!(target_os = "macos") { "DYLD_LIBRARY_PATH" } else { "LD_LIBRARY_PATH" };
        env.set_with_flags(var, libpath, EnvFlags::Prepend);
    }
    if let Some(set_env) = options.get(project, "set-env") {
        for assignment in set_env.split_whitespace() {
            if let Some((key, value)) = assignment.split_once('=') {
                env.set(key, value);
            }
        }
    }

    env
}
