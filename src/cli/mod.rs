// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! forge [global options] [selectors...]       <- resolve + run phases
//! forge [global options] query [mode]         <- introspection only
//! forge [global options] run-program <prog>   <- exec in project env
//! ```

pub mod global;
pub mod query;
pub mod run_program;

#[cfg(test)]
mod tests;

use crate::cli::global::GlobalOptions;
use crate::cli::query::QueryArgs;
use crate::cli::run_program::RunProgramArgs;
use clap::{Parser, Subcommand};

/// Source-driven build orchestrator for a large federation of
/// interdependent git repositories.
#[derive(Debug, Parser)]
#[command(
    name = "forge",
    author,
    version,
    about = "Build orchestrator for interdependent project trees",
    long_about = "forge-builder Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Given an rc-file and a set of selectors, determines which\n\
                  projects to process, resolves their dependency order, updates\n\
                  their source from git, builds and installs them, and reports\n\
                  results. With no subcommand, runs the phases named by the\n\
                  phase-toggle flags (default: update, build, install) over the\n\
                  resolved plan.",
    after_help = "RC-FILE:\n\n\
                  By default, forge looks for an rc-file in the current directory,\n\
                  then in $XDG_CONFIG_HOME/mob-rs/rc.yml. Use --rc-file to point at\n\
                  one explicitly. `include:` directives inside it are resolved\n\
                  relative to the including file."
)]
pub struct Cli {
    /// Global options shared by all commands.
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute; omit to resolve the plan and run phases.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Resolves the plan and renders it without running any phase.
    Query(QueryArgs),

    /// Sets up the project environment and execs a program.
    #[command(name = "run-program")]
    RunProgram(RunProgramArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version
/// information was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
