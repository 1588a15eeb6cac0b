// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for `--run <program> [args…]` (§6): execs a program inside
//! the project environment after rc-file/option-table setup, without
//! running any phase.

use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct RunProgramArgs {
    /// Runs the program as a detached child instead of exec-replacing
    /// this process (named `--fork` rather than the source's `-f` short
    /// flag, which collides with this crate's `-f`/`--rc-file`).
    #[arg(long)]
    pub fork: bool,

    /// The program to run.
    pub program: String,

    /// Arguments passed through to the program unchanged.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}
