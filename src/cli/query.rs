// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for the introspection subcommand (§6: `--query`,
//! `--dependency-tree`, `--dependency-tree-fullpath`, `--list-installed`).
//! Query mode never runs a phase; it only resolves the plan and renders it.

use clap::Args;

/// What a query renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum QueryMode {
    /// One resolved project name per line, in plan order.
    Plan,
    /// The full option table for each resolved project.
    Options,
    /// The INIs/rc-files that were loaded, in load order.
    RcFiles,
}

#[derive(Debug, Clone, Args)]
pub struct QueryArgs {
    /// What to render.
    #[arg(value_enum, default_value = "plan")]
    pub mode: QueryMode,

    /// Renders the dependency tree instead of the flat plan (project
    /// names only).
    #[arg(long = "dependency-tree")]
    pub dependency_tree: bool,

    /// Like `--dependency-tree`, but each node shows its full logical
    /// path rather than its bare name.
    #[arg(long = "dependency-tree-fullpath")]
    pub dependency_tree_fullpath: bool,

    /// Lists only projects whose install directory currently exists.
    #[arg(long = "list-installed")]
    pub list_installed: bool,
}
