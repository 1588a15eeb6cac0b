// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options shared by every subcommand (§6).
//!
//! # Option Precedence
//!
//! ```text
//! --rc-file FILE     ← rc-file path (searched if omitted)
//! --set NAME=VALUE   ← sticky global option override (can repeat)
//! --<phase-toggle>   ← maps onto a sticky phase-toggle option
//!
//! Precedence: --set / phase-toggle flags > rc-file global: > rc-file project:/group:
//! ```

use clap::Args;
use std::path::PathBuf;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to the rc-file. Searched for in the current directory, then
    /// `$XDG_CONFIG_HOME/mob-rs/rc.yml`, if omitted.
    #[arg(short = 'f', long = "rc-file", value_name = "FILE")]
    pub rc_file: Option<PathBuf>,

    /// Project/group/pattern selectors. A `+` prefix forces database
    /// lookup even when a same-named rc-file node exists.
    pub selectors: Vec<String>,

    /// No writes; still fetches project-database metadata if absent.
    #[arg(short = 'p', long)]
    pub pretend: bool,

    /// Updates project-database metadata, then exits.
    #[arg(short = 'M', long = "metadata-only")]
    pub metadata_only: bool,

    /// Skips the update phase for every project.
    #[arg(short = 'S', long = "no-src")]
    pub no_src: bool,
    /// Skips the build phase for every project.
    #[arg(long = "no-build")]
    pub no_build: bool,
    /// Skips the install phase for every project.
    #[arg(long = "no-install")]
    pub no_install: bool,
    /// Runs only the update phase.
    #[arg(long = "src-only")]
    pub src_only: bool,
    /// Runs only build-system-setup and build.
    #[arg(long = "build-only")]
    pub build_only: bool,
    /// Runs only the install phase.
    #[arg(long = "install-only")]
    pub install_only: bool,
    /// Runs only the uninstall phase.
    #[arg(long)]
    pub uninstall: bool,

    /// Restricts the plan to `[PROJECT, end)`.
    #[arg(long = "resume-from", value_name = "PROJECT")]
    pub resume_from: Option<String>,
    /// Restricts the plan to `(PROJECT, end)`.
    #[arg(long = "resume-after", value_name = "PROJECT")]
    pub resume_after: Option<String>,
    /// Restricts the plan to `[start, PROJECT)`.
    #[arg(long = "stop-before", value_name = "PROJECT")]
    pub stop_before: Option<String>,
    /// Restricts the plan to `[start, PROJECT]`.
    #[arg(long = "stop-after", value_name = "PROJECT")]
    pub stop_after: Option<String>,
    /// Restricts the plan to the previously-failed set (persistent state).
    #[arg(long = "rebuild-failures")]
    pub rebuild_failures: bool,
    /// Resumes at the first project persistent state marked as failed on
    /// the previous run.
    #[arg(long)]
    pub resume: bool,
    /// Like `--resume`, and additionally applies `--refresh-build-first`
    /// to the resumed-at project.
    #[arg(long = "resume-refresh-build-first")]
    pub resume_refresh_build_first: bool,

    /// Removes the build directory before configure, for every project.
    #[arg(short = 'r', long = "refresh-build")]
    pub refresh_build: bool,
    /// Removes the build directory before configure, for the first
    /// project in the plan only.
    #[arg(long = "refresh-build-first")]
    pub refresh_build_first: bool,
    /// Forces reconfigure even if the build directory is already set up.
    #[arg(long)]
    pub reconfigure: bool,

    /// Pulls in direct dependencies transitively for selected projects.
    #[arg(short = 'd', long = "include-dependencies")]
    pub include_dependencies: bool,
    /// Suppresses dependency pull-in even if the rc-file requests it.
    #[arg(short = 'D', long = "no-include-dependencies")]
    pub no_include_dependencies: bool,

    /// Additional patterns to exclude, appended to `ignore-projects`.
    #[arg(short = '!', long = "ignore-projects", value_name = "LIST", value_delimiter = ',')]
    pub ignore_projects: Vec<String>,

    /// Branch group used to resolve each project's default branch.
    #[arg(long = "branch-group", value_name = "GROUP", default_value = "stable")]
    pub branch_group: String,

    /// Truncates the remaining plan on the first project failure.
    #[arg(long = "stop-on-failure")]
    pub stop_on_failure: bool,

    /// Per-project sticky override: `PROJECT,KEY,VALUE`.
    #[arg(long = "set-project-option-value", value_name = "PROJECT,KEY,VALUE", action = clap::ArgAction::Append)]
    pub set_project_option_value: Vec<String>,

    /// Sticky global option override: `KEY=VALUE`. Can repeat.
    #[arg(short = 's', long = "set", value_name = "KEY=VALUE", action = clap::ArgAction::Append)]
    pub set: Vec<String>,

    /// Lowers every logger to DEBUG.
    #[arg(long)]
    pub debug: bool,
    /// Console log level (0=silent .. 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6))]
    pub log_level: Option<u8>,
    /// File log level, overrides `--log-level` for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6))]
    pub file_log_level: Option<u8>,
    /// Path to an additional log file (besides the log tree).
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}
