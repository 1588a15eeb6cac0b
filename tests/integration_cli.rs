// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing.
//!
//! Tests the CLI module with realistic command-line argument patterns.

use clap::Parser;
use mob_rs::cli::query::QueryMode;
use mob_rs::cli::{Cli, Command};

// =============================================================================
// Version Command
// =============================================================================

#[test]
fn cli_version_command() {
    let cli = Cli::try_parse_from(["forge", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn cli_version_alias() {
    let cli = Cli::try_parse_from(["forge", "-v"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

// =============================================================================
// Default (no subcommand) Run
// =============================================================================

#[test]
fn cli_no_subcommand_with_selectors() {
    let cli = Cli::try_parse_from(["forge", "usvfs", "cmake_common", "qt"]).unwrap();
    assert!(cli.command.is_none());
    assert_eq!(cli.global.selectors, vec!["usvfs", "cmake_common", "qt"]);
}

#[test]
fn cli_pretend_flag() {
    let cli = Cli::try_parse_from(["forge", "-p", "kdeutils"]).unwrap();
    assert!(cli.global.pretend);
}

#[test]
fn cli_phase_toggle_flags() {
    let cli = Cli::try_parse_from(["forge", "--no-src", "--build-only"]).unwrap();
    assert!(cli.global.no_src);
    assert!(cli.global.build_only);
}

#[test]
fn cli_refresh_and_reconfigure_flags() {
    let cli = Cli::try_parse_from(["forge", "-r", "--reconfigure"]).unwrap();
    assert!(cli.global.refresh_build);
    assert!(cli.global.reconfigure);
}

#[test]
fn cli_resume_flags_are_mutually_independent() {
    let cli = Cli::try_parse_from(["forge", "--resume-refresh-build-first"]).unwrap();
    assert!(cli.global.resume_refresh_build_first);
    assert!(!cli.global.resume);
}

// =============================================================================
// Global Options
// =============================================================================

#[test]
fn cli_global_options_rc_file() {
    let cli = Cli::try_parse_from(["forge", "-f", "/tmp/rc.yml", "build"]).unwrap();
    assert_eq!(cli.global.rc_file, Some(std::path::PathBuf::from("/tmp/rc.yml")));
    assert_eq!(cli.global.selectors, vec!["build"]);
}

#[test]
fn cli_global_options_log_levels() {
    let cli = Cli::try_parse_from(["forge", "-l", "5", "--file-log-level", "3"]).unwrap();
    assert_eq!(cli.global.log_level, Some(5));
    assert_eq!(cli.global.file_log_level, Some(3));
}

#[test]
fn cli_global_options_ignore_projects() {
    let cli = Cli::try_parse_from(["forge", "--ignore-projects", "a,b,c"]).unwrap();
    assert_eq!(cli.global.ignore_projects, vec!["a", "b", "c"]);
}

#[test]
fn cli_global_options_set_overrides() {
    let cli = Cli::try_parse_from(["forge", "-s", "async=false", "-s", "num-cores=4"]).unwrap();
    assert_eq!(cli.global.set, vec!["async=false", "num-cores=4"]);
}

#[test]
fn cli_global_options_set_project_option_value() {
    let cli = Cli::try_parse_from(["forge", "--set-project-option-value", "qt,branch,stable"]).unwrap();
    assert_eq!(cli.global.set_project_option_value, vec!["qt,branch,stable"]);
}

// =============================================================================
// Query Command
// =============================================================================

#[test]
fn cli_query_default_mode_is_plan() {
    let cli = Cli::try_parse_from(["forge", "query"]).unwrap();
    match cli.command {
        Some(Command::Query(args)) => assert_eq!(args.mode, QueryMode::Plan),
        other => panic!("expected Query, got {other:?}"),
    }
}

#[test]
fn cli_query_rc_files_mode() {
    let cli = Cli::try_parse_from(["forge", "query", "rc-files"]).unwrap();
    match cli.command {
        Some(Command::Query(args)) => assert_eq!(args.mode, QueryMode::RcFiles),
        other => panic!("expected Query, got {other:?}"),
    }
}

#[test]
fn cli_query_dependency_tree_fullpath() {
    let cli = Cli::try_parse_from(["forge", "query", "--dependency-tree-fullpath"]).unwrap();
    match cli.command {
        Some(Command::Query(args)) => assert!(args.dependency_tree_fullpath),
        other => panic!("expected Query, got {other:?}"),
    }
}

#[test]
fn cli_query_list_installed() {
    let cli = Cli::try_parse_from(["forge", "query", "--list-installed"]).unwrap();
    match cli.command {
        Some(Command::Query(args)) => assert!(args.list_installed),
        other => panic!("expected Query, got {other:?}"),
    }
}

// =============================================================================
// RunProgram Command
// =============================================================================

#[test]
fn cli_run_program_forwards_trailing_args() {
    let cli = Cli::try_parse_from(["forge", "run-program", "cmake", "--build", "."]).unwrap();
    match cli.command {
        Some(Command::RunProgram(args)) => {
            assert!(!args.fork);
            assert_eq!(args.program, "cmake");
            assert_eq!(args.args, vec!["--build", "."]);
        }
        other => panic!("expected RunProgram, got {other:?}"),
    }
}

#[test]
fn cli_run_program_fork() {
    let cli = Cli::try_parse_from(["forge", "run-program", "--fork", "ninja"]).unwrap();
    match cli.command {
        Some(Command::RunProgram(args)) => assert!(args.fork),
        other => panic!("expected RunProgram, got {other:?}"),
    }
}

// =============================================================================
// Error Cases
// =============================================================================

#[test]
fn cli_invalid_log_level() {
    // Log level must be 0-6
    let result = Cli::try_parse_from(["forge", "-l", "10"]);
    assert!(result.is_err());
}

#[test]
fn cli_unknown_flag_rejected() {
    let result = Cli::try_parse_from(["forge", "--not-a-real-flag"]);
    assert!(result.is_err());
}

#[test]
fn cli_run_program_requires_program_arg() {
    let result = Cli::try_parse_from(["forge", "run-program"]);
    assert!(result.is_err());
}
