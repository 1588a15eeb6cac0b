// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::query::QueryMode;
use crate::cli::{Cli, Command};
use clap::Parser;

#[test]
fn parses_version() {
    let cli = Cli::try_parse_from(["forge", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn parses_selectors_and_global_flags() {
    let cli = Cli::try_parse_from(["forge", "-p", "-d", "--branch-group", "unstable", "kcalc", "+kdeutils"]).unwrap();
    assert!(cli.global.pretend);
    assert!(cli.global.include_dependencies);
    assert_eq!(cli.global.branch_group, "unstable");
    assert_eq!(cli.global.selectors, vec!["kcalc", "+kdeutils"]);
    assert!(cli.command.is_none());
}

#[test]
fn parses_set_overrides() {
    let cli = Cli::try_parse_from(["forge", "-s", "async=false", "--set", "num-cores=4"]).unwrap();
    assert_eq!(cli.global.set, vec!["async=false", "num-cores=4"]);
}

#[test]
fn parses_slicing_flags() {
    let cli = Cli::try_parse_from(["forge", "--resume-from", "b", "--stop-before", "d"]).unwrap();
    assert_eq!(cli.global.resume_from.as_deref(), Some("b"));
    assert_eq!(cli.global.stop_before.as_deref(), Some("d"));
}

#[test]
fn parses_query_subcommand() {
    let cli = Cli::try_parse_from(["forge", "query", "options"]).unwrap();
    match cli.command {
        Some(Command::Query(args)) => assert_eq!(args.mode, QueryMode::Options),
        other => panic!("expected Query, got {other:?}"),
    }
}

#[test]
fn parses_run_program_with_trailing_args() {
    let cli = Cli::try_parse_from(["forge", "run-program", "--fork", "cmake", "--version"]).unwrap();
    match cli.command {
        Some(Command::RunProgram(args)) => {
            assert!(args.fork);
            assert_eq!(args.program, "cmake");
            assert_eq!(args.args, vec!["--version"]);
        }
        other => panic!("expected RunProgram, got {other:?}"),
    }
}

#[test]
fn rejects_unknown_flag() {
    assert!(Cli::try_parse_from(["forge", "--not-a-real-flag"]).is_err());
}
