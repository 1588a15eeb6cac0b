// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::try_parse() --> logging::init_logging --> cmd dispatch --> exit code
//!   Version | Query | RunProgram | (none, the default run)
//! ```

use std::process::ExitCode;

use clap::error::ErrorKind;

use mob_rs::cli::global::GlobalOptions;
use mob_rs::cli::{self, Command};
use mob_rs::cmd;
use mob_rs::logging::{LogConfig, LogLevel, init_logging};
use mob_rs::report::{EXIT_BAD_OPTION, EXIT_INTERNAL, EXIT_OK};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return handle_parse_error(&e),
    };

    let log_config = build_log_config(&cli.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("failed to initialize logging: {e:#}");
            return exit_code(EXIT_INTERNAL);
        }
    };

    dispatch(&cli).await
}

/// `--help`/`--version` are a clean exit; anything else is a bad option
/// (§6, §7 `EXIT_BAD_OPTION`).
fn handle_parse_error(e: &clap::Error) -> ExitCode {
    let _ = e.print();
    match e.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => exit_code(EXIT_OK),
        _ => exit_code(EXIT_BAD_OPTION),
    }
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let console_level = if global.debug {
        LogLevel::DEBUG
    } else {
        global.log_level.and_then(LogLevel::from_u8).unwrap_or(LogLevel::INFO)
    };
    let file_level = global.file_log_level.and_then(LogLevel::from_u8).unwrap_or(console_level);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .build()
}

async fn dispatch(cli: &cli::Cli) -> ExitCode {
    match &cli.command {
        Some(Command::Version) => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            exit_code(EXIT_OK)
        }
        Some(Command::Query(args)) => match cmd::query::run(&cli.global, args) {
            Ok(()) => exit_code(EXIT_OK),
            Err(e) => report_internal_error(&e),
        },
        Some(Command::RunProgram(args)) => match cmd::run_program::run(&cli.global, args).await {
            Ok(code) => exit_code(code),
            Err(e) => report_internal_error(&e),
        },
        None => match cmd::run::run(&cli.global).await {
            Ok(report) => exit_code(report.exit_code()),
            Err(e) => report_internal_error(&e),
        },
    }
}

fn report_internal_error(e: &anyhow::Error) -> ExitCode {
    eprintln!("error: {e:#}");
    exit_code(EXIT_INTERNAL)
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(code.clamp(0, 255) as u8)
}
