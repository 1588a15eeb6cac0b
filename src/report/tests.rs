// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;
use std::time::Duration;

use super::{ProjectOutcome, Report, Termination, EXIT_FAILURE, EXIT_OK, EXIT_SIGNALED};

#[test]
fn clean_run_exits_zero() {
    let mut report = Report::new();
    report.record("kcalc", ProjectOutcome::Built { duration: Duration::from_secs(5) });
    assert_eq!(report.exit_code(), EXIT_OK);
}

#[test]
fn a_single_failure_exits_one() {
    let mut report = Report::new();
    report.record("kcalc", ProjectOutcome::Built { duration: Duration::from_secs(5) });
    report.record(
        "ark",
        ProjectOutcome::Failed { error_log: PathBuf::from("/logs/ark/error.log"), message: "build failed".into() },
    );
    assert_eq!(report.exit_code(), EXIT_FAILURE);
    assert_eq!(report.failed().len(), 1);
}

#[test]
fn graceful_stop_exits_five_even_with_no_failures() {
    let mut report = Report::new();
    report.record("a", ProjectOutcome::Built { duration: Duration::from_secs(1) });
    report.record("b", ProjectOutcome::NotAttempted);
    report.termination = Some(Termination::GracefulStop);
    assert_eq!(report.exit_code(), EXIT_SIGNALED);
}

#[test]
fn dependents_of_a_failed_project_are_skipped_not_failed() {
    let mut report = Report::new();
    report.record(
        "a",
        ProjectOutcome::Failed { error_log: PathBuf::from("/logs/a/error.log"), message: "boom".into() },
    );
    report.record("b", ProjectOutcome::SkippedDependency);
    assert_eq!(report.skipped().len(), 1);
    assert_eq!(report.exit_code(), EXIT_FAILURE);
}

#[test]
fn render_includes_post_build_messages() {
    let mut report = Report::new();
    report.record("a", ProjectOutcome::Built { duration: Duration::from_secs(1) });
    report.post_build_message("restart your session to pick up new PATH entries");
    let text = report.render();
    assert!(text.contains("restart your session"));
}
