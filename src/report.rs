// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! End-of-run report (§6, §7): the worst per-project outcome plus signal
//! state determines the process exit code.

use std::path::PathBuf;
use std::time::Duration;

/// Exit code for a clean run with no failures.
pub const EXIT_OK: i32 = 0;
/// Exit code for a build/update/install failure, or any unspecified
/// abnormal end.
pub const EXIT_FAILURE: i32 = 1;
/// Exit code for a run terminated by a signal that triggered a graceful
/// shutdown (`SIGHUP`).
pub const EXIT_SIGNALED: i32 = 5;
/// Exit code for an unknown command-line option.
pub const EXIT_BAD_OPTION: i32 = 8;
/// Exit code for an internal exception.
pub const EXIT_INTERNAL: i32 = 99;

/// How a single project's run through the plan ended.
#[derive(Debug, Clone)]
pub enum ProjectOutcome {
    Built { duration: Duration },
    Failed { error_log: PathBuf, message: String },
    SkippedDependency,
    SkippedByOption { reason: String },
    NotAttempted,
}

/// Signal-driven termination state, attached to the report when the run
/// was cut short.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Completed,
    GracefulStop,
    Signaled,
}

/// One project's final line in the report.
#[derive(Debug, Clone)]
pub struct ReportEntry {
    pub project: String,
    pub outcome: ProjectOutcome,
}

/// The full end-of-run report.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub entries: Vec<ReportEntry>,
    pub post_build_messages: Vec<String>,
    pub termination: Option<Termination>,
}

impl Report {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, project: impl Into<String>, outcome: ProjectOutcome) {
        self.entries.push(ReportEntry { project: project.into(), outcome });
    }

    pub fn post_build_message(&mut self, text: impl Into<String>) {
        self.post_build_messages.push(text.into());
    }

    #[must_use]
    pub fn built(&self) -> Vec<&ReportEntry> {
        self.entries.iter().filter(|e| matches!(e.outcome, ProjectOutcome::Built { .. })).collect()
    }

    #[must_use]
    pub fn failed(&self) -> Vec<&ReportEntry> {
        self.entries.iter().filter(|e| matches!(e.outcome, ProjectOutcome::Failed { .. })).collect()
    }

    #[must_use]
    pub fn skipped(&self) -> Vec<&ReportEntry> {
        self.entries
            .iter()
            .filter(|e| {
                matches!(
                    e.outcome,
                    ProjectOutcome::SkippedDependency | ProjectOutcome::SkippedByOption { .. }
                )
            })
            .collect()
    }

    /// Derives the process exit code (§6, §7) from the worst per-project
    /// outcome and any signal-driven termination.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self.termination {
            Some(Termination::Signaled) => EXIT_SIGNALED,
            Some(Termination::GracefulStop) => EXIT_SIGNALED,
            Some(Termination::Completed) | None => {
                if self.entries.iter().any(|e| matches!(e.outcome, ProjectOutcome::Failed { .. })) {
                    EXIT_FAILURE
                } else {
                    EXIT_OK
                }
            }
        }
    }

    /// Renders the human-readable end-of-run summary (§4.6, §6).
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        let built = self.built();
        if !built.is_empty() {
            out.push_str(&format!("built {} project(s):\n", built.len()));
            for e in &built {
                if let ProjectOutcome::Built { duration } = &e.outcome {
                    out.push_str(&format!("  {} ({:.1}s)\n", e.project, duration.as_secs_f64()));
                }
            }
        }

        let failed = self.failed();
        if !failed.is_empty() {
            out.push_str(&format!("failed {} project(s):\n", failed.len()));
            for e in &failed {
                if let ProjectOutcome::Failed { error_log, message } = &e.outcome {
                    out.push_str(&format!("  {}: {} ({})\n", e.project, message, error_log.display()));
                }
            }
        }

        let skipped = self.skipped();
        if !skipped.is_empty() {
            out.push_str(&format!("skipped {} project(s):\n", skipped.len()));
            for e in &skipped {
                let reason = match &e.outcome {
                    ProjectOutcome::SkippedDependency => "dependency failed".to_string(),
                    ProjectOutcome::SkippedByOption { reason } => reason.clone(),
                    _ => unreachable!(),
                };
                out.push_str(&format!("  {} ({reason})\n", e.project));
            }
        }

        for msg in &self.post_build_messages {
            out.push_str(&format!("note: {msg}\n"));
        }

        if out.is_empty() {
            out.push_str("nothing to do\n");
        }
        out
    }
}

#[cfg(test)]
mod tests;
