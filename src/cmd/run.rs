// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The default command (§4.2-4.3, §6): resolve the plan, run its phases
//! through the scheduler, print the report, and persist state.

use std::path::PathBuf;

use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::cli::global::GlobalOptions;
use crate::error::Result;
use crate::logging::tree::LogTree;
use crate::report::{ProjectOutcome, Report};
use crate::resolver::slicing::apply_slicing;
use crate::scheduler;
use crate::state::PersistentState;

use super::{load_context, slice_spec};

/// Runs the resolved build plan to completion.
///
/// # Errors
///
/// Returns an error if the rc-file cannot be parsed, the project database
/// cannot be synced, the plan cannot be resolved, or the scheduler's
/// message bus fails outright. Individual project failures are captured
/// in the returned [`Report`] instead.
pub async fn run(global: &GlobalOptions) -> Result<Report> {
    let ctx = load_context(global)?;

    if global.metadata_only {
        return Ok(Report::new());
    }

    let log_root = ctx.options.expand("", &ctx.options.get_or("", "log-dir", "logs"))?;
    let log_tree = LogTree::create(&PathBuf::from(log_root))?;

    let state_path = PersistentState::locate(ctx.rc_path.as_deref(), ctx.found_in_cwd);
    let mut state = PersistentState::load(&state_path)?;

    let spec = slice_spec(global, &state);
    let plan = apply_slicing(ctx.plan, &spec);

    let cancel_token = CancellationToken::new();
    let signal_token = cancel_token.clone();
    let signal_task = tokio::spawn(watch_signals(signal_token));

    let report = scheduler::run(
        &plan,
        &ctx.options,
        ctx.db.as_ref(),
        &global.branch_group,
        global.pretend,
        global.reconfigure,
        global.refresh_build,
        &log_tree,
        cancel_token,
    )
    .await?;

    signal_task.abort();

    if !global.pretend {
        for entry in &report.entries {
            let mut project_state = state.project(&entry.project);
            project_state.previously_failed = matches!(entry.outcome, ProjectOutcome::Failed { .. });
            state.set_project(&entry.project, project_state);
        }
        state.last_run_timestamp = Some(chrono::Local::now().to_rfc3339());
        state.save(&state_path)?;
    }

    print!("{}", report.render());

    Ok(report)
}

/// Cancels `token` on `SIGHUP`/`SIGINT`/`SIGTERM`, letting the scheduler
/// finish whichever phase is currently running before stopping (§5, §6).
async fn watch_signals(token: CancellationToken) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut sighup = match signal(SignalKind::hangup()) {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "failed to install SIGHUP handler");
                return;
            }
        };
        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                return;
            }
        };

        tokio::select! {
            _ = sighup.recv() => warn!("SIGHUP received, stopping after the current phase"),
            _ = sigterm.recv() => warn!("SIGTERM received, stopping after the current phase"),
            _ = tokio::signal::ctrl_c() => warn!("SIGINT received, stopping after the current phase"),
        }
    }
    #[cfg(not(unix))]
    {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("ctrl-c received, stopping after the current phase");
        }
    }

    token.cancel();
}
