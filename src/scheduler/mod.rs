// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The phase scheduler (§4.3): runs a build plan through three
//! cooperating peers connected by a message bus.
//!
//! ```text
//! updater --(bus)--> monitor --(bus)--> builder --> Report
//!
//! `async: false` degrades to fully sequential: updater drains to
//! completion before the builder (and monitor) start at all.
//! ```

pub mod builder;
pub mod bus;
pub mod monitor;
pub mod updater;

use tokio_util::sync::CancellationToken;

use crate::db::ProjectDatabase;
use crate::error::MobResult;
use crate::logging::tree::LogTree;
use crate::model::BuildPlan;
use crate::options::OptionTable;
use crate::report::{Report, Termination};

/// Runs the three-peer pipeline over `plan` to completion and returns the
/// end-of-run report.
///
/// # Errors
///
/// Returns an error if the bus itself fails; individual project update or
/// build failures are captured in the returned [`Report`] instead.
#[allow(clippy::too_many_arguments)]
pub async fn run(
    plan: &BuildPlan,
    options: &OptionTable,
    db: Option<&ProjectDatabase>,
    branch_group: &str,
    pretend: bool,
    reconfigure: bool,
    refresh_build: bool,
    log_tree: &LogTree,
    cancel_token: CancellationToken,
) -> MobResult<Report> {
    let stop_on_failure = options.get_bool("", "stop-on-failure");
    let sequential = !options.get("", "async").is_none_or(|v| parse_bool(&v));

    let mut report = if sequential {
        run_sequential(plan, options, db, branch_group, pretend, reconfigure, refresh_build, log_tree, cancel_token.clone()).await?
    } else {
        run_concurrent(
            plan,
            options,
            db,
            branch_group,
            pretend,
            reconfigure,
            refresh_build,
            log_tree,
            cancel_token.clone(),
            stop_on_failure,
        )
        .await?
    };

    report.termination = Some(if cancel_token.is_cancelled() { Termination::GracefulStop } else { Termination::Completed });
    Ok(report)
}

#[allow(clippy::too_many_arguments)]
async fn run_concurrent(
    plan: &BuildPlan,
    options: &OptionTable,
    db: Option<&ProjectDatabase>,
    branch_group: &str,
    pretend: bool,
    reconfigure: bool,
    refresh_build: bool,
    log_tree: &LogTree,
    cancel_token: CancellationToken,
    stop_on_failure: bool,
) -> MobResult<Report> {
    let (updater_tx, updater_rx) = bus::channel();
    let (builder_tx, builder_rx) = bus::channel();

    let plan_for_updater = plan.clone();
    let options_for_updater = options.clone();
    let db_for_updater = db.cloned();
    let branch_group_owned = branch_group.to_string();

    let updater_handle = tokio::spawn(async move {
        updater::run(&plan_for_updater, &options_for_updater, db_for_updater.as_ref(), &branch_group_owned, pretend, updater_tx).await
    });
    let monitor_handle = tokio::spawn(monitor::run(updater_rx, builder_tx));

    let report =
        builder::run(plan, options, log_tree, cancel_token, stop_on_failure, pretend, reconfigure, refresh_build, builder_rx).await?;

    let _ = updater_handle.await;
    let _ = monitor_handle.await;

    Ok(report)
}

#[allow(clippy::too_many_arguments)]
async fn run_sequential(
    plan: &BuildPlan,
    options: &OptionTable,
    db: Option<&ProjectDatabase>,
    branch_group: &str,
    pretend: bool,
    reconfigure: bool,
    refresh_build: bool,
    log_tree: &LogTree,
    cancel_token: CancellationToken,
) -> MobResult<Report> {
    let (tx, rx) = bus::channel();
    updater::run(plan, options, db, branch_group, pretend, tx).await?;
    let stop_on_failure = options.get_bool("", "stop-on-failure");
    builder::run(plan, options, log_tree, cancel_token, stop_on_failure, pretend, reconfigure, refresh_build, rx).await
}

fn parse_bool(value: &str) -> bool {
    !matches!(value, "false" | "0" | "no")
}
