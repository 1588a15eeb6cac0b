// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The builder peer (§4.3, §4.5): drives build-system setup, build, test,
//! and install for each project in plan order, after that project's
//! terminal update message has arrived.

use std::collections::{BTreeSet, VecDeque};

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use super::bus::{BusMessage, Payload, Receiver};
use crate::buildsystem::{self, BuildContext, BuildSystemKind};
use crate::error::MobResult;
use crate::logging::tree::LogTree;
use crate::model::{BuildPlan, Phase, Project};
use crate::options::OptionTable;
use crate::report::{ProjectOutcome, Report};

/// Runs the builder peer to completion, consuming terminal update messages
/// from `rx` and producing the final [`Report`].
///
/// Terminal messages that arrive out of plan order are buffered until the
/// earlier projects in the plan have been accounted for (§4.3 "builder
/// processes terminal messages in plan order").
///
/// # Errors
///
/// Returns an error only for conditions that should abort the whole run
/// (the bus closing early); individual project failures are recorded in
/// the returned [`Report`], not propagated.
#[allow(clippy::too_many_arguments)]
pub async fn run(
    plan: &BuildPlan,
    options: &OptionTable,
    log_tree: &LogTree,
    cancel_token: CancellationToken,
    stop_on_failure: bool,
    pretend: bool,
    reconfigure: bool,
    refresh_build: bool,
    rx: Receiver,
) -> MobResult<Report> {
    let mut order: VecDeque<&str> = plan.projects().iter().map(|p| p.name.as_str()).collect();
    let mut pending: std::collections::BTreeMap<String, Payload> = std::collections::BTreeMap::new();
    let mut failed_dependencies: BTreeSet<String> = BTreeSet::new();
    let mut report = Report::new();

    'drain: while let Some(&next_name) = order.front() {
        let payload = loop {
            if let Some(p) = pending.remove(next_name) {
                break p;
            }
            match rx.recv_async().await {
                Ok(BusMessage { project, payload }) if payload.is_terminal() => {
                    if project == next_name {
                        break payload;
                    }
                    pending.insert(project, payload);
                }
                Ok(BusMessage { payload: Payload::PostBuildMessage { text }, .. }) => {
                    report.post_build_message(text);
                }
                Ok(_) => continue,
                Err(_) => break 'drain,
            }
        };

        order.pop_front();
        let project = plan.find(next_name).expect("plan order tracks plan membership");

        if cancel_token.is_cancelled() {
            report.record(project.name.clone(), ProjectOutcome::NotAttempted);
            continue;
        }

        if project.dependencies.iter().any(|d| failed_dependencies.contains(d)) {
            failed_dependencies.insert(project.name.clone());
            report.record(project.name.clone(), ProjectOutcome::SkippedDependency);
            continue;
        }

        match payload {
            Payload::UpdateFailed { error_text, .. } => {
                failed_dependencies.insert(project.name.clone());
                let log_path = log_tree.phase_log_path(&project.name, "git-update.log").unwrap_or_default();
                let _ = log_tree.mark_error(&project.name, &log_path);
                let _ = log_tree.record_status(&project.name, "update-failed");
                report.record(
                    project.name.clone(),
                    ProjectOutcome::Failed { error_log: log_path, message: error_text },
                );
                if stop_on_failure {
                    cancel_token.cancel();
                }
            }
            Payload::UpdateSkipped { reason } => {
                let _ = log_tree.record_status(&project.name, "update-skipped");
                build_one(
                    project, options, log_tree, &cancel_token, stop_on_failure, pretend, reconfigure, refresh_build,
                    &mut failed_dependencies, &mut report, Some(reason),
                )
                .await;
            }
            Payload::UpdateOk { .. } => {
                let _ = log_tree.record_status(&project.name, "updated");
                build_one(
                    project, options, log_tree, &cancel_token, stop_on_failure, pretend, reconfigure, refresh_build,
                    &mut failed_dependencies, &mut report, None,
                )
                .await;
            }
            _ => {}
        }
    }

    Ok(report)
}

#[allow(clippy::too_many_arguments)]
async fn build_one(
    project: &Project,
    options: &OptionTable,
    log_tree: &LogTree,
    cancel_token: &CancellationToken,
    stop_on_failure: bool,
    pretend: bool,
    reconfigure: bool,
    refresh_build: bool,
    failed_dependencies: &mut BTreeSet<String>,
    report: &mut Report,
    update_skip_reason: Option<String>,
) {
    if options.get_bool(&project.name, "no-build") {
        let reason = update_skip_reason.unwrap_or_else(|| "no-build".to_string());
        report.record(project.name.clone(), ProjectOutcome::SkippedByOption { reason });
        return;
    }

    let started = std::time::Instant::now();
    let kind = match &project.forced_build_system {
        Some(name) => BuildSystemKind::from_override(name),
        None => buildsystem::detect(&project.source_dir).ok_or(crate::error::MobError::Other(
            format!("no recognizable build system in {}", project.source_dir.display()).into_boxed_str(),
        )),
    };

    let kind = match kind {
        Ok(k) => k,
        Err(e) => {
            fail(project, log_tree, failed_dependencies, report, e.to_string());
            if stop_on_failure {
                cancel_token.cancel();
            }
            return;
        }
    };

    let driver = buildsystem::dispatch(kind);
    let ctx = BuildContext {
        project: &project.name,
        source_dir: project.source_dir.clone(),
        build_dir: project.build_dir.clone(),
        install_dir: project.install_dir.clone(),
        options,
        cancel_token: cancel_token.clone(),
        pretend,
        reconfigure,
        refresh_build,
    };

    let result = run_phases(project, driver.as_ref(), &ctx).await;

    match result {
        Ok(()) => {
            let _ = log_tree.record_status(&project.name, "built");
            report.record(project.name.clone(), ProjectOutcome::Built { duration: started.elapsed() });
            info!(project = %project.name, elapsed = ?started.elapsed(), "build complete");
        }
        Err(e) => {
            fail(project, log_tree, failed_dependencies, report, e.to_string());
            if stop_on_failure {
                cancel_token.cancel();
            }
        }
    }
}

async fn run_phases(
    project: &Project,
    driver: &dyn buildsystem::BuildSystem,
    ctx: &BuildContext<'_>,
) -> MobResult<()> {
    if project.has_phase(Phase::BuildSystemSetup) && driver.needs_reconfigure(ctx) {
        driver.configure(ctx).await?;
    }
    if project.has_phase(Phase::Build) {
        driver.build(ctx).await?;
        if ctx.opt_bool("run-tests") {
            let _ = driver.test(ctx).await;
        }
    }
    if project.has_phase(Phase::Uninstall) {
        driver.uninstall(ctx).await?;
    }
    if project.has_phase(Phase::Install) {
        driver.install(ctx).await?;
    }
    Ok(())
}

fn fail(
    project: &Project,
    log_tree: &LogTree,
    failed_dependencies: &mut BTreeSet<String>,
    report: &mut Report,
    message: String,
) {
    failed_dependencies.insert(project.name.clone());
    let log_path = log_tree.phase_log_path(&project.name, "build.log").unwrap_or_default();
    let _ = log_tree.mark_error(&project.name, &log_path);
    let _ = log_tree.record_status(&project.name, "build-failed");
    error!(project = %project.name, %message, "build failed");
    report.record(project.name.clone(), ProjectOutcome::Failed { error_log: log_path, message });
}

#[cfg(test)]
mod tests;
