// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The updater peer (§4.3, §4.4): walks the build plan in order, brings
//! each project's source tree to its target ref, and reports one terminal
//! message per project onto the bus.

use tracing::debug;

use super::bus::{BusMessage, Payload, Sender};
use crate::db::ProjectDatabase;
use crate::error::MobResult;
use crate::git::updater::{self, TargetRef, UpdateOutcome, UpdateRequest};
use crate::model::{BuildPlan, Phase, Project, SourceSpec};
use crate::options::OptionTable;

/// Drives the full plan through the updater and sends one terminal
/// message (plus a trailing `EndOfStream`) per project onto `tx`.
///
/// # Errors
///
/// Returns an error only if the bus itself closes unexpectedly; ordinary
/// git failures are reported as `UpdateFailed` bus messages, not `Err`.
pub async fn run(
    plan: &BuildPlan,
    options: &OptionTable,
    db: Option<&ProjectDatabase>,
    branch_group: &str,
    pretend: bool,
    tx: Sender,
) -> MobResult<()> {
    for project in plan.projects() {
        let payload = update_one(project, options, db, branch_group, pretend).await;
        send(&tx, project.name.clone(), payload).await?;
    }
    Ok(())
}

async fn update_one(
    project: &Project,
    options: &OptionTable,
    db: Option<&ProjectDatabase>,
    branch_group: &str,
    pretend: bool,
) -> Payload {
    if !project.has_phase(Phase::Update) {
        return Payload::UpdateSkipped { reason: "update phase disabled".to_string() };
    }
    if options.get_bool(&project.name, "no-src") {
        return Payload::UpdateSkipped { reason: "no-src".to_string() };
    }

    let repository_url = match &project.source {
        SourceSpec::Url(url) => url.clone(),
        SourceSpec::Database => match db.and_then(|d| d.lookup(&project.name)) {
            Some(entry) => entry.repo.clone(),
            None => {
                return Payload::UpdateFailed {
                    error_kind: updater::UpdateErrorKind::FilesystemError,
                    error_text: format!("no repository known for '{}'", project.name),
                };
            }
        },
    };

    let target = target_ref(project, options, db, branch_group);
    let git_user = options.get(&project.name, "git-user").and_then(|v| {
        let mut parts = v.splitn(2, ' ');
        Some((parts.next()?.to_string(), parts.next()?.to_string()))
    });

    let request = UpdateRequest {
        project_name: project.name.clone(),
        source_dir: project.source_dir.clone(),
        repository_url,
        target,
        git_user,
        hold_work_branches: options.get_bool(&project.name, "hold-work-branches"),
        disable_agent_check: options.get_bool(&project.name, "disable-agent-check"),
        pretend,
    };

    debug!(project = %project.name, "updater: running update");
    let outcome: anyhow::Result<UpdateOutcome> = match tokio::task::spawn_blocking(move || updater::update(&request)).await {
        Ok(result) => result,
        Err(join_err) => Err(anyhow::anyhow!(join_err.to_string())),
    };

    match outcome {
        Ok(UpdateOutcome::Ok { revision, files_changed }) => Payload::UpdateOk { revision, files_changed },
        Ok(UpdateOutcome::Skipped { reason }) => Payload::UpdateSkipped { reason },
        Ok(UpdateOutcome::Failed { error_kind, error_text }) => Payload::UpdateFailed { error_kind, error_text },
        Err(e) => Payload::UpdateFailed { error_kind: updater::UpdateErrorKind::FilesystemError, error_text: e.to_string() },
    }
}

fn target_ref(project: &Project, options: &OptionTable, db: Option<&ProjectDatabase>, branch_group: &str) -> TargetRef {
    if let Some(rev) = options.get(&project.name, "revision") {
        return TargetRef::Revision(rev);
    }
    if let Some(tag) = options.get(&project.name, "tag") {
        return TargetRef::Tag(tag);
    }
    if let Some(branch) = options.get(&project.name, "branch") {
        return TargetRef::Branch(branch);
    }
    if let Some(db) = db {
        if let Ok(branch) = db.resolve_branch(&project.name, branch_group) {
            return TargetRef::Branch(branch);
        }
    }
    TargetRef::Branch("master".to_string())
}

async fn send(tx: &Sender, project: String, payload: Payload) -> MobResult<()> {
    let terminal = payload.is_terminal();
    tx.send_async(BusMessage { project: project.clone(), payload })
        .await
        .map_err(|e| crate::error::SchedulerError::IPCError(e.to_string()))?;
    if terminal {
        tx.send_async(BusMessage { project, payload: Payload::EndOfStream })
            .await
            .map_err(|e| crate::error::SchedulerError::IPCError(e.to_string()))?;
    }
    Ok(())
}
