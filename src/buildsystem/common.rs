// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared `make`-invocation helper for the qmake/autotools/generic plug-ins.

use tracing::info;

use super::BuildContext;
use crate::core::process::builder::ProcessBuilder;
use crate::error::{BuildError, MobResult};

pub(super) async fn run_make(ctx: &BuildContext<'_>, targets: &[&str]) -> MobResult<()> {
    if ctx.pretend {
        info!(project = ctx.project, targets = ?targets, "[pretend] would run make");
        return Ok(());
    }

    let mut builder = ProcessBuilder::which("make")
        .map_err(|e| BuildError::BuildError {
            project: ctx.project.to_string(),
            message: e.to_string(),
        })?
        .cwd(&ctx.build_dir)
        .args(targets.iter().copied());

    if let Some(extra) = ctx.opt("make-options") {
        builder = builder.args(extra.split_whitespace());
    }

    let output = builder
        .run_with_cancellation(ctx.cancel_token.clone())
        .await
        .map_err(|e| BuildError::BuildError {
            project: ctx.project.to_string(),
            message: e.to_string(),
        })?;
    if !output.success() {
        return Err(BuildError::BuildError {
            project: ctx.project.to_string(),
            message: format!("make exited with code {}", output.exit_code()),
        }
        .into());
    }
    Ok(())
}
