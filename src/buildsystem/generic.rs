// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Generic plug-in (§4.5): a bare `Makefile` with no configuration step,
//! or a `custom-build-command` override.

use tracing::info;

use super::{BoxFuture, BuildContext, BuildSystem};
use crate::core::process::builder::ProcessBuilder;
use crate::error::{BuildError, MobResult};

pub struct GenericDriver;

impl BuildSystem for GenericDriver {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn needs_reconfigure(&self, _ctx: &BuildContext<'_>) -> bool {
        // No configure step exists for a bare Makefile project.
        false
    }

    fn configure<'a>(&'a self, _ctx: &'a BuildContext<'a>) -> BoxFuture<'a, MobResult<()>> {
        Box::pin(async move { Ok(()) })
    }

    fn build<'a>(&'a self, ctx: &'a BuildContext<'a>) -> BoxFuture<'a, MobResult<()>> {
        Box::pin(async move {
            if let Some(custom) = ctx.opt("custom-build-command") {
                return run_custom(ctx, &custom).await;
            }
            super::common::run_make(ctx, &[]).await
        })
    }

    fn install<'a>(&'a self, ctx: &'a BuildContext<'a>) -> BoxFuture<'a, MobResult<()>> {
        Box::pin(async move { super::common::run_make(ctx, &["install"]).await })
    }
}

async fn run_custom(ctx: &BuildContext<'_>, command: &str) -> MobResult<()> {
    if ctx.pretend {
        info!(project = ctx.project, command, "[pretend] would run custom build command");
        return Ok(());
    }

    let output = ProcessBuilder::raw(command)
        .cwd(&ctx.source_dir)
        .run_with_cancellation(ctx.cancel_token.clone())
        .await
        .map_err(|e| BuildError::BuildError {
            project: ctx.project.to_string(),
            message: e.to_string(),
        })?;
    if !output.success() {
        return Err(BuildError::BuildError {
            project: ctx.project.to_string(),
            message: format!("custom build command exited with code {}", output.exit_code()),
        }
        .into());
    }
    Ok(())
}
