// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Autotools plug-in (§4.5): `./configure`, then `make`/`make install`.

use tracing::{debug, info};

use super::{BoxFuture, BuildContext, BuildSystem};
use crate::core::process::builder::ProcessBuilder;
use crate::error::{BuildError, MobResult};

pub struct AutotoolsDriver;

impl BuildSystem for AutotoolsDriver {
    fn name(&self) -> &'static str {
        "autotools"
    }

    fn configure<'a>(&'a self, ctx: &'a BuildContext<'a>) -> BoxFuture<'a, MobResult<()>> {
        Box::pin(async move {
            if ctx.pretend {
                info!(project = ctx.project, "[pretend] would run configure");
                return Ok(());
            }
            std::fs::create_dir_all(&ctx.build_dir).map_err(|e| BuildError::ConfigureError {
                project: ctx.project.to_string(),
                message: e.to_string(),
            })?;

            let script = ctx.source_dir.join("configure");
            let mut builder = ProcessBuilder::new(&script)
                .cwd(&ctx.build_dir)
                .arg(format!("--prefix={}", ctx.install_dir.display()));

            if let Some(extra) = ctx.opt("configure-flags") {
                builder = builder.args(extra.split_whitespace());
            }

            debug!(project = ctx.project, "running configure");
            let output = builder
                .run_with_cancellation(ctx.cancel_token.clone())
                .await
                .map_err(|e| BuildError::ConfigureError {
                    project: ctx.project.to_string(),
                    message: e.to_string(),
                })?;
            if !output.success() {
                return Err(BuildError::ConfigureError {
                    project: ctx.project.to_string(),
                    message: format!("configure exited with code {}", output.exit_code()),
                }
                .into());
            }
            Ok(())
        })
    }

    fn build<'a>(&'a self, ctx: &'a BuildContext<'a>) -> BoxFuture<'a, MobResult<()>> {
        Box::pin(async move { super::common::run_make(ctx, &[]).await })
    }

    fn install<'a>(&'a self, ctx: &'a BuildContext<'a>) -> BoxFuture<'a, MobResult<()>> {
        Box::pin(async move { super::common::run_make(ctx, &["install"]).await })
    }
}
