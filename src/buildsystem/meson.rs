// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Meson plug-in (§4.5).

use tracing::{debug, info};

use super::{BoxFuture, BuildContext, BuildSystem};
use crate::core::process::builder::ProcessBuilder;
use crate::error::{BuildError, MobResult};

pub struct MesonDriver;

impl MesonDriver {
    fn meson() -> MobResult<ProcessBuilder> {
        ProcessBuilder::which("meson").map_err(|e| BuildError::ConfigureError {
            project: String::new(),
            message: e.to_string(),
        }.into())
    }
}

impl BuildSystem for MesonDriver {
    fn name(&self) -> &'static str {
        "meson"
    }

    fn configure<'a>(&'a self, ctx: &'a BuildContext<'a>) -> BoxFuture<'a, MobResult<()>> {
        Box::pin(async move {
            if ctx.pretend {
                info!(project = ctx.project, "[pretend] would configure with meson");
                return Ok(());
            }
            if ctx.refresh_build && ctx.build_dir.is_dir() {
                std::fs::remove_dir_all(&ctx.build_dir).map_err(|e| BuildError::ConfigureError {
                    project: ctx.project.to_string(),
                    message: e.to_string(),
                })?;
            }

            let mut builder = Self::meson()?
                .arg("setup")
                .arg(&ctx.build_dir)
                .arg(&ctx.source_dir)
                .arg(format!("--prefix={}", ctx.install_dir.display()));

            if let Some(extra) = ctx.opt("meson-options") {
                builder = builder.args(extra.split_whitespace());
            }

            debug!(project = ctx.project, "configuring with meson");
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
                    message: format!("meson setup exited with code {}", output.exit_code()),
                }
                .into());
            }
            Ok(())
        })
    }

    fn build<'a>(&'a self, ctx: &'a BuildContext<'a>) -> BoxFuture<'a, MobResult<()>> {
        Box::pin(async move {
            if ctx.pretend {
                info!(project = ctx.project, "[pretend] would build with ninja");
                return Ok(());
            }

            let mut builder = ProcessBuilder::which("ninja")
                .map_err(|e| BuildError::BuildError {
                    project: ctx.project.to_string(),
                    message: e.to_string(),
                })?
                .cwd(&ctx.build_dir);
            if let Some(extra) = ctx.opt("ninja-options") {
                builder = builder.args(extra.split_whitespace());
            }

            debug!(project = ctx.project, "building with ninja");
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
                    message: format!("ninja exited with code {}", output.exit_code()),
                }
                .into());
            }
            Ok(())
        })
    }

    fn test<'a>(&'a self, ctx: &'a BuildContext<'a>) -> BoxFuture<'a, MobResult<()>> {
        Box::pin(async move {
            if ctx.pretend {
                info!(project = ctx.project, "[pretend] would run meson test");
                return Ok(());
            }
            let output = Self::meson()?
                .arg("test")
                .arg("-C")
                .arg(&ctx.build_dir)
                .run_with_cancellation(ctx.cancel_token.clone())
                .await
                .map_err(|e| BuildError::TestError {
                    project: ctx.project.to_string(),
                    message: e.to_string(),
                })?;
            if !output.success() {
                return Err(BuildError::TestError {
                    project: ctx.project.to_string(),
                    message: format!("meson test exited with code {}", output.exit_code()),
                }
                .into());
            }
            Ok(())
        })
    }

    fn install<'a>(&'a self, ctx: &'a BuildContext<'a>) -> BoxFuture<'a, MobResult<()>> {
        Box::pin(async move {
            if ctx.pretend {
                info!(project = ctx.project, "[pretend] would install with ninja");
                return Ok(());
            }
            let output = ProcessBuilder::which("ninja")
                .map_err(|e| BuildError::InstallError {
                    project: ctx.project.to_string(),
                    message: e.to_string(),
                })?
                .cwd(&ctx.build_dir)
                .arg("install")
                .run_with_cancellation(ctx.cancel_token.clone())
                .await
                .map_err(|e| BuildError::InstallError {
                    project: ctx.project.to_string(),
                    message: e.to_string(),
                })?;
            if !output.success() {
                return Err(BuildError::InstallError {
                    project: ctx.project.to_string(),
                    message: format!("ninja install exited with code {}", output.exit_code()),
                }
                .into());
            }
            Ok(())
        })
    }
}
