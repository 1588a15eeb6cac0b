// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `CMake` plug-in, covering both the KDE-CMake and generic-CMake variants
//! (§4.5). The two differ only in whether `test()` is supported and
//! whether `BUILD_TESTING=ON` is forced onto the configure step.

use tracing::{debug, info};

use super::{BoxFuture, BuildContext, BuildSystem};
use crate::core::process::builder::ProcessBuilder;
use crate::error::{BuildError, MobResult};

/// `CMake`-backed plug-in.
pub struct CmakeDriver {
    kde: bool,
}

impl CmakeDriver {
    #[must_use]
    pub const fn kde() -> Self {
        Self { kde: true }
    }

    #[must_use]
    pub const fn generic() -> Self {
        Self { kde: false }
    }

    fn cmake_builder() -> MobResult<ProcessBuilder> {
        ProcessBuilder::which("cmake").map_err(|e| BuildError::ConfigureError {
            project: String::new(),
            message: e.to_string(),
        }.into())
    }
}

impl BuildSystem for CmakeDriver {
    fn name(&self) -> &'static str {
        if self.kde { "kde-cmake" } else { "cmake" }
    }

    fn configure<'a>(&'a self, ctx: &'a BuildContext<'a>) -> BoxFuture<'a, MobResult<()>> {
        Box::pin(async move {
            if ctx.pretend {
                info!(project = ctx.project, "[pretend] would configure with cmake");
                return Ok(());
            }

            if ctx.refresh_build && ctx.build_dir.is_dir() {
                std::fs::remove_dir_all(&ctx.build_dir).map_err(|e| BuildError::ConfigureError {
                    project: ctx.project.to_string(),
                    message: format!("failed to clear build dir: {e}"),
                })?;
            }
            std::fs::create_dir_all(&ctx.build_dir).map_err(|e| BuildError::ConfigureError {
                project: ctx.project.to_string(),
                message: e.to_string(),
            })?;

            let mut builder = Self::cmake_builder()?
                .arg("-S")
                .arg(&ctx.source_dir)
                .arg("-B")
                .arg(&ctx.build_dir)
                .arg(format!("-DCMAKE_INSTALL_PREFIX={}", ctx.install_dir.display()));

            if let Some(generator) = ctx.opt("cmake-generator") {
                builder = builder.arg("-G").arg(generator);
            }
            if let Some(toolchain) = ctx.opt("cmake-toolchain") {
                builder = builder.arg(format!("-DCMAKE_TOOLCHAIN_FILE={toolchain}"));
            }
            if self.kde && ctx.opt_bool("run-tests") {
                builder = builder.arg("-DBUILD_TESTING=ON");
            }
            if let Some(extra) = ctx.opt("cmake-options") {
                for flag in extra.split_whitespace() {
                    builder = builder.arg(flag);
                }
            }

            debug!(project = ctx.project, "configuring with cmake");
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
                    message: format!("cmake exited with code {}", output.exit_code()),
                }
                .into());
            }
            Ok(())
        })
    }

    fn build<'a>(&'a self, ctx: &'a BuildContext<'a>) -> BoxFuture<'a, MobResult<()>> {
        Box::pin(async move {
            if ctx.pretend {
                info!(project = ctx.project, "[pretend] would build with cmake");
                return Ok(());
            }

            let mut builder = Self::cmake_builder()?.arg("--build").arg(&ctx.build_dir).arg("--parallel");

            if let Some(num_cores) = ctx.opt("num-cores") {
                builder = builder.arg(num_cores);
            }
            if let Some(extra) = ctx.opt("make-options").or_else(|| ctx.opt("ninja-options")) {
                builder = builder.arg("--").args(extra.split_whitespace());
            }

            debug!(project = ctx.project, "building with cmake");
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
                    message: format!("cmake --build exited with code {}", output.exit_code()),
                }
                .into());
            }
            Ok(())
        })
    }

    fn test<'a>(&'a self, ctx: &'a BuildContext<'a>) -> BoxFuture<'a, MobResult<()>> {
        Box::pin(async move {
            if !self.kde {
                return Err(BuildError::UnsupportedOperationError {
                    system: self.name().to_string(),
                    operation: "test".to_string(),
                }
                .into());
            }
            if ctx.pretend {
                info!(project = ctx.project, "[pretend] would run ctest");
                return Ok(());
            }

            let output = ProcessBuilder::which("ctest")
                .map_err(|e| BuildError::TestError {
                    project: ctx.project.to_string(),
                    message: e.to_string(),
                })?
                .arg("--test-dir")
                .arg(&ctx.build_dir)
                .arg("--output-on-failure")
                .run_with_cancellation(ctx.cancel_token.clone())
                .await
                .map_err(|e| BuildError::TestError {
                    project: ctx.project.to_string(),
                    message: e.to_string(),
                })?;
            if !output.success() {
                return Err(BuildError::TestError {
                    project: ctx.project.to_string(),
                    message: format!("ctest exited with code {}", output.exit_code()),
                }
                .into());
            }
            Ok(())
        })
    }

    fn install<'a>(&'a self, ctx: &'a BuildContext<'a>) -> BoxFuture<'a, MobResult<()>> {
        Box::pin(async move {
            if ctx.pretend {
                info!(project = ctx.project, "[pretend] would install with cmake");
                return Ok(());
            }

            if ctx.opt_bool("use-clean-install") {
                let _ = self.uninstall(ctx).await;
            }

            let mut builder = Self::cmake_builder()?.arg("--install").arg(&ctx.build_dir);
            if let Some(prefix) = ctx.opt("make-install-prefix") {
                builder = builder.arg("--prefix").arg(prefix);
            }

            debug!(project = ctx.project, "installing with cmake");
            let output = builder
                .run_with_cancellation(ctx.cancel_token.clone())
                .await
                .map_err(|e| BuildError::InstallError {
                    project: ctx.project.to_string(),
                    message: e.to_string(),
                })?;
            if !output.success() {
                return Err(BuildError::InstallError {
                    project: ctx.project.to_string(),
                    message: format!("cmake --install exited with code {}", output.exit_code()),
                }
                .into());
            }
            Ok(())
        })
    }

    fn uninstall<'a>(&'a self, ctx: &'a BuildContext<'a>) -> BoxFuture<'a, MobResult<()>> {
        Box::pin(async move {
            if ctx.pretend {
                info!(project = ctx.project, "[pretend] would run the uninstall target");
                return Ok(());
            }

            let output = Self::cmake_builder()?
                .arg("--build")
                .arg(&ctx.build_dir)
                .arg("--target")
                .arg("uninstall")
                .run_with_cancellation(ctx.cancel_token.clone())
                .await
                .map_err(|e| BuildError::InstallError {
                    project: ctx.project.to_string(),
                    message: e.to_string(),
                })?;
            if !output.success() {
                return Err(BuildError::UnsupportedOperationError {
                    system: self.name().to_string(),
                    operation: "uninstall".to_string(),
                }
                .into());
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kde_driver_reports_kde_name_and_generic_does_not() {
        assert_eq!(CmakeDriver::kde().name(), "kde-cmake");
        assert_eq!(CmakeDriver::generic().name(), "cmake");
    }
}
