// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Build-system auto-detection and plug-in contract (§4.5).
//!
//! ```text
//! detect(source_dir) -> BuildSystemKind
//!         |
//!         v
//!     dispatch(kind) -> Box<dyn BuildSystem>
//!         |
//! needs_reconfigure -> configure -> build -> test -> install -> uninstall
//! ```

pub mod autotools;
pub mod cmake;
mod common;
pub mod generic;
pub mod meson;
pub mod qmake;

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use tokio_util::sync::CancellationToken;

use crate::error::{BuildError, MobResult};
use crate::options::OptionTable;

/// A future boxed for storage behind a trait object, the way the teacher's
/// `Tool` trait does (there via `futures_util::future::BoxFuture`; here via
/// the equivalent two-line alias, since nothing else in this crate needs
/// the `futures-util` dependency).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Which build-system plug-in drives a project (§4.5 "Auto-detection").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildSystemKind {
    /// `CMakeLists.txt` plus KDE's Extra CMake Modules on the include path.
    KdeCmake,
    /// A plain `CMakeLists.txt` with no ECM.
    GenericCmake,
    Meson,
    Qmake,
    Autotools,
    Generic,
}

impl BuildSystemKind {
    /// Parses an `override-build-system` value (§4.1, §4.5).
    ///
    /// # Errors
    ///
    /// Returns a [`BuildError::UnsupportedOperationError`] for unrecognized names.
    pub fn from_override(name: &str) -> MobResult<Self> {
        match name {
            "KDE" => Ok(Self::KdeCmake),
            "Qt" | "qmake" => Ok(Self::Qmake),
            "generic" => Ok(Self::Generic),
            "autotools" => Ok(Self::Autotools),
            "meson" => Ok(Self::Meson),
            other => Err(BuildError::UnsupportedOperationError {
                system: other.to_string(),
                operation: "override-build-system".to_string(),
            }
            .into()),
        }
    }
}

/// Auto-detects the build system in `source_dir` by the priority order in
/// §4.5: KDE-CMake, then generic CMake, Meson, qmake, autotools, generic
/// Makefile. Returns `None` if nothing recognizable is present.
#[must_use]
pub fn detect(source_dir: &Path) -> Option<BuildSystemKind> {
    if source_dir.join("CMakeLists.txt").is_file() {
        if has_kde_cmake_modules(source_dir) {
            return Some(BuildSystemKind::KdeCmake);
        }
        return Some(BuildSystemKind::GenericCmake);
    }
    if source_dir.join("meson.build").is_file() {
        return Some(BuildSystemKind::Meson);
    }
    if has_pro_file(source_dir) {
        return Some(BuildSystemKind::Qmake);
    }
    if source_dir.join("configure").is_file() || source_dir.join("configure.ac").is_file() {
        return Some(BuildSystemKind::Autotools);
    }
    if source_dir.join("Makefile").is_file() {
        return Some(BuildSystemKind::Generic);
    }
    None
}

fn has_kde_cmake_modules(source_dir: &Path) -> bool {
    let markers = ["ECMConfig.cmake", "KDEInstallDirs.cmake", "KDECMakeSettings.cmake"];
    let candidates = [source_dir.join("cmake"), source_dir.join("CMakeModules"), source_dir.to_path_buf()];
    candidates.iter().any(|dir| markers.iter().any(|m| dir.join(m).is_file()))
}

fn has_pro_file(source_dir: &Path) -> bool {
    std::fs::read_dir(source_dir).is_ok_and(|entries| {
        entries
            .filter_map(Result::ok)
            .any(|e| e.path().extension().is_some_and(|ext| ext == "pro"))
    })
}

/// Everything a plug-in needs to act on one project's phases.
pub struct BuildContext<'a> {
    pub project: &'a str,
    pub source_dir: PathBuf,
    pub build_dir: PathBuf,
    pub install_dir: PathBuf,
    pub options: &'a OptionTable,
    pub cancel_token: CancellationToken,
    /// `--pretend`: plug-ins must not write anything, only log intent.
    pub pretend: bool,
    /// `--reconfigure` or persisted-option-change: force a fresh configure.
    pub reconfigure: bool,
    /// `--refresh-build`/`--refresh-build-first`: wipe the build dir first.
    pub refresh_build: bool,
}

impl<'a> BuildContext<'a> {
    #[must_use]
    pub fn opt(&self, name: &str) -> Option<String> {
        self.options.get(self.project, name)
    }

    #[must_use]
    pub fn opt_bool(&self, name: &str) -> bool {
        self.options.get_bool(self.project, name)
    }

    #[must_use]
    pub fn opt_or(&self, name: &str, default: &str) -> String {
        self.options.get_or(self.project, name, default)
    }
}

/// Common contract every build-system plug-in implements (§4.5).
pub trait BuildSystem: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether `configure` must run again before `build` (§4.5
    /// "Refresh/incremental policy").
    // TODO: also compare against the persisted option hash from the
    // persistent-state store once it tracks per-project configure options.
    fn needs_reconfigure(&self, ctx: &BuildContext<'_>) -> bool {
        ctx.reconfigure || ctx.refresh_build || !ctx.build_dir.is_dir() || ctx.build_dir.join(".refresh-me").is_file()
    }

    fn configure<'a>(&'a self, ctx: &'a BuildContext<'a>) -> BoxFuture<'a, MobResult<()>>;
    fn build<'a>(&'a self, ctx: &'a BuildContext<'a>) -> BoxFuture<'a, MobResult<()>>;

    /// Runs the test suite; only called when `run-tests` is set and the
    /// plug-in supports it (KDE-CMake, per §4.5).
    fn test<'a>(&'a self, ctx: &'a BuildContext<'a>) -> BoxFuture<'a, MobResult<()>> {
        let _ = ctx;
        Box::pin(async move {
            Err(BuildError::UnsupportedOperationError {
                system: self.name().to_string(),
                operation: "test".to_string(),
            }
            .into())
        })
    }

    fn install<'a>(&'a self, ctx: &'a BuildContext<'a>) -> BoxFuture<'a, MobResult<()>>;

    /// Uninstalls a previously-installed project; only cmake/ninja plug-ins
    /// support this (§4.5).
    fn uninstall<'a>(&'a self, ctx: &'a BuildContext<'a>) -> BoxFuture<'a, MobResult<()>> {
        let _ = ctx;
        Box::pin(async move {
            Err(BuildError::UnsupportedOperationError {
                system: self.name().to_string(),
                operation: "uninstall".to_string(),
            }
            .into())
        })
    }
}

/// Instantiates the plug-in for `kind`.
#[must_use]
pub fn dispatch(kind: BuildSystemKind) -> Box<dyn BuildSystem> {
    match kind {
        BuildSystemKind::KdeCmake => Box::new(cmake::CmakeDriver::kde()),
        BuildSystemKind::GenericCmake => Box::new(cmake::CmakeDriver::generic()),
        BuildSystemKind::Meson => Box::new(meson::MesonDriver),
        BuildSystemKind::Qmake => Box::new(qmake::QmakeDriver),
        BuildSystemKind::Autotools => Box::new(autotools::AutotoolsDriver),
        BuildSystemKind::Generic => Box::new(generic::GenericDriver),
    }
}
