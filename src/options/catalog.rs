// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The catalog of recognized option names (§4.1).
//!
//! `set()` rejects any name not listed here (unless it starts with `_`,
//! which marks a user variable referenceable only through `${_name}`
//! substitution). Most options *replace* the inherited value; a handful
//! *append* global and project-scoped values together, separated by a
//! space (flag lists like `cmake-options`).

/// How a project-scoped value combines with its inherited (group/global)
/// value in [`super::OptionTable::get`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composition {
    /// The most specific scope wins outright.
    Replace,
    /// Global and project values are concatenated, global first.
    Append,
}

const APPEND_OPTIONS: &[&str] = &[
    "cmake-options",
    "configure-flags",
    "cxxflags",
    "make-options",
    "ninja-options",
    "meson-options",
    "qmake-options",
];

/// The full list of recognized option names, grouped as in §4.1 for
/// readability; the grouping itself has no runtime significance.
const KNOWN_OPTIONS: &[&str] = &[
    // Paths
    "source-dir",
    "build-dir",
    "install-dir",
    "log-dir",
    "qt-install-dir",
    "persistent-data-file",
    "libname",
    // Concurrency
    "async",
    "num-cores",
    "num-cores-low-mem",
    "niceness",
    "taskset-cpu-list",
    "use-idle-io-priority",
    // Project selection
    "ignore-projects",
    "use-projects",
    "branch",
    "tag",
    "revision",
    "branch-group",
    "hold-work-branches",
    "include-dependencies",
    "use-inactive-projects",
    // Build behavior
    "build-when-unchanged",
    "stop-on-failure",
    "refresh-build-first",
    "run-tests",
    "use-clean-install",
    "remove-after-install",
    "purge-old-logs",
    "compile-commands-export",
    "compile-commands-linking",
    "directory-layout",
    "override-build-system",
    "cmake-generator",
    "cmake-toolchain",
    "cmake-options",
    "configure-flags",
    "cxxflags",
    "make-options",
    "ninja-options",
    "meson-options",
    "qmake-options",
    "custom-build-command",
    "do-not-compile",
    "make-install-prefix",
    // Phase toggles
    "no-src",
    "no-build",
    "no-install",
    "build-only",
    "install-only",
    "uninstall",
    "filter-out-phases",
    // Git
    "git-push-protocol",
    "git-repository-base",
    "git-user",
    "disable-agent-check",
    "ssh-identity-file",
    "repository",
    // Environment
    "set-env",
    "binpath",
    "libpath",
    "source-when-start-program",
];

/// The full list of recognized option names, for introspection (`forge
/// query options`).
#[must_use]
pub fn known_options() -> &'static [&'static str] {
    KNOWN_OPTIONS
}

/// Whether `name` is recognized, i.e. a `set()` call with it should succeed.
/// Names starting with `_` (user variables) are always recognized.
#[must_use]
pub fn is_known(name: &str) -> bool {
    name.starts_with('_') || KNOWN_OPTIONS.contains(&name)
}

/// The composition mode for `name`. Unknown names default to `Replace`;
/// callers should have already rejected unknown names via [`is_known`].
#[must_use]
pub fn composition(name: &str) -> Composition {
    if APPEND_OPTIONS.contains(&name) {
        Composition::Append
    } else {
        Composition::Replace
    }
}
