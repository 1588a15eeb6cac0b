// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!              MobError (~24 bytes)
//!                     |
//!   +------+------+------+------+------+------+------+
//!   |      |      |      |      |      |      |      |
//!   v      v      v      v      v      v      v      v
//! Bail   Git    Cfg    Db    Build  Sched  Proc    Fs  Io/Other
//!        Box    Box   Box    Box    Box    Box    Box  Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Git       Gix, CommandFailed, AuthError, NonFastForward, BranchNotFound
//!   Config    ParseError, MissingKey, InvalidValue
//!   Db        UnknownProject, DependencyCycle
//!   Build     Configure, Build, Test, Install, UnsupportedOperation
//!   Scheduler IPCError, InternalError
//!   Process   SpawnFailed, NonZeroExit, Timeout
//!   Fs        NotFound, PermissionDenied, IoError
//!
//! All variants boxed => MobError fits in 24 bytes.
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`MobError`].
pub type MobResult<T> = std::result::Result<T, MobError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum MobError {
    /// Fatal error that should terminate the application.
    #[error("fatal error: {0}")]
    Bailed(Box<str>),

    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Project database or dependency resolution error.
    #[error("database error: {0}")]
    Db(#[from] Box<DbError>),

    /// Build-system driver error.
    #[error("build error: {0}")]
    Build(#[from] Box<BuildError>),

    /// Phase scheduler error.
    #[error("scheduler error: {0}")]
    Scheduler(#[from] Box<SchedulerError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

/// Create a fatal [`MobError::Bailed`] that terminates the application.
pub fn bail_out(message: impl Into<String>) -> MobError {
    MobError::Bailed(message.into().into_boxed_str())
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for MobError {
                fn from(err: $error) -> Self {
                    MobError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    ConfigError => Config,
    DbError => Db,
    BuildError => Build,
    SchedulerError => Scheduler,
    ProcessError => Process,
    FsError => Fs,
    std::io::Error => Io,
}

// --- Gix Errors ---

/// Wrapper for gix-specific errors.
///
/// gix has multiple error types that are converted through this enum.
/// Large error types are boxed to keep enum size manageable.
#[derive(Debug, Error)]
pub enum GixError {
    /// Failed to discover repository from path.
    #[error("failed to discover repository: {0}")]
    Discover(#[from] Box<gix::discover::Error>),

    /// Failed to open repository.
    #[error("failed to open repository: {0}")]
    Open(#[from] Box<gix::open::Error>),

    /// Failed to access repository index.
    #[error("failed to access index: {0}")]
    Index(#[from] gix::worktree::open_index::Error),

    /// Failed to get HEAD reference.
    #[error("failed to get head reference: {0}")]
    Head(#[from] gix::reference::find::existing::Error),

    /// Repository has no worktree (bare repository).
    #[error("repository has no worktree (bare repository)")]
    BareRepository,
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Repository not found at the specified path.
    #[error("repository not found: {path}")]
    RepoNotFound { path: String },

    /// Git command execution failed.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    /// Error from gix library.
    #[error("gix error: {0}")]
    Gix(#[from] GixError),

    /// Uncommitted changes detected when clean working tree required.
    #[error("uncommitted changes in {path}")]
    UncommittedChanges { path: String },

    /// Branch not found.
    #[error("branch not found: {branch}")]
    BranchNotFound { branch: String },

    /// Remote not found.
    #[error("remote not found: {remote}")]
    RemoteNotFound { remote: String },

    /// Clone operation failed.
    #[error("failed to clone {url}: {message}")]
    CloneFailed { url: String, message: String },

    /// Checkout operation failed.
    #[error("failed to checkout {what}: {message}")]
    CheckoutFailed { what: String, message: String },

    /// Authentication with the remote failed (bad SSH key, missing agent, denied credentials).
    #[error("authentication failed for {url}: {message}")]
    AuthError { url: String, message: String },

    /// A merge would not fast-forward and the update policy forbids a non-fast-forward merge.
    #[error("local branch {branch} in {path} has diverged from upstream (non-fast-forward)")]
    NonFastForwardError { path: String, branch: String },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// Configuration file not found.
    #[error("config file not found: {0}")]
    NotFound(String),

    /// An option name is not recognized by the option-name catalog.
    #[error("unknown option '{option}' in node '{node}'")]
    UnknownOption { node: String, option: String },

    /// `include` directive referenced a file that could not be read.
    #[error("failed to include '{path}': {message}")]
    IncludeFailed { path: String, message: String },
}

// --- Project Database Errors ---

/// Project-database and dependency-resolution errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// A project or group name referenced in the rc-file or on the command
    /// line does not exist in the project database.
    #[error("unknown project or group: {0}")]
    UnknownProject(String),

    /// The dependency graph contains a cycle, making a linear build order
    /// impossible.
    #[error("dependency cycle detected: {cycle}")]
    DependencyCycle { cycle: String },

    /// The metadata repository could not be loaded or parsed.
    #[error("failed to load project database from '{path}': {message}")]
    LoadFailed { path: String, message: String },
}

// --- Build-system Errors ---

/// Build-system driver errors (configure/build/test/install phases).
#[derive(Debug, Error)]
pub enum BuildError {
    /// The configure step failed (e.g. cmake/meson generation error).
    #[error("configure failed for '{project}': {message}")]
    ConfigureError { project: String, message: String },

    /// The build step failed.
    #[error("build failed for '{project}': {message}")]
    BuildError { project: String, message: String },

    /// The test step failed.
    #[error("tests failed for '{project}': {message}")]
    TestError { project: String, message: String },

    /// The install step failed.
    #[error("install failed for '{project}': {message}")]
    InstallError { project: String, message: String },

    /// The requested operation is not supported by this build-system plug-in.
    #[error("operation '{operation}' is not supported for build system '{system}'")]
    UnsupportedOperationError { system: String, operation: String },
}

// --- Phase Scheduler Errors ---

/// Phase-scheduler (updater/monitor/builder) errors.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// The inter-phase message bus closed unexpectedly.
    #[error("scheduler bus error: {0}")]
    IPCError(String),

    /// Internal scheduler invariant was violated.
    #[error("internal scheduler error: {0}")]
    InternalError(String),
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with non-zero status.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },

    /// Process timed out.
    #[error("process '{command}' timed out after {timeout_secs} seconds")]
    Timeout { command: String, timeout_secs: u64 },

    /// Failed to read process output.
    #[error("failed to read output from process '{command}': {message}")]
    OutputError { command: String, message: String },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// Permission denied.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
