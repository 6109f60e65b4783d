// heartbeat-rs: Repository activity simulator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!          HeartbeatError (~24 bytes)
//!                   |
//!   +------+-----+-----+------+
//!   v      v     v     v      v
//! Bail    Git   Cfg  Proc    Fs
//! Box<str> Box  Box  Box     Box
//!
//! Sub-errors (unboxed internally):
//!   Git     PathNotFound, NotAGitRepo, CommandFailed, RebaseConflict, Gix
//!   Config  ParseError, InvalidValue
//!   Process ExecutableNotFound, SpawnFailed
//!   Fs      IoError
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`HeartbeatError`].
pub type HeartbeatResult<T> = std::result::Result<T, HeartbeatError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum HeartbeatError {
    /// Fatal error that should terminate the application.
    #[error("fatal error: {0}")]
    Bailed(Box<str>),

    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),
}

impl HeartbeatError {
    /// Returns the git sub-error, if this is one.
    #[must_use]
    pub fn as_git(&self) -> Option<&GitError> {
        match self {
            Self::Git(err) => Some(err),
            _ => None,
        }
    }
}

/// Create a fatal [`HeartbeatError::Bailed`] that terminates the application.
pub fn bail_out(message: impl Into<String>) -> HeartbeatError {
    HeartbeatError::Bailed(message.into().into_boxed_str())
}

// --- From implementations for boxing ---

macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for HeartbeatError {
                fn from(err: $error) -> Self {
                    HeartbeatError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    ConfigError => Config,
    ProcessError => Process,
    FsError => Fs,
}

// --- Gix Errors ---

/// Wrapper for gix-specific errors.
#[derive(Debug, Error)]
pub enum GixError {
    /// Failed to discover repository from path.
    #[error("failed to discover repository: {0}")]
    Discover(#[from] Box<gix::discover::Error>),

    /// Failed to look up a reference.
    #[error("failed to find reference: {0}")]
    Reference(#[from] gix::reference::find::existing::Error),

    /// Repository has no worktree (bare repository).
    #[error("repository has no worktree (bare repository)")]
    BareRepository,
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Configured repository path does not exist.
    #[error("repository path does not exist: {path} (check repo.path)")]
    PathNotFound { path: String },

    /// Path exists but is not inside a git work tree.
    #[error("not a git working copy: {path} (run `git init` or point repo.path at a clone)")]
    NotAGitRepo { path: String },

    /// Git command execution failed.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    /// Rebase onto an existing remote branch failed and was aborted.
    #[error(
        "rebase of '{branch}' onto '{remote}/{branch}' failed and was aborted: {message} \
         (commit or stash local changes, or resolve the divergence manually)"
    )]
    RebaseConflict {
        remote: String,
        branch: String,
        message: String,
    },

    /// Error from gix library.
    #[error("gix error: {0}")]
    Gix(#[from] GixError),
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration.
    #[error("failed to parse config '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
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
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.display().to_string(),
            source,
        }
    }
}
