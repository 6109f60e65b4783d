// heartbeat-rs: Repository activity simulator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend abstraction layer.
//!
//! ```text
//! GitQuery (read)     --> GixBackend (pure Rust gix), ShellBackend
//! GitMutation (write) --> ShellBackend (git CLI)
//! GitBackend = GitQuery + GitMutation
//! ```
//!
//! Methods take `&self` so the simulator can run against an in-memory fake.

use chrono::{DateTime, FixedOffset};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::trace;

use crate::error::{GitError, GixError, HeartbeatResult, ProcessError};

// --- Query Trait (Read-only operations) ---

/// Read-only git query operations.
pub trait GitQuery {
    /// Check if path is inside a git work tree.
    fn is_inside_work_tree(&self, path: &Path) -> bool;

    /// Get current branch name (None if HEAD is detached).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository discovery or head resolution fails.
    fn current_branch(&self, path: &Path) -> HeartbeatResult<Option<String>>;

    /// Names of the configured remotes.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the repository cannot be read.
    fn remotes(&self, path: &Path) -> HeartbeatResult<Vec<String>>;

    /// Check whether `refs/heads/<branch>` exists.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the reference lookup itself fails.
    fn local_branch_exists(&self, path: &Path, branch: &str) -> HeartbeatResult<bool>;

    /// Check whether `refs/remotes/<remote>/<branch>` exists (as of the last fetch).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the reference lookup itself fails.
    fn remote_branch_exists(
        &self,
        path: &Path,
        remote: &str,
        branch: &str,
    ) -> HeartbeatResult<bool>;
}

// --- Mutation Trait (Write operations) ---

/// Git mutation operations that modify repository state.
pub trait GitMutation {
    /// Fetch all remotes.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the fetch fails.
    fn fetch_all(&self, path: &Path) -> HeartbeatResult<()>;

    /// Switch to an existing branch.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the checkout fails.
    fn checkout(&self, path: &Path, branch: &str) -> HeartbeatResult<()>;

    /// Create a branch from the current state and switch to it.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the branch cannot be created.
    fn create_branch(&self, path: &Path, branch: &str) -> HeartbeatResult<()>;

    /// Rebase the current branch onto `<remote>/<branch>`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the rebase stops (conflicts, dirty tree).
    fn rebase_onto_remote(&self, path: &Path, remote: &str, branch: &str) -> HeartbeatResult<()>;

    /// Abort an in-progress rebase.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if there is no rebase to abort.
    fn abort_rebase(&self, path: &Path) -> HeartbeatResult<()>;

    /// Stage every change in the working copy.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if staging fails.
    fn stage_all(&self, path: &Path) -> HeartbeatResult<()>;

    /// Commit the index. With a timestamp, it becomes both author and committer date.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the commit fails.
    fn commit(
        &self,
        path: &Path,
        message: &str,
        timestamp: Option<&DateTime<FixedOffset>>,
    ) -> HeartbeatResult<()>;

    /// Push `branch` to `remote`, optionally setting upstream tracking.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the push is rejected or the remote is unreachable.
    fn push(
        &self,
        path: &Path,
        remote: &str,
        branch: &str,
        set_upstream: bool,
    ) -> HeartbeatResult<()>;
}

/// Everything the commit cycle needs from git.
pub trait GitBackend: GitQuery + GitMutation {}

impl<T: GitQuery + GitMutation + ?Sized> GitBackend for T {}

// --- GixBackend Implementation (Pure Rust) ---

/// Pure Rust git backend using gix.
///
/// Read-only; answers queries without spawning subprocesses.
#[derive(Debug, Clone, Copy, Default)]
pub struct GixBackend;

impl GixBackend {
    fn discover(path: &Path) -> HeartbeatResult<gix::Repository> {
        gix::discover(path).map_err(|e| GitError::Gix(GixError::Discover(Box::new(e))).into())
    }

    fn reference_exists(path: &Path, name: &str) -> HeartbeatResult<bool> {
        let repo = Self::discover(path)?;
        match repo.find_reference(name) {
            Ok(_) => Ok(true),
            Err(gix::reference::find::existing::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(GitError::Gix(GixError::Reference(e)).into()),
        }
    }
}

impl GitQuery for GixBackend {
    fn is_inside_work_tree(&self, path: &Path) -> bool {
        gix::discover(path).is_ok_and(|repo| repo.workdir().is_some())
    }

    fn current_branch(&self, path: &Path) -> HeartbeatResult<Option<String>> {
        let repo = Self::discover(path)?;
        if repo.workdir().is_none() {
            return Err(GitError::Gix(GixError::BareRepository).into());
        }
        let head = repo
            .head_name()
            .map_err(|e| GitError::Gix(GixError::Reference(e)))?;
        Ok(head.map(|name| name.shorten().to_string()))
    }

    fn remotes(&self, path: &Path) -> HeartbeatResult<Vec<String>> {
        let repo = Self::discover(path)?;
        Ok(repo
            .remote_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect())
    }

    fn local_branch_exists(&self, path: &Path, branch: &str) -> HeartbeatResult<bool> {
        Self::reference_exists(path, &format!("refs/heads/{branch}"))
    }

    fn remote_branch_exists(
        &self,
        path: &Path,
        remote: &str,
        branch: &str,
    ) -> HeartbeatResult<bool> {
        Self::reference_exists(path, &format!("refs/remotes/{remote}/{branch}"))
    }
}

// --- ShellBackend Implementation (Git CLI) ---

/// Shell-based git backend using the git CLI.
#[derive(Debug, Clone)]
pub struct ShellBackend {
    program: PathBuf,
}

impl Default for ShellBackend {
    fn default() -> Self {
        Self::new("git")
    }
}

impl ShellBackend {
    /// Use `program` as-is; a bare name is resolved by the OS at spawn time.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Resolve `program` through PATH up front so a missing git fails before any mutation.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` if the executable cannot be found.
    pub fn locate(program: &Path) -> HeartbeatResult<Self> {
        let resolved = which::which(program).map_err(|_| ProcessError::ExecutableNotFound {
            name: program.display().to_string(),
        })?;
        Ok(Self::new(resolved))
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Execute a git command. Sets `GCM_INTERACTIVE=never` and `GIT_TERMINAL_PROMPT=0`.
    pub(crate) fn git_command(&self, args: &[&str], cwd: &Path) -> HeartbeatResult<String> {
        self.git_command_with_env(args, cwd, &[])
    }

    fn git_command_with_env(
        &self,
        args: &[&str],
        cwd: &Path,
        env: &[(&str, String)],
    ) -> HeartbeatResult<String> {
        let command_line = format!("git {}", args.join(" "));
        trace!(cwd = %cwd.display(), command = %command_line, "running");

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(cwd)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .envs(env.iter().map(|(k, v)| (*k, v.as_str())))
            .output()
            .map_err(|source| ProcessError::SpawnFailed {
                command: command_line.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: command_line,
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Git's internal date format, `@<unix seconds> <+hhmm>`.
fn git_date(timestamp: &DateTime<FixedOffset>) -> String {
    format!("@{} {}", timestamp.timestamp(), timestamp.format("%z"))
}

impl GitQuery for ShellBackend {
    fn is_inside_work_tree(&self, path: &Path) -> bool {
        self.git_command(&["rev-parse", "--is-inside-work-tree"], path)
            .is_ok_and(|out| out == "true")
    }

    fn current_branch(&self, path: &Path) -> HeartbeatResult<Option<String>> {
        self.git_command(&["symbolic-ref", "--short", "-q", "HEAD"], path)
            .map_or_else(|_| Ok(None), |branch| Ok(Some(branch)))
    }

    fn remotes(&self, path: &Path) -> HeartbeatResult<Vec<String>> {
        let output = self.git_command(&["remote"], path)?;
        Ok(output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }

    fn local_branch_exists(&self, path: &Path, branch: &str) -> HeartbeatResult<bool> {
        let reference = format!("refs/heads/{branch}");
        Ok(self
            .git_command(&["show-ref", "--verify", "--quiet", &reference], path)
            .is_ok())
    }

    fn remote_branch_exists(
        &self,
        path: &Path,
        remote: &str,
        branch: &str,
    ) -> HeartbeatResult<bool> {
        let reference = format!("refs/remotes/{remote}/{branch}");
        Ok(self
            .git_command(&["show-ref", "--verify", "--quiet", &reference], path)
            .is_ok())
    }
}

impl GitMutation for ShellBackend {
    fn fetch_all(&self, path: &Path) -> HeartbeatResult<()> {
        self.git_command(&["fetch", "--all", "--quiet"], path)?;
        Ok(())
    }

    fn checkout(&self, path: &Path, branch: &str) -> HeartbeatResult<()> {
        // Trailing `--` keeps git from reading the name as a pathspec.
        self.git_command(&["checkout", "-q", branch, "--"], path)?;
        Ok(())
    }

    fn create_branch(&self, path: &Path, branch: &str) -> HeartbeatResult<()> {
        self.git_command(&["checkout", "-q", "-b", branch], path)?;
        Ok(())
    }

    fn rebase_onto_remote(&self, path: &Path, remote: &str, branch: &str) -> HeartbeatResult<()> {
        let upstream = format!("{remote}/{branch}");
        self.git_command(&["rebase", "-q", &upstream], path)?;
        Ok(())
    }

    fn abort_rebase(&self, path: &Path) -> HeartbeatResult<()> {
        self.git_command(&["rebase", "--abort"], path)?;
        Ok(())
    }

    fn stage_all(&self, path: &Path) -> HeartbeatResult<()> {
        self.git_command(&["add", "--all"], path)?;
        Ok(())
    }

    fn commit(
        &self,
        path: &Path,
        message: &str,
        timestamp: Option<&DateTime<FixedOffset>>,
    ) -> HeartbeatResult<()> {
        let env: Vec<(&str, String)> = timestamp
            .map(|ts| {
                let date = git_date(ts);
                vec![("GIT_AUTHOR_DATE", date.clone()), ("GIT_COMMITTER_DATE", date)]
            })
            .unwrap_or_default();
        self.git_command_with_env(&["commit", "-q", "-m", message], path, &env)?;
        Ok(())
    }

    fn push(
        &self,
        path: &Path,
        remote: &str,
        branch: &str,
        set_upstream: bool,
    ) -> HeartbeatResult<()> {
        let mut args = vec!["push", "-q"];
        if set_upstream {
            args.push("--set-upstream");
        }
        args.extend([remote, branch]);
        self.git_command(&args, path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
