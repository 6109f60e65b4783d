// heartbeat-rs: Repository activity simulator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Activity simulator: one run of heartbeat commits.
//!
//! ```text
//! run_cycle(rng)
//!   |
//!   +-- ensure_repository   path exists? inside work tree?   (fatal)
//!   +-- ensure_branch       exists locally? checkout : create
//!   |                       remote?  no  -> LocalOnly (info)
//!   |                                yes -> fetch --all
//!   |                                       remote branch? yes -> rebase (failure: abort, fatal)
//!   |                                                      no  -> UpstreamCreated
//!   +-- HeartbeatLog::ensure  .heartbeat/YYYY-MM-DD.md
//!   +-- N = rand[min..=max]
//!   +-- for i in 1..=N
//!   |     append line, add --all, commit (stamp?), sleep (not after last)
//!   +-- push  (-u in UpstreamCreated, skipped in LocalOnly)
//! ```
//!
//! Git, the clock, the pause and the random source are all injected, so
//! the whole cycle runs in tests without processes or waiting.

pub mod heartbeat;
pub mod pacing;
pub mod schedule;


use anyhow::Context;
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime};
use rand::Rng;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{FsError, GitError, HeartbeatResult, Result};
use crate::git::GitBackend;

use heartbeat::HeartbeatLog;
use pacing::{Clock, Sleeper, SystemClock, ThreadSleeper};
use schedule::{random_timestamp, sample_commit_count, sample_delay};

/// How the branch relates to the remote after [`Simulator::ensure_branch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RemoteMode {
    /// Rebased onto the existing remote branch.
    Synced,
    /// Remote branch was missing; the final push sets upstream tracking.
    UpstreamCreated,
    /// No such remote; commits stay local and nothing is pushed.
    LocalOnly,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub date: NaiveDate,
    pub commits: u32,
    pub log_file: PathBuf,
    pub remote_mode: RemoteMode,
    pub pushed: bool,
}

/// Drives one run against a working copy.
pub struct Simulator<'a, G: ?Sized> {
    config: &'a Config,
    git: &'a G,
    sleeper: Box<dyn Sleeper + 'a>,
    clock: Box<dyn Clock + 'a>,
}

impl<'a, G: GitBackend + ?Sized> Simulator<'a, G> {
    /// Simulator with the system clock and real sleeping.
    pub fn new(config: &'a Config, git: &'a G) -> Self {
        Self {
            config,
            git,
            sleeper: Box::new(ThreadSleeper),
            clock: Box::new(SystemClock),
        }
    }

    #[must_use]
    pub fn with_sleeper(mut self, sleeper: impl Sleeper + 'a) -> Self {
        self.sleeper = Box::new(sleeper);
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'a) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Resolve `repo.path` and check it is a git working copy.
    ///
    /// # Errors
    ///
    /// Returns `GitError::PathNotFound` if the path does not exist and
    /// `GitError::NotAGitRepo` if it is not inside a work tree.
    pub fn ensure_repository(&self) -> HeartbeatResult<PathBuf> {
        let configured = &self.config.repo.path;
        let path = std::path::absolute(configured).map_err(|e| FsError::io(configured, e))?;

        if !path.exists() {
            return Err(GitError::PathNotFound {
                path: path.display().to_string(),
            }
            .into());
        }
        if !self.git.is_inside_work_tree(&path) {
            return Err(GitError::NotAGitRepo {
                path: path.display().to_string(),
            }
            .into());
        }

        debug!(repo = %path.display(), "working copy ok");
        Ok(path)
    }

    /// Switch to the target branch (creating it if missing) and sync it with the remote.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if checkout, branch creation or fetching fails,
    /// or `GitError::RebaseConflict` if the rebase onto an existing remote
    /// branch fails.
    pub fn ensure_branch(&self, repo: &Path) -> HeartbeatResult<RemoteMode> {
        let branch = self.config.repo.branch.as_str();
        let remote = self.config.repo.remote.as_str();

        if self.git.local_branch_exists(repo, branch)? {
            self.git.checkout(repo, branch)?;
        } else {
            info!(branch, "branch does not exist locally, creating it");
            self.git.create_branch(repo, branch)?;
        }

        if !self.git.remotes(repo)?.iter().any(|name| name == remote) {
            info!(
                remote,
                "no remote configured, running in local-only mode (nothing will be pushed)"
            );
            return Ok(RemoteMode::LocalOnly);
        }

        self.git.fetch_all(repo)?;

        // HEAD may still be unborn here, so the tracking push waits for the commits.
        if !self.git.remote_branch_exists(repo, remote, branch)? {
            info!(remote, branch, "no upstream branch yet, will push with tracking");
            return Ok(RemoteMode::UpstreamCreated);
        }

        if let Err(err) = self.git.rebase_onto_remote(repo, remote, branch) {
            warn!(remote, branch, error = %err, "rebase failed, aborting it");
            if let Err(abort_err) = self.git.abort_rebase(repo) {
                warn!(error = %abort_err, "rebase --abort failed");
            }
            let message = match err.as_git() {
                Some(GitError::CommandFailed { message, .. }) => message.clone(),
                _ => err.to_string(),
            };
            return Err(GitError::RebaseConflict {
                remote: remote.to_string(),
                branch: branch.to_string(),
                message,
            }
            .into());
        }

        debug!(remote, branch, "rebased onto remote");
        Ok(RemoteMode::Synced)
    }

    /// Commit message for commit `index` of `total`, with the forged stamp if any.
    #[must_use]
    pub fn commit_message(
        &self,
        date: NaiveDate,
        index: u32,
        total: u32,
        stamp: Option<&DateTime<FixedOffset>>,
    ) -> String {
        let prefix = &self.config.commits.message_prefix;
        let date = date.format("%Y-%m-%d");
        match stamp {
            Some(stamp) => format!(
                "{prefix} {date} ({index}/{total}) @ {}",
                stamp.format("%Y-%m-%d %H:%M:%S")
            ),
            None => format!("{prefix} {date} ({index}/{total})"),
        }
    }

    /// Run a full cycle: validate, commit N times, push.
    ///
    /// Commits already made when a later step fails are left in place.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or any git or filesystem step fails.
    pub fn run_cycle<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<RunSummary> {
        let repo = self.ensure_repository()?;
        let remote_mode = self.ensure_branch(&repo)?;

        let date = self.clock.now().date_naive();
        let log = HeartbeatLog::for_date(&repo.join(&self.config.heartbeat.dir), date);
        log.ensure()?;

        let total = sample_commit_count(rng, self.config.commits.count_range());
        info!(commits = total, file = %log.path().display(), "generating commits");

        for index in 1..=total {
            self.commit_once(&repo, &log, index, total, rng)
                .with_context(|| format!("commit {index}/{total} failed"))?;

            if index < total {
                let pause = sample_delay(rng, self.config.commits.delay_range());
                debug!(secs = pause.as_secs(), "pausing before next commit");
                self.sleeper.sleep(pause);
            }
        }

        let pushed = if remote_mode == RemoteMode::LocalOnly {
            info!("local-only mode, skipping push");
            false
        } else {
            let (remote, branch) = (&self.config.repo.remote, &self.config.repo.branch);
            let set_upstream = remote_mode == RemoteMode::UpstreamCreated;
            self.git
                .push(&repo, remote, branch, set_upstream)
                .with_context(|| format!("failed to push {branch} to {remote}"))?;
            info!(remote = %remote, branch = %branch, "pushed");
            true
        };

        Ok(RunSummary {
            date,
            commits: total,
            log_file: log.path().to_path_buf(),
            remote_mode,
            pushed,
        })
    }

    fn commit_once<R: Rng + ?Sized>(
        &self,
        repo: &Path,
        log: &HeartbeatLog,
        index: u32,
        total: u32,
        rng: &mut R,
    ) -> Result<()> {
        let now = self.clock.now();
        log.append(index, now.time())?;
        self.git.stage_all(repo)?;

        let heartbeat = &self.config.heartbeat;
        let stamp = heartbeat.randomize_dates.then(|| {
            let local = random_timestamp(
                rng,
                heartbeat.window_start,
                heartbeat.window_end,
                log.date(),
            );
            with_offset(local, *now.offset())
        });

        let message = self.commit_message(log.date(), index, total, stamp.as_ref());
        self.git.commit(repo, &message, stamp.as_ref())?;
        info!(index, total, stamp = ?stamp.map(|s| s.to_rfc3339()), "committed");
        Ok(())
    }
}

/// Attach `offset` to a wall-clock time without shifting it.
fn with_offset(local: NaiveDateTime, offset: FixedOffset) -> DateTime<FixedOffset> {
    let utc = local - Duration::seconds(i64::from(offset.local_minus_utc()));
    DateTime::from_naive_utc_and_offset(utc, offset)
}
