// heartbeat-rs: Repository activity simulator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Status command: a read-only look at the working copy.
//!
//! ```text
//! repo.path --> GixBackend (no subprocess)
//!   work tree? branch? remotes? target branch local/remote?
//!   + today's heartbeat file and its update count
//! ```

#[cfg(test)]
mod tests;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::path::PathBuf;

use crate::activity::heartbeat::HeartbeatLog;
use crate::cli::status::StatusArgs;
use crate::config::Config;
use crate::error::{FsError, GitError, HeartbeatError, Result};
use crate::git::{GitQuery, GixBackend};

/// Snapshot of the working copy as the run command would see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub repo: PathBuf,
    pub work_tree: bool,
    pub current_branch: Option<String>,
    pub target_branch: String,
    pub remote: String,
    pub remotes: Vec<String>,
    pub local_branch_exists: bool,
    pub remote_branch_exists: bool,
    pub heartbeat_file: PathBuf,
    pub updates_today: usize,
}

impl StatusReport {
    /// Whether the configured remote exists.
    #[must_use]
    pub fn remote_configured(&self) -> bool {
        self.remotes.iter().any(|r| *r == self.remote)
    }
}

/// Main handler for the status command.
///
/// # Errors
///
/// Returns an error if the repository path does not exist or cannot be read.
pub fn run_status_command(args: &StatusArgs, config: &Config) -> Result<()> {
    let report = collect_status(config, &GixBackend, Local::now().date_naive())?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for line in format_status(&report) {
            println!("{line}");
        }
    }
    Ok(())
}

/// Gather the report for `today`.
///
/// A path that exists but is not a work tree yields a report with
/// `work_tree: false` rather than an error.
///
/// # Errors
///
/// Returns `GitError::PathNotFound` if `repo.path` does not exist, or a git
/// error if an existing repository cannot be read.
pub fn collect_status(config: &Config, git: &dyn GitQuery, today: NaiveDate) -> Result<StatusReport> {
    let configured = &config.repo.path;
    let repo = std::path::absolute(configured)
        .map_err(|e| HeartbeatError::from(FsError::io(configured, e)))?;
    if !repo.exists() {
        return Err(HeartbeatError::from(GitError::PathNotFound {
            path: repo.display().to_string(),
        })
        .into());
    }

    let branch = config.repo.branch.clone();
    let remote = config.repo.remote.clone();
    let log = HeartbeatLog::for_date(&repo.join(&config.heartbeat.dir), today);
    let mut report = StatusReport {
        repo: repo.clone(),
        work_tree: git.is_inside_work_tree(&repo),
        current_branch: None,
        target_branch: branch,
        remote,
        remotes: Vec::new(),
        local_branch_exists: false,
        remote_branch_exists: false,
        heartbeat_file: log.path().to_path_buf(),
        updates_today: log.update_count()?,
    };

    if report.work_tree {
        report.current_branch = git.current_branch(&repo)?;
        report.remotes = git.remotes(&repo)?;
        report.local_branch_exists = git.local_branch_exists(&repo, &report.target_branch)?;
        report.remote_branch_exists =
            git.remote_branch_exists(&repo, &report.remote, &report.target_branch)?;
    }
    Ok(report)
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// Aligned `label  value` lines for terminal output.
#[must_use]
pub fn format_status(report: &StatusReport) -> Vec<String> {
    let mut rows = vec![
        ("repository", report.repo.display().to_string()),
        ("work tree", yes_no(report.work_tree).to_string()),
    ];

    if report.work_tree {
        let remotes = if report.remotes.is_empty() {
            "(none)".to_string()
        } else {
            report.remotes.join(", ")
        };
        let upstream = if report.remote_configured() {
            format!(
                "{}/{}: {}",
                report.remote,
                report.target_branch,
                yes_no(report.remote_branch_exists)
            )
        } else {
            format!("{}: not configured (local-only)", report.remote)
        };
        rows.extend([
            (
                "current branch",
                report
                    .current_branch
                    .clone()
                    .unwrap_or_else(|| "(detached)".to_string()),
            ),
            (
                "target branch",
                format!(
                    "{} (exists: {})",
                    report.target_branch,
                    yes_no(report.local_branch_exists)
                ),
            ),
            ("remotes", remotes),
            ("upstream", upstream),
        ]);
    }

    rows.push((
        "heartbeat file",
        format!(
            "{} ({} update(s) today)",
            report.heartbeat_file.display(),
            report.updates_today
        ),
    ));

    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    rows.into_iter()
        .map(|(label, value)| format!("{label:<width$}  {value}"))
        .collect()
}
