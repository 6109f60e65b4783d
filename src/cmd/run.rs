// heartbeat-rs: Repository activity simulator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Run command implementation for heartbeat-rs.

use tracing::info;

use crate::activity::{RemoteMode, RunSummary, Simulator};
use crate::config::Config;
use crate::error::Result;
use crate::git::ShellBackend;

/// Main handler for the run command: one full commit cycle.
///
/// # Errors
///
/// Returns an error if git cannot be found, the working copy is invalid, or
/// any git or filesystem step of the cycle fails.
pub fn run_run_command(config: &Config) -> Result<()> {
    let git = ShellBackend::locate(&config.tools.git)?;
    info!(git = %git.program().display(), "using git");

    let summary = Simulator::new(config, &git).run_cycle(&mut rand::thread_rng())?;
    for line in format_summary(&summary) {
        println!("{line}");
    }
    Ok(())
}

/// Human-readable summary of a finished run.
#[must_use]
pub fn format_summary(summary: &RunSummary) -> Vec<String> {
    let push = match summary.remote_mode {
        RemoteMode::LocalOnly => "skipped (no remote)",
        RemoteMode::Synced | RemoteMode::UpstreamCreated if summary.pushed => "done",
        RemoteMode::Synced | RemoteMode::UpstreamCreated => "not done",
    };
    vec![
        format!(
            "{} commit(s) for {}",
            summary.commits,
            summary.date.format("%Y-%m-%d")
        ),
        format!("heartbeat file: {}", summary.log_file.display()),
        format!("push: {push}"),
    ]
}
