// heartbeat-rs: Repository activity simulator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Run command arguments.
//!
//! Every flag is an override of one configuration key:
//!
//! ```text
//! --repo              repo.path
//! --branch            repo.branch
//! --remote            repo.remote
//! --min-commits       commits.min
//! --max-commits       commits.max
//! --min-delay         commits.min_delay_secs
//! --max-delay         commits.max_delay_secs
//! --heartbeat-dir     heartbeat.dir
//! --no-randomize-dates heartbeat.randomize_dates = false
//! --window-start      heartbeat.window_start
//! --window-end        heartbeat.window_end
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::config::types::TimeOfDay;

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// Working copy to commit into.
    #[arg(short = 'r', long = "repo", value_name = "DIR")]
    pub repo: Option<PathBuf>,

    /// Branch to commit on; created if missing.
    #[arg(short = 'b', long, value_name = "NAME")]
    pub branch: Option<String>,

    /// Remote to sync with and push to.
    #[arg(long, value_name = "NAME")]
    pub remote: Option<String>,

    /// Lower bound of the number of commits.
    #[arg(long = "min-commits", value_name = "N")]
    pub min_commits: Option<u32>,

    /// Upper bound of the number of commits.
    #[arg(long = "max-commits", value_name = "N")]
    pub max_commits: Option<u32>,

    /// Shortest pause between commits, in seconds.
    #[arg(long = "min-delay", value_name = "SECS")]
    pub min_delay: Option<u64>,

    /// Longest pause between commits, in seconds.
    #[arg(long = "max-delay", value_name = "SECS")]
    pub max_delay: Option<u64>,

    /// Directory of the daily files, relative to the working copy.
    #[arg(long = "heartbeat-dir", value_name = "DIR")]
    pub heartbeat_dir: Option<PathBuf>,

    /// Keeps the real commit time instead of a random one inside the window.
    #[arg(long = "no-randomize-dates")]
    pub no_randomize_dates: bool,

    /// Start of the timestamp window (HH:MM).
    #[arg(long = "window-start", value_name = "HH:MM")]
    pub window_start: Option<TimeOfDay>,

    /// End of the timestamp window (HH:MM); earlier than the start wraps past midnight.
    #[arg(long = "window-end", value_name = "HH:MM")]
    pub window_end: Option<TimeOfDay>,
}

impl RunArgs {
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<(String, String)> {
        let mut overrides = Vec::new();
        let mut push = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                overrides.push((key.to_string(), value));
            }
        };

        push("repo.path", self.repo.as_ref().map(|p| p.display().to_string()));
        push("repo.branch", self.branch.clone());
        push("repo.remote", self.remote.clone());
        push("commits.min", self.min_commits.map(|n| n.to_string()));
        push("commits.max", self.max_commits.map(|n| n.to_string()));
        push("commits.min_delay_secs", self.min_delay.map(|n| n.to_string()));
        push("commits.max_delay_secs", self.max_delay.map(|n| n.to_string()));
        push(
            "heartbeat.dir",
            self.heartbeat_dir.as_ref().map(|p| p.display().to_string()),
        );
        push(
            "heartbeat.randomize_dates",
            self.no_randomize_dates.then(|| "false".to_string()),
        );
        push("heartbeat.window_start", self.window_start.map(|t| t.to_string()));
        push("heartbeat.window_end", self.window_end.map(|t| t.to_string()));

        overrides
    }
}
