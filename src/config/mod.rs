// heartbeat-rs: Repository activity simulator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for heartbeat-rs.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. heartbeat.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. HEARTBEAT_<SECTION>__<KEY> env vars
//! 5. --set section.key=value
//! 6. dedicated CLI flags (run --branch, ...)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! HEARTBEAT_REPO__BRANCH=dev            → repo.branch = "dev"
//! HEARTBEAT_COMMITS__MAX=3              → commits.max = 3
//! HEARTBEAT_HEARTBEAT__WINDOW_END=18:00 → heartbeat.window_end = "18:00"
//! ```
//!
//! The resolved [`Config`] is immutable for the rest of the run and handed
//! out by reference.

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Component, Path};

use crate::error::{ConfigError, HeartbeatResult, Result};

use loader::ConfigLoader;
use types::{CommitsConfig, GlobalConfig, HeartbeatConfig, RepoConfig, ToolsConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Target working copy.
    pub repo: RepoConfig,
    /// Commit count and pacing.
    pub commits: CommitsConfig,
    /// Daily heartbeat file and timestamp window.
    pub heartbeat: HeartbeatConfig,
    /// External tools.
    pub tools: ToolsConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use heartbeat_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("heartbeat.toml")
    ///     .with_env_prefix("HEARTBEAT")
    ///     .set("repo.branch", "main")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// fails validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or fails validation.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Check cross-field constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for inverted bounds, an empty
    /// branch or remote name, or a heartbeat directory that is empty, absolute
    /// or climbs out of the working copy with `..`.
    pub fn validate(&self) -> HeartbeatResult<()> {
        let invalid = |section: &str, key: &str, message: String| ConfigError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            message,
        };

        if self.commits.min > self.commits.max {
            return Err(invalid(
                "commits",
                "min",
                format!(
                    "min ({}) must not exceed max ({})",
                    self.commits.min, self.commits.max
                ),
            )
            .into());
        }
        if self.commits.min_delay_secs > self.commits.max_delay_secs {
            return Err(invalid(
                "commits",
                "min_delay_secs",
                format!(
                    "min_delay_secs ({}) must not exceed max_delay_secs ({})",
                    self.commits.min_delay_secs, self.commits.max_delay_secs
                ),
            )
            .into());
        }
        if self.repo.branch.trim().is_empty() {
            return Err(invalid("repo", "branch", "must not be empty".to_string()).into());
        }
        if self.repo.remote.trim().is_empty() {
            return Err(invalid("repo", "remote", "must not be empty".to_string()).into());
        }
        let dir = &self.heartbeat.dir;
        let escapes = dir.components().any(|c| matches!(c, Component::ParentDir));
        if dir.as_os_str().is_empty() || dir.is_absolute() || escapes {
            return Err(invalid(
                "heartbeat",
                "dir",
                format!(
                    "must be a relative directory inside the working copy, got '{}'",
                    dir.display()
                ),
            )
            .into());
        }
        Ok(())
    }

    /// Format configuration options for display, one `key = value` per line.
    ///
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_repo_options(&mut options);
        self.format_commits_options(&mut options);
        self.format_heartbeat_options(&mut options);
        options.insert("tools.git".into(), self.tools.git.display().to_string());

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        options.insert(
            "global.log_format".into(),
            format!("{:?}", self.global.log_format).to_lowercase(),
        );
        options.insert(
            "global.show_target".into(),
            self.global.show_target.to_string(),
        );
    }

    fn format_repo_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("repo.path".into(), self.repo.path.display().to_string());
        options.insert("repo.branch".into(), self.repo.branch.clone());
        options.insert("repo.remote".into(), self.repo.remote.clone());
    }

    fn format_commits_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("commits.min".into(), self.commits.min.to_string());
        options.insert("commits.max".into(), self.commits.max.to_string());
        options.insert(
            "commits.min_delay_secs".into(),
            self.commits.min_delay_secs.to_string(),
        );
        options.insert(
            "commits.max_delay_secs".into(),
            self.commits.max_delay_secs.to_string(),
        );
        options.insert(
            "commits.message_prefix".into(),
            self.commits.message_prefix.clone(),
        );
    }

    fn format_heartbeat_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "heartbeat.dir".into(),
            self.heartbeat.dir.display().to_string(),
        );
        options.insert(
            "heartbeat.randomize_dates".into(),
            self.heartbeat.randomize_dates.to_string(),
        );
        options.insert(
            "heartbeat.window_start".into(),
            self.heartbeat.window_start.to_string(),
        );
        options.insert(
            "heartbeat.window_end".into(),
            self.heartbeat.window_end.to_string(),
        );
    }
}
