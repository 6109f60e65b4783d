// heartbeat-rs: Repository activity simulator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for heartbeat-rs.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, RepoConfig, CommitsConfig, HeartbeatConfig, ToolsConfig
//! TimeOfDay: "HH:MM" | "HH:MM:SS"
//! ```

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::ops::RangeInclusive;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::logging::{LogConfig, LogFormat, LogLevel};

/// A wall-clock time of day, parsed from `HH:MM` or `HH:MM:SS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Create from hour and minute; `None` if out of range.
    #[must_use]
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    #[must_use]
    pub const fn time(self) -> NaiveTime {
        self.0
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(time: NaiveTime) -> Self {
        Self(time)
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.second() == 0 {
            write!(f, "{}", self.0.format("%H:%M"))
        } else {
            write!(f, "{}", self.0.format("%H:%M:%S"))
        }
    }
}

impl std::str::FromStr for TimeOfDay {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        NaiveTime::parse_from_str(s, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
            .map(Self)
            .map_err(|_| ConfigError::InvalidValue {
                section: "heartbeat".to_string(),
                key: "window".to_string(),
                message: format!("expected 'HH:MM' or 'HH:MM:SS', got '{s}'"),
            })
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

/// Global options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file; no file log when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Format of the file log.
    pub log_format: LogFormat,
    /// Print the event target (module path) on console lines.
    pub show_target: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
            log_format: LogFormat::Text,
            show_target: false,
        }
    }
}

impl GlobalConfig {
    /// Logging setup for this section; an empty `log_file` counts as unset.
    #[must_use]
    pub fn log_config(&self) -> LogConfig {
        LogConfig::builder()
            .with_console_level(self.output_log_level)
            .with_file_level(self.file_log_level)
            .maybe_with_log_file(
                self.log_file
                    .as_ref()
                    .filter(|p| !p.as_os_str().is_empty())
                    .map(|p| p.display().to_string()),
            )
            .with_file_format(self.log_format)
            .with_show_target(self.show_target)
            .build()
    }
}

/// Target working copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    /// Working copy root, relative paths resolve against the current directory.
    pub path: PathBuf,
    /// Branch that receives the commits.
    pub branch: String,
    /// Remote to sync with and push to.
    pub remote: String,
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
            branch: "main".to_string(),
            remote: "origin".to_string(),
        }
    }
}

/// Commit count and pacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommitsConfig {
    /// Minimum commits per run (inclusive).
    pub min: u32,
    /// Maximum commits per run (inclusive).
    pub max: u32,
    /// Minimum pause between commits, in seconds.
    pub min_delay_secs: u64,
    /// Maximum pause between commits, in seconds.
    pub max_delay_secs: u64,
    /// Leading text of every commit message.
    pub message_prefix: String,
}

impl Default for CommitsConfig {
    fn default() -> Self {
        Self {
            min: 5,
            max: 15,
            min_delay_secs: 5,
            max_delay_secs: 25,
            message_prefix: "auto: heartbeat".to_string(),
        }
    }
}

impl CommitsConfig {
    #[must_use]
    pub const fn count_range(&self) -> RangeInclusive<u32> {
        self.min..=self.max
    }

    #[must_use]
    pub const fn delay_range(&self) -> RangeInclusive<u64> {
        self.min_delay_secs..=self.max_delay_secs
    }
}

/// Daily heartbeat file and timestamp randomization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeartbeatConfig {
    /// Directory (relative to the working copy) holding one file per day.
    pub dir: PathBuf,
    /// Stamp each commit with a random time inside the window.
    pub randomize_dates: bool,
    /// Start of the time-of-day window.
    pub window_start: TimeOfDay,
    /// End of the window; at or before the start means it ends the next day.
    pub window_end: TimeOfDay,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".heartbeat"),
            randomize_dates: true,
            window_start: TimeOfDay(NaiveTime::MIN + chrono::Duration::hours(9)),
            window_end: TimeOfDay(
                NaiveTime::MIN + chrono::Duration::hours(22) + chrono::Duration::minutes(30),
            ),
        }
    }
}

/// External tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    /// Git executable, a name looked up in PATH or a full path.
    pub git: PathBuf,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            git: PathBuf::from("git"),
        }
    }
}
