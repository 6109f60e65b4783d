// heartbeat-rs: Repository activity simulator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE       ← Additional config files (can repeat)
//! --no-default-config ← Skip ./heartbeat.toml
//! --log-level N       ← Console verbosity (0-6)
//! --file-log-level    ← File verbosity (falls back to --log-level)
//! --log-file FILE     ← global.log_file override
//! --set KEY=VAL       ← Direct config override (section.key=value)
//!
//! Precedence: CLI flags > --set > env > --config > heartbeat.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times; later files override earlier ones.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        env = "HEARTBEAT_CONFIG",
        action = clap::ArgAction::Append
    )]
    pub configs: Vec<PathBuf>,

    /// Does not load `heartbeat.toml` from the current directory.
    #[arg(long = "no-default-config")]
    pub no_default_config: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Sets an option, such as 'commits.max=3' or 'heartbeat.window_end=18:00'.
    /// Can be specified multiple times.
    #[arg(
        short = 's',
        long = "set",
        value_name = "KEY=VALUE",
        value_parser = parse_key_value,
        action = clap::ArgAction::Append
    )]
    pub options: Vec<(String, String)>,
}

impl GlobalOptions {
    /// Converts command-line options to configuration overrides.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<(String, String)> {
        let mut overrides = self.options.clone();

        if let Some(level) = self.log_level {
            overrides.push(("global.output_log_level".into(), level.to_string()));
        }

        // file_log_level falls back to log_level if not specified
        if let Some(level) = self.file_log_level.or(self.log_level) {
            overrides.push(("global.file_log_level".into(), level.to_string()));
        }

        if let Some(ref path) = self.log_file {
            overrides.push(("global.log_file".into(), path.display().to_string()));
        }

        overrides
    }
}

/// Parse `section.key=value`; the value may itself contain `=`.
fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    let key = key.trim();
    match key.split_once('.') {
        Some((section, name)) if !section.is_empty() && !name.is_empty() => {
            Ok((key.to_string(), value.trim().to_string()))
        }
        _ => Err(format!("key must look like 'section.key', got '{key}'")),
    }
}
