// heartbeat-rs: Repository activity simulator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for heartbeat-rs using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! heartbeat [global options] <command>
//! run      [--repo DIR] [--branch NAME] [--min-commits N] ...
//! status   [--json]
//! options
//! inis
//! version
//! ```

pub mod global;
pub mod run;
pub mod status;

#[cfg(test)]
mod tests;

use crate::cli::global::GlobalOptions;
use crate::cli::run::RunArgs;
use crate::cli::status::StatusArgs;
use clap::{Parser, Subcommand};

/// Repository activity simulator
///
/// Makes a random number of small commits to a daily heartbeat file and pushes them.
#[derive(Debug, Parser)]
#[command(
    name = "heartbeat",
    author,
    version,
    about = "Repository activity simulator",
    long_about = "heartbeat-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Appends lines to a per-day Markdown file inside a git working\n\
                  copy and commits each one, optionally back-dating the commits\n\
                  to random times within a daily window, then pushes the branch.\n\n\
                  `heartbeat run` performs one cycle with the configured settings.\n\
                  See `heartbeat <command> --help` for more information.",
    after_help = "CONFIGURATION:\n\n\
                  Settings are read from `heartbeat.toml` in the current directory\n\
                  if present, then from each --config file in order, then from\n\
                  HEARTBEAT_<SECTION>__<KEY> environment variables (for example\n\
                  HEARTBEAT_REPO__BRANCH=dev), then from --set, and finally from\n\
                  the dedicated flags of the `run` command. Use --no-default-config\n\
                  to skip `heartbeat.toml`."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Runs one commit cycle.
    Run(RunArgs),

    /// Reports the state of the working copy without changing it.
    Status(StatusArgs),

    /// Lists all options and their resolved values.
    Options,

    /// Lists the configuration files that were loaded.
    Inis,
}

impl Cli {
    /// All configuration overrides from the command line, lowest priority first.
    ///
    /// `--set` values come before the dedicated flags so the flags win.
    #[must_use]
    pub fn config_overrides(&self) -> Vec<(String, String)> {
        let mut overrides = self.global.to_config_overrides();
        if let Some(Command::Run(args)) = &self.command {
            overrides.extend(args.to_config_overrides());
        }
        overrides
    }
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
