// heartbeat-rs: Repository activity simulator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing.
//!
//! Tests that command-line flags land in the resolved configuration.

use clap::Parser;
use heartbeat_rs::cli::{Cli, Command};
use heartbeat_rs::config::Config;
use heartbeat_rs::config::types::TimeOfDay;
use heartbeat_rs::logging::LogLevel;
use std::path::PathBuf;

fn resolve(args: &[&str]) -> Config {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.config_overrides()
        .into_iter()
        .fold(Config::builder(), |loader, (key, value)| loader.set(key, value))
        .build()
        .unwrap()
}

// =============================================================================
// Version Command
// =============================================================================

#[test]
fn cli_version_alias() {
    let cli = Cli::try_parse_from(["heartbeat", "-v"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

// =============================================================================
// Run Command
// =============================================================================

#[test]
fn cli_run_without_flags_keeps_defaults() {
    let config = resolve(&["heartbeat", "run"]);
    assert_eq!(config.repo.path, PathBuf::from("."));
    assert_eq!(config.commits.count_range(), 5..=15);
    assert_eq!(config.commits.delay_range(), 5..=25);
    assert!(config.heartbeat.randomize_dates);
}

#[test]
fn cli_run_flags_reach_config() {
    let config = resolve(&[
        "heartbeat",
        "run",
        "--repo",
        "/srv/site",
        "--branch",
        "activity",
        "--min-commits",
        "1",
        "--max-commits",
        "2",
        "--min-delay",
        "0",
        "--max-delay",
        "3",
        "--no-randomize-dates",
        "--window-start",
        "08:15",
        "--window-end",
        "17:45",
    ]);

    assert_eq!(config.repo.path, PathBuf::from("/srv/site"));
    assert_eq!(config.repo.branch, "activity");
    assert_eq!(config.commits.count_range(), 1..=2);
    assert_eq!(config.commits.delay_range(), 0..=3);
    assert!(!config.heartbeat.randomize_dates);
    assert_eq!(config.heartbeat.window_start, TimeOfDay::from_hm(8, 15).unwrap());
    assert_eq!(config.heartbeat.window_end, TimeOfDay::from_hm(17, 45).unwrap());
}

#[test]
fn cli_run_flag_beats_set() {
    let config = resolve(&[
        "heartbeat",
        "--set",
        "repo.branch=from-set",
        "--set",
        "repo.remote=upstream",
        "run",
        "--branch",
        "from-flag",
    ]);
    assert_eq!(config.repo.branch, "from-flag");
    assert_eq!(config.repo.remote, "upstream");
}

#[test]
fn cli_inverted_bounds_fail_at_load() {
    let cli = Cli::try_parse_from([
        "heartbeat",
        "run",
        "--min-commits",
        "9",
        "--max-commits",
        "2",
    ])
    .unwrap();
    let result = cli
        .config_overrides()
        .into_iter()
        .fold(Config::builder(), |loader, (key, value)| loader.set(key, value))
        .build();
    assert!(result.is_err());
}

// =============================================================================
// Global Options
// =============================================================================

#[test]
fn cli_log_levels_reach_config() {
    let config = resolve(&["heartbeat", "-l", "1", "--log-file", "beat.log", "status"]);
    assert_eq!(config.global.output_log_level, LogLevel::ERROR);
    assert_eq!(config.global.file_log_level, LogLevel::ERROR);
    assert_eq!(config.global.log_file, Some(PathBuf::from("beat.log")));
}

#[test]
fn cli_status_ignores_run_only_flags() {
    let cli = Cli::try_parse_from(["heartbeat", "status", "--json"]).unwrap();
    assert!(cli.config_overrides().is_empty());
    assert!(Cli::try_parse_from(["heartbeat", "status", "--branch", "x"]).is_err());
}
