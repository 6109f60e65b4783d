// heartbeat-rs: Repository activity simulator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::{Cli, Command};
use clap::Parser;
use std::path::PathBuf;

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

#[test]
fn test_parse_version() {
    let cli = Cli::try_parse_from(["heartbeat", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
    assert!(cli.config_overrides().is_empty());
}

#[test]
fn test_parse_without_command() {
    let cli = Cli::try_parse_from(["heartbeat", "-l", "4"]).unwrap();
    assert!(cli.command.is_none());
}

#[test]
fn test_parse_global_options() {
    let cli = Cli::try_parse_from([
        "heartbeat",
        "-c",
        "a.toml",
        "--config",
        "b.toml",
        "--no-default-config",
        "-l",
        "4",
        "--log-file",
        "run.log",
        "-s",
        "commits.max=3",
        "options",
    ])
    .unwrap();

    assert_eq!(
        cli.global.configs,
        vec![PathBuf::from("a.toml"), PathBuf::from("b.toml")]
    );
    assert!(cli.global.no_default_config);
    assert_eq!(
        cli.config_overrides(),
        pairs(&[
            ("commits.max", "3"),
            ("global.output_log_level", "4"),
            ("global.file_log_level", "4"),
            ("global.log_file", "run.log"),
        ])
    );
}

#[test]
fn test_file_log_level_overrides_log_level() {
    let cli =
        Cli::try_parse_from(["heartbeat", "-l", "2", "--file-log-level", "5", "options"]).unwrap();
    assert_eq!(
        cli.global.to_config_overrides(),
        pairs(&[
            ("global.output_log_level", "2"),
            ("global.file_log_level", "5")
        ])
    );
}

#[test]
fn test_log_level_out_of_range_is_rejected() {
    assert!(Cli::try_parse_from(["heartbeat", "-l", "7", "version"]).is_err());
}

#[test]
fn test_set_requires_section_key() {
    assert!(Cli::try_parse_from(["heartbeat", "-s", "novalue", "options"]).is_err());
    assert!(Cli::try_parse_from(["heartbeat", "-s", "branch=dev", "options"]).is_err());

    let cli = Cli::try_parse_from(["heartbeat", "-s", "commits.message_prefix=a=b", "options"])
        .unwrap();
    assert_eq!(
        cli.global.options,
        pairs(&[("commits.message_prefix", "a=b")])
    );
}

#[test]
fn test_parse_run_flags() {
    let cli = Cli::try_parse_from([
        "heartbeat",
        "-s",
        "repo.branch=from-set",
        "run",
        "--repo",
        "/tmp/work",
        "-b",
        "activity",
        "--remote",
        "upstream",
        "--min-commits",
        "2",
        "--max-commits",
        "4",
        "--min-delay",
        "0",
        "--max-delay",
        "1",
        "--heartbeat-dir",
        "pulse",
        "--no-randomize-dates",
        "--window-start",
        "20:00",
        "--window-end",
        "02:00",
    ])
    .unwrap();

    assert_eq!(
        cli.config_overrides(),
        pairs(&[
            ("repo.branch", "from-set"),
            ("repo.path", "/tmp/work"),
            ("repo.branch", "activity"),
            ("repo.remote", "upstream"),
            ("commits.min", "2"),
            ("commits.max", "4"),
            ("commits.min_delay_secs", "0"),
            ("commits.max_delay_secs", "1"),
            ("heartbeat.dir", "pulse"),
            ("heartbeat.randomize_dates", "false"),
            ("heartbeat.window_start", "20:00"),
            ("heartbeat.window_end", "02:00"),
        ])
    );
}

#[test]
fn test_run_rejects_bad_window() {
    assert!(Cli::try_parse_from(["heartbeat", "run", "--window-start", "25:00"]).is_err());
}

#[test]
fn test_parse_status_json() {
    let cli = Cli::try_parse_from(["heartbeat", "status", "--json"]).unwrap();
    match cli.command {
        Some(Command::Status(args)) => assert!(args.json),
        other => panic!("unexpected command: {other:?}"),
    }
}
