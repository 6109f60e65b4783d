// heartbeat-rs: Repository activity simulator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{StatusReport, collect_status, format_status};
use crate::config::Config;
use crate::git::GixBackend;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use std::process::Command;

fn run_git(args: &[&str], cwd: &Path) {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

fn config_for(repo: &Path) -> Config {
    let mut config = Config::default();
    config.repo.path = repo.to_path_buf();
    config
}

fn sample_report(work_tree: bool) -> StatusReport {
    let root = if work_tree { "/work/site" } else { "/work/bare" };
    StatusReport {
        repo: PathBuf::from(root),
        work_tree,
        current_branch: work_tree.then(|| "main".to_string()),
        target_branch: "main".to_string(),
        remote: "origin".to_string(),
        remotes: if work_tree {
            vec!["origin".to_string()]
        } else {
            Vec::new()
        },
        local_branch_exists: work_tree,
        remote_branch_exists: false,
        heartbeat_file: PathBuf::from(format!("{root}/.heartbeat/2024-03-15.md")),
        updates_today: if work_tree { 3 } else { 0 },
    }
}

#[test]
fn test_status_of_plain_directory() {
    let temp = tempfile::tempdir().unwrap();
    let report = collect_status(&config_for(temp.path()), &GixBackend, day()).unwrap();

    assert!(!report.work_tree);
    assert!(report.current_branch.is_none());
    assert!(report.remotes.is_empty());
    assert_eq!(report.updates_today, 0);
    assert_eq!(
        report.heartbeat_file,
        temp.path().join(".heartbeat/2024-03-15.md")
    );
}

#[test]
fn test_status_of_working_copy() {
    let temp = tempfile::tempdir().unwrap();
    run_git(&["init", "-q", "--initial-branch=main"], temp.path());
    run_git(&["config", "user.email", "test@example.com"], temp.path());
    run_git(&["config", "user.name", "Test"], temp.path());
    run_git(&["commit", "-q", "--allow-empty", "-m", "init"], temp.path());
    run_git(
        &["remote", "add", "origin", "https://example.invalid/site.git"],
        temp.path(),
    );

    let beat_dir = temp.path().join(".heartbeat");
    std::fs::create_dir_all(&beat_dir).unwrap();
    std::fs::write(
        beat_dir.join("2024-03-15.md"),
        "# Heartbeat 2024-03-15\n- update 1 at 09:00:00\n- update 2 at 09:00:10\n",
    )
    .unwrap();

    let report = collect_status(&config_for(temp.path()), &GixBackend, day()).unwrap();
    assert!(report.work_tree);
    assert_eq!(report.current_branch.as_deref(), Some("main"));
    assert_eq!(report.remotes, vec!["origin"]);
    assert!(report.remote_configured());
    assert!(report.local_branch_exists);
    assert!(!report.remote_branch_exists);
    assert_eq!(report.updates_today, 2);
}

#[test]
fn test_status_of_missing_path_fails() {
    let temp = tempfile::tempdir().unwrap();
    let err = collect_status(&config_for(&temp.path().join("gone")), &GixBackend, day())
        .unwrap_err();
    assert!(
        err.to_string().contains("repository path does not exist"),
        "unexpected error: {err}"
    );
}

#[test]
fn test_format_status_for_working_copy() {
    assert_eq!(
        format_status(&sample_report(true)),
        vec![
            "repository      /work/site",
            "work tree       yes",
            "current branch  main",
            "target branch   main (exists: yes)",
            "remotes         origin",
            "upstream        origin/main: no",
            "heartbeat file  /work/site/.heartbeat/2024-03-15.md (3 update(s) today)",
        ]
    );
}

#[test]
fn test_format_status_for_plain_directory() {
    assert_eq!(
        format_status(&sample_report(false)),
        vec![
            "repository      /work/bare",
            "work tree       no",
            "heartbeat file  /work/bare/.heartbeat/2024-03-15.md (0 update(s) today)",
        ]
    );
}

#[test]
fn test_status_report_json_shape() {
    let json = serde_json::to_value(sample_report(true)).unwrap();
    assert_eq!(json["target_branch"], "main");
    assert_eq!(json["remotes"][0], "origin");
    assert_eq!(json["updates_today"], 3);
    assert_eq!(json["remote_branch_exists"], false);
}
