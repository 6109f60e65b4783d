// heartbeat-rs: Repository activity simulator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{GitMutation, GitQuery, GixBackend, ShellBackend, git_date};
use chrono::{FixedOffset, TimeZone};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

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

/// `main` branch with one empty commit.
fn init_repo_with_commit(path: &Path) {
    run_git(&["init", "-q", "--initial-branch=main"], path);
    run_git(&["config", "user.email", "test@example.com"], path);
    run_git(&["config", "user.name", "Test"], path);
    run_git(&["commit", "-q", "--allow-empty", "-m", "init"], path);
}

#[test]
fn test_gix_backend_is_inside_work_tree() {
    let temp = temp_dir();
    assert!(!GixBackend.is_inside_work_tree(temp.path()));

    gix::init(temp.path()).expect("failed to init repo");
    assert!(GixBackend.is_inside_work_tree(temp.path()));
}

#[test]
fn test_shell_backend_is_inside_work_tree() {
    let temp = temp_dir();
    let shell = ShellBackend::default();
    assert!(!shell.is_inside_work_tree(temp.path()));

    run_git(&["init", "-q"], temp.path());
    assert!(shell.is_inside_work_tree(temp.path()));
}

#[test]
fn test_bare_repository_is_not_a_work_tree() {
    let temp = temp_dir();
    run_git(&["init", "-q", "--bare"], temp.path());

    assert!(!ShellBackend::default().is_inside_work_tree(temp.path()));
    assert!(!GixBackend.is_inside_work_tree(temp.path()));
}

#[test]
fn test_backends_agree_on_queries() {
    let temp = temp_dir();
    init_repo_with_commit(temp.path());
    run_git(
        &["remote", "add", "origin", "https://example.invalid/repo.git"],
        temp.path(),
    );
    run_git(&["branch", "side"], temp.path());

    let shell = ShellBackend::default();
    let backends: [&dyn GitQuery; 2] = [&GixBackend, &shell];
    for backend in backends {
        assert_eq!(
            backend.current_branch(temp.path()).unwrap().as_deref(),
            Some("main")
        );
        assert_eq!(backend.remotes(temp.path()).unwrap(), vec!["origin"]);
        assert!(backend.local_branch_exists(temp.path(), "side").unwrap());
        assert!(!backend.local_branch_exists(temp.path(), "missing").unwrap());
        assert!(
            !backend
                .remote_branch_exists(temp.path(), "origin", "main")
                .unwrap()
        );
    }
}

#[test]
fn test_shell_create_branch_and_checkout() {
    let temp = temp_dir();
    init_repo_with_commit(temp.path());
    let shell = ShellBackend::default();

    shell.create_branch(temp.path(), "activity").unwrap();
    assert_eq!(
        shell.current_branch(temp.path()).unwrap().as_deref(),
        Some("activity")
    );

    shell.checkout(temp.path(), "main").unwrap();
    assert_eq!(
        shell.current_branch(temp.path()).unwrap().as_deref(),
        Some("main")
    );
    assert!(shell.checkout(temp.path(), "does-not-exist").is_err());
}

#[test]
fn test_shell_commit_with_forged_timestamp() {
    let temp = temp_dir();
    init_repo_with_commit(temp.path());
    let shell = ShellBackend::default();

    std::fs::write(temp.path().join("beat.md"), "# Heartbeat\n").unwrap();
    shell.stage_all(temp.path()).unwrap();

    let stamp = FixedOffset::east_opt(2 * 3600)
        .unwrap()
        .with_ymd_and_hms(2024, 3, 15, 21, 7, 42)
        .unwrap();
    shell.commit(temp.path(), "forged", Some(&stamp)).unwrap();

    let dates = shell
        .git_command(&["log", "-1", "--format=%aI %cI"], temp.path())
        .unwrap();
    insta::assert_snapshot!(dates, @"2024-03-15T21:07:42+02:00 2024-03-15T21:07:42+02:00");
}

#[test]
fn test_shell_command_failure_reports_command() {
    let temp = temp_dir();
    let err = ShellBackend::default()
        .git_command(&["rev-parse", "HEAD"], temp.path())
        .unwrap_err();
    assert!(
        err.to_string().contains("git rev-parse HEAD"),
        "unexpected error: {err}"
    );
}

#[test]
fn test_locate_missing_executable() {
    let err = ShellBackend::locate(Path::new("definitely-not-a-git-binary")).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"process error: executable not found: 'definitely-not-a-git-binary' (not in PATH)"
    );
}

#[test]
fn test_git_date_format() {
    let stamp = FixedOffset::west_opt(5 * 3600)
        .unwrap()
        .with_ymd_and_hms(2024, 1, 2, 9, 0, 0)
        .unwrap();
    assert_eq!(git_date(&stamp), "@1704204000 -0500");
}
