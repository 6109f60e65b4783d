// heartbeat-rs: Repository activity simulator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations module.
//!
//! ```text
//!        activity::Simulator     cmd::status
//!                 \                  /
//!                  v                v
//!         ,--------------------------------,
//!         |  backend (traits)              |
//!         |  GitQuery  +  GitMutation      |
//!         '--+---------------------+-------'
//!            |                     |
//!            v                     v
//!       GixBackend            ShellBackend
//!    (read-only, gix)     (git CLI, read + write)
//!    .is_inside_work_tree .fetch_all  .checkout
//!    .current_branch      .create_branch
//!    .remotes             .rebase_onto_remote
//!    .local/remote branch .stage_all  .commit  .push
//! ```
//!
//! **`GixBackend`**: pure Rust, no subprocess, used for status reports.
//! **`ShellBackend`**: git CLI, drives the commit cycle.

pub mod backend;

pub use backend::{GitBackend, GitMutation, GitQuery, GixBackend, ShellBackend};
