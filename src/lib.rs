// heartbeat-rs: Repository activity simulator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |             run / status / options
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |  TOML + env, layered      |
//!              '-------------+-------------'
//!                            v
//!                        activity
//!             schedule / heartbeat / pacing
//!                            |
//!                            v
//!                           git
//!                  GitQuery + GitMutation
//!                  gix (read) / CLI (write)
//!
//!   +-----------------------------------------+
//!   |  foundation      error, logging         |
//!   +-----------------------------------------+
//! ```

pub mod activity;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod git;
pub mod logging;
