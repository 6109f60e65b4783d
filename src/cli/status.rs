// heartbeat-rs: Repository activity simulator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Status command arguments.

use clap::Args;

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, Args)]
pub struct StatusArgs {
    /// Prints the report as JSON.
    #[arg(long)]
    pub json: bool,
}
