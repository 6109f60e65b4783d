// heartbeat-rs: Repository activity simulator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Run | Status | Options | Inis | Version
//! ```

use std::process::ExitCode;

use heartbeat_rs::cli::{self, Cli, Command};
use heartbeat_rs::cmd::config::{run_inis_command, run_options_command};
use heartbeat_rs::cmd::run::run_run_command;
use heartbeat_rs::cmd::status::run_status_command;
use heartbeat_rs::config::Config;
use heartbeat_rs::config::loader::ConfigLoader;
use heartbeat_rs::error::bail_out;
use heartbeat_rs::logging::init_logging;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const DEFAULT_CONFIG_FILE: &str = "heartbeat.toml";
const ENV_PREFIX: &str = "HEARTBEAT";

fn main() -> ExitCode {
    let cli = cli::parse();

    if matches!(cli.command, Some(Command::Version)) {
        handle_version_command();
        return ExitCode::SUCCESS;
    }

    let loader = build_config_loader(&cli);
    let loaded_files = loader.format_loaded_files();
    let config = match loader.build() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(&config.global.log_config()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, &config, &loaded_files)
}

fn dispatch_command(cli: &Cli, config: &Config, loaded_files: &[String]) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Run(_)) => run_run_command(config),
        Some(Command::Status(args)) => run_status_command(args, config),
        Some(Command::Options) => {
            run_options_command(config);
            Ok(())
        }
        Some(Command::Inis) => {
            run_inis_command(loaded_files);
            Ok(())
        }
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(bail_out("no command specified").into())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(cli: &Cli) -> ConfigLoader {
    let mut loader = ConfigLoader::new();
    if !cli.global.no_default_config {
        loader = loader.add_toml_file_optional(DEFAULT_CONFIG_FILE);
    }
    for path in &cli.global.configs {
        loader = loader.add_toml_file(path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);
    for (key, value) in cli.config_overrides() {
        loader = loader.set(key, value);
    }
    loader
}
