// heartbeat-rs: Repository activity simulator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration loading from multiple sources.
//!
//! # Loader Pipeline
//!
//! ```text
//! ConfigLoader::new()
//!   .add_toml_file_optional("heartbeat.toml")
//!   .add_toml_file(--config)
//!   .add_toml_str()
//!   .with_env_prefix("HEARTBEAT")    HEARTBEAT_COMMITS__MAX=8
//!   .set("repo.branch", ..)          --set / CLI flags
//!        |
//!        v
//!    build() --> Config (validated)
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use super::Config;
use crate::error::{ConfigError, HeartbeatError, Result};

/// Separator between section and key in environment variable names.
const ENV_SEPARATOR: &str = "__";

/// Builder for loading configuration from multiple sources.
pub struct ConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: Option<String>,
    env_vars: Option<HashMap<String, String>>,
    overrides: Vec<(String, String)>,
    files: Vec<(String, PathBuf)>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            env_vars: None,
            overrides: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Adds a TOML configuration file to the loader.
    ///
    /// The file is read by `build()`, which fails if it is missing or invalid.
    #[must_use]
    pub fn add_toml_file<P: AsRef<std::path::Path>>(mut self, path: P) -> Self {
        use config::{File, FileFormat};
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Toml).required(true));
        self.files.push(("file".to_string(), p.to_path_buf()));
        self
    }

    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<std::path::Path>>(mut self, path: P) -> Self {
        use config::{File, FileFormat};
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Toml).required(false));
        if p.exists() {
            self.files.push(("optional".to_string(), p.to_path_buf()));
        }
        self
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        use config::{File, FileFormat};
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.files
            .push(("string".to_string(), PathBuf::from("<string>")));
        self
    }

    /// Reads `<PREFIX>_<SECTION>__<KEY>` variables, e.g. `HEARTBEAT_REPO__BRANCH`.
    ///
    /// Variables without the section separator (like `HEARTBEAT_CONFIG`) are ignored.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Replaces the process environment as the source of prefixed variables.
    #[must_use]
    pub fn with_env_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env_vars = Some(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Sets a configuration override (`section.key`), applied after every other source.
    #[must_use]
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.push((key.into(), value.into()));
        self
    }

    /// Builds the configuration from all added sources.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required configuration files are missing.
    /// - Configuration files have invalid TOML syntax.
    /// - A key is unknown or a value has the wrong type.
    /// - The merged configuration fails validation.
    pub fn build(self) -> Result<Config> {
        let sources = self.source_list();
        let parse_error = |path: &str, err: config::ConfigError| {
            HeartbeatError::from(ConfigError::ParseError {
                path: path.to_string(),
                message: err.to_string(),
            })
        };

        let mut builder = match &self.env_prefix {
            Some(prefix) => {
                let vars = self
                    .env_vars
                    .unwrap_or_else(|| std::env::vars().collect());
                self.builder.add_source(
                    config::Environment::with_prefix(prefix)
                        .prefix_separator("_")
                        .separator(ENV_SEPARATOR)
                        .try_parsing(true)
                        .source(Some(sectioned_vars(prefix, vars))),
                )
            }
            None => self.builder,
        };

        for (key, value) in &self.overrides {
            builder = builder
                .set_override(key.as_str(), value.as_str())
                .map_err(|e| parse_error(&format!("--set {key}"), e))?;
        }

        let config: Config = builder
            .build()
            .and_then(|cfg| cfg.try_deserialize())
            .map_err(|e| parse_error(&sources, e))?;
        config.validate()?;
        Ok(config)
    }

    /// Loaded files joined for error messages, or `<defaults>` when none were read.
    fn source_list(&self) -> String {
        if self.files.is_empty() {
            return "<defaults>".to_string();
        }
        self.files
            .iter()
            .map(|(_, path)| path.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    #[must_use]
    pub fn loaded_files(&self) -> Vec<(String, PathBuf)> {
        self.files.clone()
    }

    #[must_use]
    pub fn format_loaded_files(&self) -> Vec<String> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, (source, path))| format!("{}. [{}] {}", i + 1, source, path.display()))
            .collect()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps only `<PREFIX>_<section>__<key>` variables.
fn sectioned_vars(
    prefix: &str,
    vars: impl IntoIterator<Item = (String, String)>,
) -> HashMap<String, String> {
    let head = format!("{prefix}_");
    vars.into_iter()
        .filter(|(name, _)| {
            name.strip_prefix(&head)
                .is_some_and(|rest| rest.contains(ENV_SEPARATOR))
        })
        .collect()
}
