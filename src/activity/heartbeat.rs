// heartbeat-rs: Repository activity simulator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Daily heartbeat file.
//!
//! ```text
//! <repo>/.heartbeat/2024-03-15.md
//!   # Heartbeat 2024-03-15       header, written once
//!   - update 1 at 09:12:03       one line per commit, append-only
//!   - update 2 at 09:12:19
//! ```

use chrono::{NaiveDate, NaiveTime};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{FsError, HeartbeatResult};

const UPDATE_MARKER: &str = "- update ";

/// The heartbeat file of one calendar day.
#[derive(Debug, Clone)]
pub struct HeartbeatLog {
    path: PathBuf,
    date: NaiveDate,
}

impl HeartbeatLog {
    /// The file for `date` inside `dir`; nothing is touched on disk.
    #[must_use]
    pub fn for_date(dir: &Path, date: NaiveDate) -> Self {
        Self {
            path: dir.join(format!("{}.md", date.format("%Y-%m-%d"))),
            date,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    #[must_use]
    pub fn header(&self) -> String {
        format!("# Heartbeat {}", self.date.format("%Y-%m-%d"))
    }

    /// Create the directory and the file with its header, unless it already exists.
    ///
    /// Returns `true` if the file was created by this call.
    ///
    /// # Errors
    ///
    /// Returns an `FsError` if the directory or file cannot be created.
    pub fn ensure(&self) -> HeartbeatResult<bool> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| FsError::io(dir, e))?;
        }

        let mut file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => return Err(FsError::io(&self.path, e).into()),
        };
        writeln!(file, "{}", self.header()).map_err(|e| FsError::io(&self.path, e))?;
        debug!(file = %self.path.display(), "created heartbeat file");
        Ok(true)
    }

    /// Append `- update <index> at <HH:MM:SS>`, creating the file first if needed.
    ///
    /// # Errors
    ///
    /// Returns an `FsError` if the file cannot be created or written.
    pub fn append(&self, index: u32, at: NaiveTime) -> HeartbeatResult<()> {
        self.ensure()?;
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| FsError::io(&self.path, e))?;
        writeln!(file, "{UPDATE_MARKER}{index} at {}", at.format("%H:%M:%S"))
            .map_err(|e| FsError::io(&self.path, e))?;
        Ok(())
    }

    /// Number of update lines; zero when the file does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an `FsError` if an existing file cannot be read.
    pub fn update_count(&self) -> HeartbeatResult<usize> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(content
                .lines()
                .filter(|line| line.starts_with(UPDATE_MARKER))
                .count()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(0),
            Err(e) => Err(FsError::io(&self.path, e).into()),
        }
    }
}
