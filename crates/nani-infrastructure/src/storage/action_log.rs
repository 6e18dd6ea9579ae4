//! Append-only, human-readable record of workspace mutations.
//!
//! One file per local calendar day under `logs/`, one line per action:
//! `<RFC3339 timestamp>: <message>`. Every line is mirrored to `tracing`.

use crate::paths::log_file_name;
use chrono::{Local, NaiveDate};
use nani_core::{NaniError, Result};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write as IoWrite};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ActionLog {
    dir: PathBuf,
}

impl ActionLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the log file for `date`.
    pub fn file_for(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(log_file_name(date))
    }

    /// Appends `message` to today's log.
    ///
    /// Newlines inside the message are folded so each record stays on one line.
    pub fn record(&self, message: impl AsRef<str>) -> Result<()> {
        let message = single_line(message.as_ref());
        tracing::debug!(target: "nani::action", "{}", message);
        self.append(&message)
    }

    /// Logs a warning and appends it to today's log with a `Warning:` prefix.
    /// Never fails; a log that cannot be written is reported through
    /// `tracing` only.
    pub fn warn(&self, message: impl AsRef<str>) {
        let message = single_line(message.as_ref());
        tracing::warn!(target: "nani::action", "{}", message);
        if let Err(e) = self.append(&format!("Warning: {}", message)) {
            tracing::error!("Failed to write action log: {}", e);
        }
    }

    /// Reads back the records of one day. A day without records is empty.
    pub fn read_day(&self, date: NaiveDate) -> Result<Vec<String>> {
        let path = self.file_for(date);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(content.lines().map(str::to_string).collect()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(NaniError::io_at("read", &path, e)),
        }
    }

    fn append(&self, message: &str) -> Result<()> {
        let now = Local::now();
        let path = self.file_for(now.date_naive());

        fs::create_dir_all(&self.dir)
            .map_err(|e| NaniError::io_at("create directory", &self.dir, e))?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| NaniError::io_at("open", &path, e))?;
        writeln!(file, "{}: {}", now.to_rfc3339(), message)
            .map_err(|e| NaniError::io_at("append to", &path, e))
    }
}

fn single_line(message: &str) -> String {
    message.trim_end().replace(['\r', '\n'], " ")
}
