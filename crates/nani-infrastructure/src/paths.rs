//! Path management for the workspace directory and the user config file.
//!
//! # Workspace Structure
//!
//! ```text
//! <base>/.AIWorkspace/
//! ├── context.json             # Context record (settings, project, indexes)
//! ├── session.json             # Active session (absent when none is active)
//! ├── sessions/<id>.json       # Archived sessions
//! ├── roles/<name>.json        # Roles
//! ├── preferences/<id>.json    # Preferences
//! └── logs/<YYYY-MM-DD>.log    # Action log
//! ```

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

pub const CONTEXT_FILE: &str = "context.json";
pub const ACTIVE_SESSION_FILE: &str = "session.json";
pub const LOGS_DIR: &str = "logs";

const JSON_EXTENSION: &str = "json";

/// The three kinds of keyed artifacts stored one-per-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Session,
    Role,
    Preference,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 3] = [Self::Session, Self::Role, Self::Preference];

    /// Subdirectory holding this kind of artifact.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Session => "sessions",
            Self::Role => "roles",
            Self::Preference => "preferences",
        }
    }

    /// Name used in errors and log records.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Session => "archived session",
            Self::Role => "role",
            Self::Preference => "preference",
        }
    }
}

/// Resolves every path inside one workspace root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspacePaths {
    root: PathBuf,
}

impl WorkspacePaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn context_file(&self) -> PathBuf {
        self.root.join(CONTEXT_FILE)
    }

    pub fn active_session_file(&self) -> PathBuf {
        self.root.join(ACTIVE_SESSION_FILE)
    }

    pub fn artifact_dir(&self, kind: ArtifactKind) -> PathBuf {
        self.root.join(kind.dir_name())
    }

    /// `<root>/<kind dir>/<key>.json`
    pub fn artifact_file(&self, kind: ArtifactKind, key: &str) -> PathBuf {
        self.artifact_dir(kind)
            .join(format!("{}.{}", key, JSON_EXTENSION))
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join(LOGS_DIR)
    }

    /// Every directory the workspace needs to exist.
    pub fn required_dirs(&self) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = ArtifactKind::ALL
            .iter()
            .map(|kind| self.artifact_dir(*kind))
            .collect();
        dirs.push(self.logs_dir());
        dirs
    }
}

/// `<YYYY-MM-DD>.log`
pub fn log_file_name(date: NaiveDate) -> String {
    format!("{}.log", date.format("%Y-%m-%d"))
}

/// True for `*.json` paths.
pub fn is_json_file(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(JSON_EXTENSION)
}

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Locations outside any workspace (per-user configuration).
pub struct NaniPaths;

impl NaniPaths {
    /// Returns the nani configuration directory (e.g. `~/.config/nani/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("nani"))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}
