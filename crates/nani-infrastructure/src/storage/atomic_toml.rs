//! Atomic TOML file operations.
//!
//! Used for the per-user `config.toml`; workspace artifacts are JSON and go
//! through [`super::ArtifactStore`].

use nani_core::{NaniError, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File};
use std::io::{ErrorKind, Write as IoWrite};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// A handle to a TOML file that is always replaced whole: written to a
/// sibling temp file, synced, then renamed over the target.
pub struct AtomicTomlFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicTomlFile<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Creates a new atomic TOML file handle.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the TOML file
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the TOML file and deserializes it.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and deserialized
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or parse the file
    pub fn load(&self) -> Result<Option<T>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(NaniError::io_at("read", &self.path, e)),
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        let data: T = toml::from_str(&content).map_err(|e| NaniError::Serialization {
            format: "TOML".to_string(),
            message: format!("{}: {}", self.path.display(), e),
        })?;
        Ok(Some(data))
    }

    /// Saves data to the TOML file atomically, creating the parent directory
    /// when needed.
    pub fn save(&self, data: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| NaniError::io_at("create directory", parent, e))?;
        }

        let toml_string = toml::to_string_pretty(data)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file =
            File::create(&tmp_path).map_err(|e| NaniError::io_at("create", &tmp_path, e))?;
        tmp_file
            .write_all(toml_string.as_bytes())
            .map_err(|e| NaniError::io_at("write", &tmp_path, e))?;

        // Ensure data is written to disk
        tmp_file
            .sync_all()
            .map_err(|e| NaniError::io_at("sync", &tmp_path, e))?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path).map_err(|e| NaniError::io_at("write", &self.path, e))?;

        Ok(())
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| NaniError::invalid_argument("Path has no parent directory"))?;
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| NaniError::invalid_argument("Path has no file name"))?;

        Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
    }
}
