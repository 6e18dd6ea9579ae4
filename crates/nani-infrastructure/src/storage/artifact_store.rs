//! Whole-file JSON persistence for the workspace directory.

use crate::paths::{WorkspacePaths, is_json_file};
use nani_core::{NaniError, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File};
use std::io::{ErrorKind, Write as IoWrite};
use std::path::{Path, PathBuf};

/// Permission bits applied to every JSON file the store writes.
#[cfg(unix)]
const FILE_MODE: u32 = 0o644;

/// Owns the workspace root and provides the JSON read/write primitives every
/// other component goes through.
///
/// Responsibilities:
/// - Create the root and its subdirectories
/// - Write values as pretty-printed JSON (2-space indent), replacing the whole file
/// - Read values back, distinguishing "absent" from "unreadable"
///
/// Does NOT:
/// - Know about sessions, roles, preferences or the index
/// - Lock anything; a single writing process is assumed
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    paths: WorkspacePaths,
}

impl ArtifactStore {
    /// Opens the store rooted at `root`, creating the root and all required
    /// subdirectories when missing.
    ///
    /// # Errors
    ///
    /// Returns `NaniError::Io` naming the directory that could not be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let store = Self {
            paths: WorkspacePaths::new(root),
        };
        store.ensure_layout()?;
        Ok(store)
    }

    pub fn paths(&self) -> &WorkspacePaths {
        &self.paths
    }

    pub fn root(&self) -> &Path {
        self.paths.root()
    }

    fn ensure_layout(&self) -> Result<()> {
        fs::create_dir_all(self.paths.root())
            .map_err(|e| NaniError::io_at("create directory", self.paths.root(), e))?;
        for dir in self.paths.required_dirs() {
            fs::create_dir_all(&dir).map_err(|e| NaniError::io_at("create directory", &dir, e))?;
        }
        Ok(())
    }

    /// Serializes `value` and replaces the file at `path` with it.
    ///
    /// The bytes go to a sibling temp file first and are renamed over the
    /// target, so readers see either the old or the new document.
    pub fn write_json<T>(&self, path: &Path, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let mut json = serde_json::to_string_pretty(value).map_err(|e| NaniError::json_at(path, e))?;
        json.push('\n');

        let tmp_path = temp_path_for(path)?;
        let mut tmp_file =
            File::create(&tmp_path).map_err(|e| NaniError::io_at("create", &tmp_path, e))?;
        tmp_file
            .write_all(json.as_bytes())
            .map_err(|e| NaniError::io_at("write", &tmp_path, e))?;
        tmp_file
            .sync_all()
            .map_err(|e| NaniError::io_at("sync", &tmp_path, e))?;
        drop(tmp_file);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp_path, fs::Permissions::from_mode(FILE_MODE))
                .map_err(|e| NaniError::io_at("set permissions on", &tmp_path, e))?;
        }

        fs::rename(&tmp_path, path).map_err(|e| NaniError::io_at("write", path, e))?;
        Ok(())
    }

    /// Reads and decodes the JSON file at `path`.
    ///
    /// # Errors
    ///
    /// - `NaniError::Io` when the file is missing or unreadable
    /// - `NaniError::Serialization` when it does not decode as `T`
    pub fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content = fs::read_to_string(path).map_err(|e| NaniError::io_at("read", path, e))?;
        serde_json::from_str(&content).map_err(|e| NaniError::json_at(path, e))
    }

    /// Like [`read_json`](Self::read_json) but an absent file is `Ok(None)`.
    pub fn load_json<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(NaniError::io_at("read", path, e)),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| NaniError::json_at(path, e))
    }

    /// Removes the file at `path`. Absence is not an error.
    ///
    /// # Returns
    ///
    /// - `Ok(true)`: The file existed and was removed
    /// - `Ok(false)`: There was nothing to remove
    pub fn remove(&self, path: &Path) -> Result<bool> {
        match fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(NaniError::io_at("remove", path, e)),
        }
    }

    pub fn exists(&self, path: &Path) -> Result<bool> {
        path.try_exists()
            .map_err(|e| NaniError::io_at("check", path, e))
    }

    /// Lists the `*.json` files directly inside `dir`, sorted by path.
    ///
    /// A missing directory yields an empty list.
    pub fn list_json(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(NaniError::io_at("read directory", dir, e)),
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| NaniError::io_at("read directory", dir, e))?;
            let path = entry.path();
            if path.is_file() && is_json_file(&path) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

/// `.<file name>.tmp` next to `path`.
fn temp_path_for(path: &Path) -> Result<PathBuf> {
    let parent = path
        .parent()
        .ok_or_else(|| NaniError::invalid_argument(format!("{} has no parent directory", path.display())))?;
    let file_name = path
        .file_name()
        .ok_or_else(|| NaniError::invalid_argument(format!("{} has no file name", path.display())))?;
    Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Record {
        name: String,
        count: u32,
    }

    fn record() -> Record {
        Record {
            name: "test".to_string(),
            count: 42,
        }
    }

    #[test]
    fn test_open_creates_layout() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join(".AIWorkspace");
        let store = ArtifactStore::open(&root).unwrap();

        for dir in ["sessions", "roles", "preferences", "logs"] {
            assert!(root.join(dir).is_dir(), "{dir} should exist");
        }
        assert_eq!(store.root(), root);
    }

    #[test]
    fn test_open_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        ArtifactStore::open(temp_dir.path()).unwrap();
        ArtifactStore::open(temp_dir.path()).unwrap();
    }

    #[test]
    fn test_write_is_pretty_printed_with_two_spaces() {
        let temp_dir = TempDir::new().unwrap();
        let store = ArtifactStore::open(temp_dir.path()).unwrap();
        let path = temp_dir.path().join("record.json");

        store.write_json(&path, &record()).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "{\n  \"name\": \"test\",\n  \"count\": 42\n}\n");
        // No temp file left behind
        assert!(!temp_dir.path().join(".record.json.tmp").exists());
    }

    #[test]
    fn test_write_replaces_whole_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = ArtifactStore::open(temp_dir.path()).unwrap();
        let path = temp_dir.path().join("record.json");

        store
            .write_json(&path, &Record { name: "a much longer name".to_string(), count: 1 })
            .unwrap();
        store.write_json(&path, &record()).unwrap();

        let loaded: Record = store.read_json(&path).unwrap();
        assert_eq!(loaded, record());
    }

    #[cfg(unix)]
    #[test]
    fn test_write_sets_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let store = ArtifactStore::open(temp_dir.path()).unwrap();
        let path = temp_dir.path().join("record.json");
        store.write_json(&path, &record()).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn test_load_missing_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = ArtifactStore::open(temp_dir.path()).unwrap();
        let loaded: Option<Record> = store.load_json(&temp_dir.path().join("nope.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_read_missing_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = ArtifactStore::open(temp_dir.path()).unwrap();
        let err = store
            .read_json::<Record>(&temp_dir.path().join("nope.json"))
            .unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_read_corrupt_is_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = ArtifactStore::open(temp_dir.path()).unwrap();
        let path = temp_dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(store.read_json::<Record>(&path).unwrap_err().is_serialization());
        assert!(store.load_json::<Record>(&path).unwrap_err().is_serialization());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let store = ArtifactStore::open(temp_dir.path()).unwrap();
        let path = temp_dir.path().join("record.json");
        store.write_json(&path, &record()).unwrap();

        assert!(store.remove(&path).unwrap());
        assert!(!store.remove(&path).unwrap());
        assert!(!store.exists(&path).unwrap());
    }

    #[test]
    fn test_list_json_filters_and_sorts() {
        let temp_dir = TempDir::new().unwrap();
        let store = ArtifactStore::open(temp_dir.path()).unwrap();
        let dir = temp_dir.path().join("roles");
        fs::write(dir.join("b.json"), "{}").unwrap();
        fs::write(dir.join("a.json"), "{}").unwrap();
        fs::write(dir.join("notes.txt"), "x").unwrap();
        fs::create_dir(dir.join("nested.json")).unwrap();

        let files = store.list_json(&dir).unwrap();
        assert_eq!(files, vec![dir.join("a.json"), dir.join("b.json")]);
    }

    #[test]
    fn test_list_json_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        let store = ArtifactStore::open(temp_dir.path()).unwrap();
        assert!(store.list_json(&temp_dir.path().join("missing")).unwrap().is_empty());
    }
}
