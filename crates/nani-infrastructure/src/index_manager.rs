//! Rebuilds the artifact indexes from what is on disk.

use crate::dto::{RoleSummaryDTO, SessionSummaryDTO};
use crate::paths::ArtifactKind;
use crate::workspace::Workspace;
use nani_core::Result;
use nani_core::context::{ArtifactIndexes, RoleSummary, SessionSummary};
use nani_core::preference::Preference;
use nani_core::role::validate_artifact_key;
use serde::de::DeserializeOwned;

/// Scans the three artifact directories and replaces the indexes held in the
/// workspace context.
///
/// Only summary-relevant fields are decoded. A file that cannot be read or
/// decoded is logged as a warning and skipped; it never aborts the rebuild.
pub struct IndexManager<'a> {
    workspace: &'a mut Workspace,
}

impl<'a> IndexManager<'a> {
    pub(crate) fn new(workspace: &'a mut Workspace) -> Self {
        Self { workspace }
    }

    /// Replaces all three indexes with a fresh scan and persists the context.
    ///
    /// # Errors
    ///
    /// Only directory-level failures (an artifact directory that exists but
    /// cannot be listed) and failure to write `context.json` are errors.
    pub fn rebuild(&mut self) -> Result<()> {
        let indexes = scan_indexes(self.workspace)?;
        tracing::debug!(
            "Rebuilt indexes: {} sessions, {} roles, {} preferences",
            indexes.sessions.len(),
            indexes.roles.len(),
            indexes.preferences.len()
        );
        *self.workspace.indexes_mut() = indexes;
        self.workspace.save_context()
    }

    /// User-triggered rebuild, bracketed by action log records.
    pub fn refresh(&mut self) -> Result<()> {
        self.workspace
            .record("Refreshing workspace indexes initiated.")?;
        self.rebuild()?;
        self.workspace
            .record("Workspace indexes refreshed successfully.")
    }
}

fn scan_indexes(workspace: &Workspace) -> Result<ArtifactIndexes> {
    let mut indexes = ArtifactIndexes::default();

    for dto in scan::<SessionSummaryDTO>(workspace, ArtifactKind::Session)? {
        let summary = SessionSummary::from(dto);
        indexes.sessions.insert(summary.id.clone(), summary);
    }

    for dto in scan::<RoleSummaryDTO>(workspace, ArtifactKind::Role)? {
        let summary = RoleSummary::from(dto);
        indexes.roles.insert(summary.name.clone(), summary);
    }

    for preference in scan::<Preference>(workspace, ArtifactKind::Preference)? {
        indexes
            .preferences
            .insert(preference.id.clone(), preference.summary());
    }

    Ok(indexes)
}

/// Decodes every JSON file of one kind, skipping those that fail or whose
/// key does not match the file name (loads go through `<key>.json`).
fn scan<T>(workspace: &Workspace, kind: ArtifactKind) -> Result<Vec<T>>
where
    T: DeserializeOwned + ArtifactKey,
{
    let store = workspace.store();
    let dir = store.paths().artifact_dir(kind);

    let mut items = Vec::new();
    for path in store.list_json(&dir)? {
        let item = match store.read_json::<T>(&path) {
            Ok(item) => item,
            Err(e) => {
                workspace.warn(format!(
                    "Skipping corrupt {} file {}: {}",
                    kind.label(),
                    path.display(),
                    e
                ));
                continue;
            }
        };

        if let Err(e) = validate_artifact_key(kind.label(), item.key()) {
            workspace.warn(format!(
                "Skipping {} file {}: {}",
                kind.label(),
                path.display(),
                e
            ));
            continue;
        }

        let stem = path.file_stem().and_then(|stem| stem.to_str());
        if stem != Some(item.key()) {
            workspace.warn(format!(
                "Skipping {} file {}: key '{}' does not match the file name",
                kind.label(),
                path.display(),
                item.key()
            ));
            continue;
        }

        items.push(item);
    }
    Ok(items)
}

/// The field an artifact is indexed under.
trait ArtifactKey {
    fn key(&self) -> &str;
}

impl ArtifactKey for SessionSummaryDTO {
    fn key(&self) -> &str {
        &self.id
    }
}

impl ArtifactKey for RoleSummaryDTO {
    fn key(&self) -> &str {
        &self.name
    }
}

impl ArtifactKey for Preference {
    fn key(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use nani_core::context::Project;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_rebuild_skips_file_with_unusable_key() {
        let temp_dir = TempDir::new().unwrap();
        let mut workspace = Workspace::open_at(temp_dir.path(), Project::default()).unwrap();
        fs::write(
            temp_dir.path().join("roles/blank.json"),
            r#"{"name":"","label":"Blank"}"#,
        )
        .unwrap();

        workspace.indexes().rebuild().unwrap();

        let roles = &workspace.artifact_indexes().roles;
        assert_eq!(roles.len(), 1);
        assert!(roles.contains_key("documenter"));
    }

    #[test]
    fn test_rebuild_skips_file_named_after_another_key() {
        let temp_dir = TempDir::new().unwrap();
        let mut workspace = Workspace::open_at(temp_dir.path(), Project::default()).unwrap();
        fs::write(
            temp_dir.path().join("preferences/handwritten.json"),
            r#"{"id":"p-1","content":"Use tabs","timestamp":"2024-05-01T10:00:00Z"}"#,
        )
        .unwrap();
        fs::write(
            temp_dir.path().join("roles/reviewer.json"),
            r#"{"name":"critic","label":"Critic","persona":"Be harsh.","description":""}"#,
        )
        .unwrap();

        workspace.indexes().rebuild().unwrap();

        assert!(workspace.artifact_indexes().preferences.is_empty());
        assert!(!workspace.artifact_indexes().roles.contains_key("critic"));
        assert!(workspace.preferences().load_all().unwrap().is_empty());

        let lines = workspace
            .action_log()
            .read_day(Local::now().date_naive())
            .unwrap();
        assert!(lines.iter().any(|line| {
            line.contains("Warning: Skipping preference file")
                && line.contains("key 'p-1' does not match the file name")
        }));
    }

    #[test]
    fn test_rebuild_ignores_non_json_files() {
        let temp_dir = TempDir::new().unwrap();
        let mut workspace = Workspace::open_at(temp_dir.path(), Project::default()).unwrap();
        fs::write(temp_dir.path().join("preferences/notes.txt"), "hello").unwrap();

        workspace.indexes().rebuild().unwrap();
        assert!(workspace.artifact_indexes().preferences.is_empty());
    }

    #[test]
    fn test_refresh_records_bracketing_messages() {
        let temp_dir = TempDir::new().unwrap();
        let mut workspace = Workspace::open_at(temp_dir.path(), Project::default()).unwrap();

        workspace.indexes().refresh().unwrap();

        let lines = workspace
            .action_log()
            .read_day(Local::now().date_naive())
            .unwrap();
        let started = lines
            .iter()
            .position(|line| line.ends_with("Refreshing workspace indexes initiated."))
            .unwrap();
        let finished = lines
            .iter()
            .position(|line| line.ends_with("Workspace indexes refreshed successfully."))
            .unwrap();
        assert!(started < finished);
    }

    #[test]
    fn test_corrupt_file_is_logged_as_warning() {
        let temp_dir = TempDir::new().unwrap();
        let mut workspace = Workspace::open_at(temp_dir.path(), Project::default()).unwrap();
        fs::write(temp_dir.path().join("sessions/broken.json"), "not json").unwrap();

        workspace.indexes().rebuild().unwrap();

        assert!(workspace.artifact_indexes().sessions.is_empty());
        let lines = workspace
            .action_log()
            .read_day(Local::now().date_naive())
            .unwrap();
        assert!(
            lines
                .iter()
                .any(|line| line.contains("Warning: Skipping corrupt archived session file"))
        );
    }
}
