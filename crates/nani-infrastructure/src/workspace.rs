//! The workspace: one long-lived store instance per workspace directory.
//!
//! `Workspace` owns the [`ArtifactStore`], the [`ActionLog`] and the in-memory
//! [`Context`]. Components that mutate artifacts are short-lived handles that
//! borrow the workspace mutably, so the single-writer assumption is enforced
//! by the borrow checker within one process:
//!
//! ```no_run
//! use nani_core::context::Project;
//! use nani_infrastructure::Workspace;
//!
//! # fn main() -> nani_core::Result<()> {
//! let mut workspace = Workspace::open(".", Project::default())?;
//! let session = workspace.sessions().ensure_active("New Session", None)?;
//! workspace.sessions().add_interaction("hello", "hi there")?;
//! println!("active: {}", session.id);
//! # Ok(())
//! # }
//! ```

use crate::index_manager::IndexManager;
use crate::paths::{ArtifactKind, WorkspacePaths};
use crate::preference_store::PreferenceStore;
use crate::role_registry::RoleRegistry;
use crate::session_manager::SessionManager;
use crate::storage::{ActionLog, ArtifactStore};
use nani_core::Result;
use nani_core::config::DEFAULT_WORKSPACE_DIR;
use nani_core::context::{ArtifactIndexes, Context, DEFAULT_SYSTEM_PROMPT, Project, Settings};
use nani_core::role::get_default_presets;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Workspace {
    store: ArtifactStore,
    log: ActionLog,
    context: Context,
}

impl Workspace {
    /// Opens (or initializes) the workspace at `<base_dir>/.AIWorkspace`.
    pub fn open(base_dir: impl AsRef<Path>, project: Project) -> Result<Self> {
        Self::open_at(base_dir.as_ref().join(DEFAULT_WORKSPACE_DIR), project)
    }

    /// Opens (or initializes) the workspace rooted exactly at `root`.
    ///
    /// On first run a fresh `context.json` is written with a new workspace id,
    /// default settings and `project`. Otherwise the existing record is loaded
    /// (an empty system prompt is back-filled) and the indexes are rebuilt
    /// from disk. In both cases the built-in roles are created if missing.
    ///
    /// # Errors
    ///
    /// Fails if the directory layout cannot be created or an existing
    /// `context.json` cannot be read or decoded.
    pub fn open_at(root: impl Into<PathBuf>, project: Project) -> Result<Self> {
        let store = ArtifactStore::open(root)?;
        let log = ActionLog::new(store.paths().logs_dir());

        let (context, fresh) = match store.load_json::<Context>(&store.paths().context_file())? {
            Some(context) => (context, false),
            None => (Context::new(project), true),
        };

        let mut workspace = Self { store, log, context };

        if fresh {
            workspace.save_context()?;
            tracing::info!(
                "Created workspace {} at {}",
                workspace.context.workspace,
                workspace.root().display()
            );
        }

        if workspace.context.settings.system_prompt.trim().is_empty() {
            workspace.context.settings.system_prompt = DEFAULT_SYSTEM_PROMPT.to_string();
            workspace.save_context()?;
        }

        if !fresh {
            workspace.indexes().rebuild()?;
        }

        for role in get_default_presets() {
            let path = workspace
                .store
                .paths()
                .artifact_file(ArtifactKind::Role, &role.name);
            if !workspace.store.exists(&path)? {
                workspace.roles().save(&role)?;
            }
        }

        workspace.record("Initialized workspace")?;
        Ok(workspace)
    }

    pub fn root(&self) -> &Path {
        self.store.root()
    }

    pub fn paths(&self) -> &WorkspacePaths {
        self.store.paths()
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    pub fn action_log(&self) -> &ActionLog {
        &self.log
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn settings(&self) -> &Settings {
        &self.context.settings
    }

    pub fn artifact_indexes(&self) -> &ArtifactIndexes {
        &self.context.indexes
    }

    /// Applies `f` to the settings and persists the context.
    pub fn update_settings<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Settings),
    {
        f(&mut self.context.settings);
        self.save_context()?;
        self.record("Updated workspace settings")
    }

    pub fn indexes(&mut self) -> IndexManager<'_> {
        IndexManager::new(self)
    }

    pub fn roles(&mut self) -> RoleRegistry<'_> {
        RoleRegistry::new(self)
    }

    pub fn preferences(&mut self) -> PreferenceStore<'_> {
        PreferenceStore::new(self)
    }

    pub fn sessions(&mut self) -> SessionManager<'_> {
        SessionManager::new(self)
    }

    pub(crate) fn indexes_mut(&mut self) -> &mut ArtifactIndexes {
        &mut self.context.indexes
    }

    /// Writes the in-memory context to `context.json`.
    pub(crate) fn save_context(&self) -> Result<()> {
        self.store
            .write_json(&self.store.paths().context_file(), &self.context)
    }

    pub(crate) fn record(&self, message: impl AsRef<str>) -> Result<()> {
        self.log.record(message)
    }

    pub(crate) fn warn(&self, message: impl AsRef<str>) {
        self.log.warn(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use nani_core::context::{DEFAULT_LANGUAGE, DEFAULT_ROLE_NAME};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_first_open_creates_context() {
        let temp_dir = TempDir::new().unwrap();
        let project = Project::new("nani", "asaidimu", "https://github.com/asaidimu/nani");
        let workspace = Workspace::open(temp_dir.path(), project.clone()).unwrap();

        let root = temp_dir.path().join(".AIWorkspace");
        assert_eq!(workspace.root(), root);
        assert!(root.join("context.json").is_file());
        assert!(!root.join("session.json").exists());

        let context = workspace.context();
        assert_eq!(context.project, project);
        assert_eq!(context.settings.default_language, DEFAULT_LANGUAGE);
        assert_eq!(context.settings.default_role, DEFAULT_ROLE_NAME);
        assert_eq!(context.settings.system_prompt, DEFAULT_SYSTEM_PROMPT);
    }

    #[test]
    fn test_first_open_seeds_default_role() {
        let temp_dir = TempDir::new().unwrap();
        let workspace = Workspace::open_at(temp_dir.path(), Project::default()).unwrap();

        assert!(temp_dir.path().join("roles/documenter.json").is_file());
        assert!(workspace.artifact_indexes().roles.contains_key("documenter"));
    }

    #[test]
    fn test_reopen_keeps_workspace_id() {
        let temp_dir = TempDir::new().unwrap();
        let first = Workspace::open_at(temp_dir.path(), Project::default()).unwrap();
        let id = first.context().workspace.clone();
        drop(first);

        let second = Workspace::open_at(temp_dir.path(), Project::new("other", "", "")).unwrap();
        assert_eq!(second.context().workspace, id);
        // Project from an existing context wins
        assert_eq!(second.context().project.name, "");
    }

    #[test]
    fn test_reopen_backfills_empty_system_prompt() {
        let temp_dir = TempDir::new().unwrap();
        let mut workspace = Workspace::open_at(temp_dir.path(), Project::default()).unwrap();
        workspace
            .update_settings(|settings| settings.system_prompt = String::new())
            .unwrap();
        drop(workspace);

        let workspace = Workspace::open_at(temp_dir.path(), Project::default()).unwrap();
        assert_eq!(workspace.settings().system_prompt, DEFAULT_SYSTEM_PROMPT);

        let on_disk: Context = workspace
            .store()
            .read_json(&workspace.paths().context_file())
            .unwrap();
        assert_eq!(on_disk.settings.system_prompt, DEFAULT_SYSTEM_PROMPT);
    }

    #[test]
    fn test_reopen_rebuilds_indexes_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        let workspace = Workspace::open_at(temp_dir.path(), Project::default()).unwrap();
        drop(workspace);

        fs::write(
            temp_dir.path().join("roles/reviewer.json"),
            r#"{"name":"reviewer","label":"Reviewer","persona":"p","description":"d"}"#,
        )
        .unwrap();

        let workspace = Workspace::open_at(temp_dir.path(), Project::default()).unwrap();
        assert!(workspace.artifact_indexes().roles.contains_key("reviewer"));
    }

    #[test]
    fn test_corrupt_context_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("context.json"), "{").unwrap();

        let err = Workspace::open_at(temp_dir.path(), Project::default()).unwrap_err();
        assert!(err.is_serialization());
    }

    #[test]
    fn test_update_settings_persists() {
        let temp_dir = TempDir::new().unwrap();
        let mut workspace = Workspace::open_at(temp_dir.path(), Project::default()).unwrap();
        workspace
            .update_settings(|settings| settings.default_language = "fr".to_string())
            .unwrap();

        let on_disk: Context = workspace
            .store()
            .read_json(&workspace.paths().context_file())
            .unwrap();
        assert_eq!(on_disk.settings.default_language, "fr");
    }

    #[test]
    fn test_open_records_action() {
        let temp_dir = TempDir::new().unwrap();
        let workspace = Workspace::open_at(temp_dir.path(), Project::default()).unwrap();
        let lines = workspace
            .action_log()
            .read_day(Local::now().date_naive())
            .unwrap();
        assert!(lines.iter().any(|line| line.ends_with("Initialized workspace")));
    }
}
