//! Role CRUD.

use crate::paths::ArtifactKind;
use crate::workspace::Workspace;
use nani_core::context::RoleSummary;
use nani_core::role::{Role, validate_artifact_key};
use nani_core::{NaniError, Result};

/// Stores roles under `roles/<name>.json` and keeps the role index in step.
///
/// Every mutation writes (or removes) the file, updates the index, persists
/// the context and appends an action log record, in that order.
pub struct RoleRegistry<'a> {
    workspace: &'a mut Workspace,
}

impl<'a> RoleRegistry<'a> {
    pub(crate) fn new(workspace: &'a mut Workspace) -> Self {
        Self { workspace }
    }

    /// Creates or overwrites a role.
    ///
    /// Sessions that already reference the role by name pick up the new body
    /// the next time they are loaded.
    pub fn save(&mut self, role: &Role) -> Result<()> {
        validate_artifact_key("role", &role.name)?;
        let path = self
            .workspace
            .paths()
            .artifact_file(ArtifactKind::Role, &role.name);

        self.workspace.store().write_json(&path, role)?;
        self.workspace
            .indexes_mut()
            .roles
            .insert(role.name.clone(), role.summary());
        self.workspace.save_context()?;
        self.workspace.record(format!("Saved role: {}", role.name))
    }

    /// Loads the full role from disk. The index is not consulted.
    ///
    /// # Errors
    ///
    /// `NaniError::NotFound` when no file exists for `name`.
    pub fn load(&self, name: &str) -> Result<Role> {
        load_role(self.workspace, name)
    }

    /// Removes a role. Removing an unknown role succeeds.
    pub fn delete(&mut self, name: &str) -> Result<()> {
        validate_artifact_key("role", name)?;
        let path = self
            .workspace
            .paths()
            .artifact_file(ArtifactKind::Role, name);

        if !self.workspace.store().remove(&path)? {
            tracing::debug!("Role file for '{}' was already absent", name);
        }
        self.workspace.indexes_mut().roles.remove(name);
        self.workspace.save_context()?;
        self.workspace.record(format!("Deleted role: {}", name))
    }

    /// Indexed roles, ordered by name.
    pub fn list(&self) -> Vec<RoleSummary> {
        self.workspace
            .artifact_indexes()
            .roles
            .values()
            .cloned()
            .collect()
    }

    /// Whether `name` is present in the role index.
    pub fn contains(&self, name: &str) -> bool {
        self.workspace.artifact_indexes().roles.contains_key(name)
    }
}

/// Reads `roles/<name>.json`.
pub(crate) fn load_role(workspace: &Workspace, name: &str) -> Result<Role> {
    validate_artifact_key("role", name)?;
    let path = workspace.paths().artifact_file(ArtifactKind::Role, name);
    workspace
        .store()
        .load_json::<Role>(&path)?
        .ok_or_else(|| NaniError::not_found("role", name))
}
