//! Preference CRUD.

use crate::paths::ArtifactKind;
use crate::workspace::Workspace;
use nani_core::context::PreferenceSummary;
use nani_core::preference::Preference;
use nani_core::role::validate_artifact_key;
use nani_core::{NaniError, Result};

/// Stores preferences under `preferences/<id>.json` and keeps the preference
/// index in step.
pub struct PreferenceStore<'a> {
    workspace: &'a mut Workspace,
}

impl<'a> PreferenceStore<'a> {
    pub(crate) fn new(workspace: &'a mut Workspace) -> Self {
        Self { workspace }
    }

    /// Creates or overwrites a preference.
    pub fn save(&mut self, preference: &Preference) -> Result<()> {
        validate_artifact_key("preference", &preference.id)?;
        let path = self
            .workspace
            .paths()
            .artifact_file(ArtifactKind::Preference, &preference.id);

        self.workspace.store().write_json(&path, preference)?;
        self.workspace
            .indexes_mut()
            .preferences
            .insert(preference.id.clone(), preference.summary());
        self.workspace.save_context()?;
        self.workspace
            .record(format!("Saved preference: {}", preference.id))
    }

    /// Creates a new preference with a generated id and the current time.
    pub fn create(&mut self, content: impl Into<String>) -> Result<Preference> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(NaniError::invalid_argument(
                "preference content must not be empty",
            ));
        }
        let preference = Preference::new(content);
        self.save(&preference)?;
        Ok(preference)
    }

    /// Loads the full preference from disk.
    ///
    /// # Errors
    ///
    /// `NaniError::NotFound` when no file exists for `id`.
    pub fn load(&self, id: &str) -> Result<Preference> {
        validate_artifact_key("preference", id)?;
        let path = self
            .workspace
            .paths()
            .artifact_file(ArtifactKind::Preference, id);
        self.workspace
            .store()
            .load_json::<Preference>(&path)?
            .ok_or_else(|| NaniError::not_found("preference", id))
    }

    /// Removes a preference. Removing an unknown id succeeds and leaves the
    /// index unchanged.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        validate_artifact_key("preference", id)?;
        let path = self
            .workspace
            .paths()
            .artifact_file(ArtifactKind::Preference, id);

        if !self.workspace.store().remove(&path)? {
            tracing::debug!("Preference file for '{}' was already absent", id);
        }
        self.workspace.indexes_mut().preferences.remove(id);
        self.workspace.save_context()?;
        self.workspace.record(format!("Deleted preference: {}", id))
    }

    /// Indexed preferences, newest first.
    pub fn list(&self) -> Vec<PreferenceSummary> {
        let mut summaries: Vec<PreferenceSummary> = self
            .workspace
            .artifact_indexes()
            .preferences
            .values()
            .cloned()
            .collect();
        summaries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.id.cmp(&b.id)));
        summaries
    }

    /// Every indexed preference in full, oldest first.
    pub fn load_all(&self) -> Result<Vec<Preference>> {
        let mut preferences = self
            .workspace
            .artifact_indexes()
            .preferences
            .keys()
            .map(|id| self.load(id))
            .collect::<Result<Vec<_>>>()?;
        preferences.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));
        Ok(preferences)
    }
}
