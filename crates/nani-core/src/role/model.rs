//! Role domain model.

use crate::context::RoleSummary;
use crate::error::{NaniError, Result};
use serde::{Deserialize, Serialize};

/// A named persona/prompt configuration.
///
/// `name` is the unique key and doubles as the file stem under `roles/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Unique name of the role (e.g. "documenter")
    pub name: String,
    /// Human-readable label (e.g. "Code Documenter")
    #[serde(default)]
    pub label: String,
    /// Prompt text defining the persona's behaviour
    #[serde(default)]
    pub persona: String,
    /// Short description of the role's purpose
    #[serde(default)]
    pub description: String,
}

impl Role {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        persona: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            persona: persona.into(),
            description: description.into(),
        }
    }

    pub fn summary(&self) -> RoleSummary {
        RoleSummary {
            name: self.name.clone(),
            label: self.label.clone(),
            description: self.description.clone(),
        }
    }
}

impl From<&Role> for RoleSummary {
    fn from(role: &Role) -> Self {
        role.summary()
    }
}

/// Checks that an artifact key (role name, preference id, session id) can be
/// used as a file stem inside the workspace.
pub fn validate_artifact_key(kind: &str, key: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(NaniError::invalid_argument(format!("{kind} key must not be empty")));
    }
    if key == "." || key == ".." || key.contains(['/', '\\']) {
        return Err(NaniError::invalid_argument(format!(
            "{kind} key '{key}' must not contain path components"
        )));
    }
    Ok(())
}
