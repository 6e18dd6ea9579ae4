//! Context domain model.

use super::index::ArtifactIndexes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Language assumed for new workspaces.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Role every new workspace falls back to.
pub const DEFAULT_ROLE_NAME: &str = "documenter";

/// System prompt prefix applied to every interaction unless overridden.
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a general-purpose AI assistant. Provide concise and helpful responses.";

/// Workspace-wide configuration settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Default language for generated answers
    #[serde(default)]
    pub default_language: String,
    /// Role used when a session asks for none (or for one that does not exist)
    #[serde(default)]
    pub default_role: String,
    /// Prompt prefix sent ahead of every request
    #[serde(default)]
    pub system_prompt: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE.to_string(),
            default_role: DEFAULT_ROLE_NAME.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

/// Project metadata. Informational only; nothing in the store reads it back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub repository: String,
}

impl Project {
    pub fn new(
        name: impl Into<String>,
        owner: impl Into<String>,
        repository: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            repository: repository.into(),
        }
    }
}

/// The workspace record persisted as `context.json`.
///
/// `indexes` must reflect exactly the artifacts on disk after every mutating
/// operation; the owning workspace updates the file and the index together
/// and then persists this record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    /// Unique workspace identifier (UUID format)
    pub workspace: String,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub project: Project,
    #[serde(default)]
    pub indexes: ArtifactIndexes,
}

impl Context {
    /// Creates a fresh context with a new workspace id, default settings and
    /// empty indexes.
    pub fn new(project: Project) -> Self {
        Self {
            workspace: Uuid::new_v4().to_string(),
            settings: Settings::default(),
            project,
            indexes: ArtifactIndexes::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context_defaults() {
        let context = Context::new(Project::new("nani", "me", "git@example.com:me/nani"));
        assert!(Uuid::parse_str(&context.workspace).is_ok());
        assert_eq!(context.settings.default_role, DEFAULT_ROLE_NAME);
        assert_eq!(context.settings.default_language, "en");
        assert_eq!(context.indexes, ArtifactIndexes::default());
    }

    #[test]
    fn test_settings_serialize_camel_case() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["defaultLanguage"], "en");
        assert_eq!(json["defaultRole"], "documenter");
        assert!(json["systemPrompt"].as_str().unwrap().starts_with("You are"));
    }

    #[test]
    fn test_context_tolerates_missing_sections() {
        // Older context files carry only the workspace id
        let context: Context = serde_json::from_str(r#"{"workspace":"abc"}"#).unwrap();
        assert_eq!(context.workspace, "abc");
        assert!(context.indexes.sessions.is_empty());
    }
}
