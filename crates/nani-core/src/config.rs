//! Application configuration model (`config.toml`).
//!
//! Every section and field is optional on disk; missing values fall back to
//! the defaults below.

use crate::context::Project;
use serde::{Deserialize, Serialize};

/// Name of the dotted workspace folder created under the working directory.
pub const DEFAULT_WORKSPACE_DIR: &str = ".AIWorkspace";

/// Label given to sessions created implicitly by the chat flow.
pub const DEFAULT_SESSION_LABEL: &str = "New Session";

/// Default `tracing` filter directive.
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NaniConfig {
    #[serde(default)]
    pub workspace: WorkspaceConfig,
    #[serde(default)]
    pub project: Project,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    #[serde(default = "default_workspace_dir")]
    pub dir_name: String,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            dir_name: default_workspace_dir(),
        }
    }
}

fn default_workspace_dir() -> String {
    DEFAULT_WORKSPACE_DIR.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_label")]
    pub default_label: String,
    /// Role requested for implicitly created sessions; the workspace default
    /// role is used when unset or unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_role: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_label: default_session_label(),
            default_role: None,
        }
    }
}

fn default_session_label() -> String {
    DEFAULT_SESSION_LABEL.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Replaces the built-in establish-session instructions when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_instructions: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: NaniConfig = toml::from_str("").unwrap();
        assert_eq!(config, NaniConfig::default());
        assert_eq!(config.workspace.dir_name, ".AIWorkspace");
        assert_eq!(config.session.default_label, "New Session");
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_partial_toml() {
        let config: NaniConfig = toml::from_str(
            r#"
            [project]
            name = "nani"

            [session]
            default_role = "reviewer"
            "#,
        )
        .unwrap();
        assert_eq!(config.project.name, "nani");
        assert_eq!(config.project.owner, "");
        assert_eq!(config.session.default_role.as_deref(), Some("reviewer"));
        assert_eq!(config.session.default_label, "New Session");
    }

    #[test]
    fn test_round_trip_through_toml() {
        let mut config = NaniConfig::default();
        config.provider.system_instructions = Some("Be terse.".to_string());
        let text = toml::to_string_pretty(&config).unwrap();
        let back: NaniConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }
}
