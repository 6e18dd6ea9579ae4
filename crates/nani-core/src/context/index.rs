//! Artifact index types.
//!
//! Summaries are the listing-friendly projection of each artifact kind. They
//! are never authoritative for full content: reads of a single artifact always
//! go to its file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maximum number of characters kept in a preference snippet.
pub const PREFERENCE_SNIPPET_LIMIT: usize = 100;

/// Lightweight view of an archived session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub id: String,
    pub label: String,
    pub role_name: String,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

/// Lightweight view of a role (no persona text).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSummary {
    pub name: String,
    pub label: String,
    pub description: String,
}

/// Lightweight view of a preference with a truncated content snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceSummary {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content_snippet: String,
}

impl PreferenceSummary {
    /// Truncates `content` to [`PREFERENCE_SNIPPET_LIMIT`] characters, appending
    /// `...` when anything was cut.
    pub fn snippet(content: &str) -> String {
        match content.char_indices().nth(PREFERENCE_SNIPPET_LIMIT) {
            Some((byte_index, _)) => format!("{}...", &content[..byte_index]),
            None => content.to_string(),
        }
    }
}

/// The three artifact indexes held inside the workspace context.
///
/// Ordered maps keep the serialized context stable across rebuilds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactIndexes {
    /// Archived sessions keyed by session id
    #[serde(default)]
    pub sessions: BTreeMap<String, SessionSummary>,
    /// Roles keyed by role name
    #[serde(default)]
    pub roles: BTreeMap<String, RoleSummary>,
    /// Preferences keyed by preference id
    #[serde(default)]
    pub preferences: BTreeMap<String, PreferenceSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_short_content_untouched() {
        assert_eq!(PreferenceSummary::snippet("prefer tabs"), "prefer tabs");
    }

    #[test]
    fn test_snippet_truncates_on_char_boundary() {
        let content = "é".repeat(150);
        let snippet = PreferenceSummary::snippet(&content);
        assert!(snippet.ends_with("..."));
        assert_eq!(snippet.chars().count(), PREFERENCE_SNIPPET_LIMIT + 3);
    }

    #[test]
    fn test_snippet_exact_limit_not_marked() {
        let content = "a".repeat(PREFERENCE_SNIPPET_LIMIT);
        assert_eq!(PreferenceSummary::snippet(&content), content);
    }

    #[test]
    fn test_empty_snippet_omitted_from_json() {
        let summary = PreferenceSummary {
            id: "p1".to_string(),
            timestamp: Utc::now(),
            content_snippet: String::new(),
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("contentSnippet").is_none());
    }
}
