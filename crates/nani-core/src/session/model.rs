//! Session domain model.
//!
//! This module contains the core Session entity. The in-memory session always
//! carries its full `Role`; the on-disk shape (role by name only) lives in the
//! infrastructure DTOs.

use super::chat::Chat;
use crate::context::SessionSummary;
use crate::role::Role;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Days after creation at which a session becomes eligible for archiving.
pub const ARCHIVE_AFTER_DAYS: i64 = 7;

/// Expected session length recorded on creation, in seconds.
pub const DEFAULT_SESSION_DURATION: &str = "3600";

/// Priority recorded on creation.
pub const DEFAULT_PRIORITY: &str = "medium";

/// Lifecycle bookkeeping for a session.
///
/// `priority` and `session_duration` are free-form strings on disk
/// (`"medium"`, `"3600"`); nothing in the store interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub created_at: DateTime<Utc>,
    #[serde(default = "default_priority")]
    pub priority: String,
    #[serde(default = "default_session_duration")]
    pub session_duration: String,
    pub last_updated: DateTime<Utc>,
    /// After this instant the session may be archived
    pub archive_after: DateTime<Utc>,
}

fn default_priority() -> String {
    DEFAULT_PRIORITY.to_string()
}

fn default_session_duration() -> String {
    DEFAULT_SESSION_DURATION.to_string()
}

impl Metadata {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            created_at: now,
            priority: default_priority(),
            session_duration: default_session_duration(),
            last_updated: now,
            archive_after: now + Duration::days(ARCHIVE_AFTER_DAYS),
        }
    }
}

/// A conversation with the assistant.
///
/// At most one session is active at a time; the rest are archived and keyed by
/// `id`. The chat log is append-only and ordered by creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Unique session identifier (UUID format)
    pub id: String,
    /// Human-readable label
    pub label: String,
    /// Full role, rehydrated from the role registry on load
    pub role: Role,
    /// File paths shared with the assistant
    pub sources: Vec<String>,
    pub chat: Vec<Chat>,
    pub metadata: Metadata,
}

impl Session {
    /// Creates an empty session stamped at `now`.
    pub fn new(label: impl Into<String>, role: Role, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            label: label.into(),
            role,
            sources: Vec::new(),
            chat: Vec::new(),
            metadata: Metadata::new(now),
        }
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id.clone(),
            label: self.label.clone(),
            role_name: self.role.name.clone(),
            created_at: self.metadata.created_at,
            last_updated: self.metadata.last_updated,
        }
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.metadata.last_updated = now;
    }

    /// Adds `path` to the source list. Returns `false` if it was already there.
    pub fn add_source(&mut self, path: impl Into<String>) -> bool {
        let path = path.into();
        if self.sources.iter().any(|existing| *existing == path) {
            return false;
        }
        self.sources.push(path);
        true
    }

    /// Appends an exchange to the chat log and returns it.
    ///
    /// Message timestamps stay strictly increasing even if the clock does not.
    pub fn push_chat(
        &mut self,
        message: impl Into<String>,
        response: impl Into<String>,
        now: DateTime<Utc>,
    ) -> &Chat {
        let now = match self.chat.last() {
            Some(last) if now <= last.message.timestamp => {
                last.message.timestamp + Duration::microseconds(1)
            }
            _ => now,
        };
        let chat = Chat::new(message, response, now);
        self.touch(chat.response.timestamp);
        self.chat.push(chat);
        &self.chat[self.chat.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::default_documenter;

    #[test]
    fn test_new_session_metadata() {
        let now = Utc::now();
        let session = Session::new("docs", default_documenter(), now);
        assert_eq!(session.metadata.created_at, now);
        assert_eq!(session.metadata.last_updated, now);
        assert_eq!(session.metadata.priority, "medium");
        assert_eq!(session.metadata.session_duration, "3600");
        assert_eq!(session.metadata.archive_after, now + Duration::days(7));
        assert!(session.sources.is_empty());
        assert!(session.chat.is_empty());
    }

    #[test]
    fn test_add_source_deduplicates() {
        let mut session = Session::new("docs", default_documenter(), Utc::now());
        assert!(session.add_source("src/lib.rs"));
        assert!(!session.add_source("src/lib.rs"));
        assert_eq!(session.sources, vec!["src/lib.rs".to_string()]);
    }

    #[test]
    fn test_push_chat_updates_last_updated() {
        let created = Utc::now();
        let mut session = Session::new("docs", default_documenter(), created);
        let later = created + Duration::minutes(5);
        let chat_id = session.push_chat("hi", "hello", later).id.clone();
        assert_eq!(session.chat.len(), 1);
        assert_eq!(session.chat[0].id, chat_id);
        assert_eq!(session.metadata.last_updated, session.chat[0].response.timestamp);
        assert!(session.metadata.last_updated > later);
    }

    #[test]
    fn test_push_chat_keeps_message_order() {
        let now = Utc::now();
        let mut session = Session::new("docs", default_documenter(), now);
        session.push_chat("first", "a", now);
        session.push_chat("second", "b", now);
        assert!(session.chat[1].message.timestamp > session.chat[0].message.timestamp);
    }

    #[test]
    fn test_summary_uses_role_name() {
        let session = Session::new("docs", default_documenter(), Utc::now());
        let summary = session.summary();
        assert_eq!(summary.role_name, "documenter");
        assert_eq!(summary.id, session.id);
    }

    #[test]
    fn test_metadata_keeps_free_form_tags() {
        let json = r#"{
            "createdAt": "2024-05-01T10:00:00.123456+02:00",
            "priority": "urgent",
            "sessionDuration": "3600",
            "lastUpdated": "2024-05-01T10:05:00Z",
            "archiveAfter": "2024-05-08T10:00:00Z"
        }"#;
        let metadata: Metadata = serde_json::from_str(json).unwrap();
        assert_eq!(metadata.priority, "urgent");
        assert_eq!(metadata.session_duration, "3600");
        assert_eq!(metadata.created_at.to_rfc3339(), "2024-05-01T08:00:00.123456+00:00");

        let written = serde_json::to_value(&metadata).unwrap();
        assert_eq!(written["sessionDuration"], "3600");
        assert_eq!(written["priority"], "urgent");
    }
}
