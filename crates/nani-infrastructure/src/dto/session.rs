//! Session DTOs.

use serde::{Deserialize, Serialize};

use nani_core::context::SessionSummary;
use nani_core::role::Role;
use nani_core::session::{Chat, Metadata, Session};

/// On-disk shape of a session (`session.json` and `sessions/<id>.json`).
///
/// The role is stored by name and rehydrated from the role registry on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDTO {
    /// Unique session identifier (UUID format).
    pub id: String,
    pub label: String,
    /// Name of the role in effect.
    pub role: String,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub chat: Vec<Chat>,
    pub metadata: Metadata,
}

impl From<&Session> for SessionDTO {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id.clone(),
            label: session.label.clone(),
            role: session.role.name.clone(),
            sources: session.sources.clone(),
            chat: session.chat.clone(),
            metadata: session.metadata.clone(),
        }
    }
}

impl SessionDTO {
    /// Builds the domain session with `role` substituted for the stored name.
    pub fn into_domain(self, role: Role) -> Session {
        Session {
            id: self.id,
            label: self.label,
            role,
            sources: self.sources,
            chat: self.chat,
            metadata: self.metadata,
        }
    }
}

/// Partial view of a session file: only what the index needs. The chat log
/// and sources are skipped during decoding.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionSummaryDTO {
    pub id: String,
    #[serde(default)]
    pub label: String,
    pub role: String,
    pub metadata: SummaryMetadataDTO,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryMetadataDTO {
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub last_updated: chrono::DateTime<chrono::Utc>,
}

impl From<SessionSummaryDTO> for SessionSummary {
    fn from(dto: SessionSummaryDTO) -> Self {
        SessionSummary {
            id: dto.id,
            label: dto.label,
            role_name: dto.role,
            created_at: dto.metadata.created_at,
            last_updated: dto.metadata.last_updated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use nani_core::role::default_documenter;

    #[test]
    fn test_role_is_stored_by_name() {
        let mut session = Session::new("docs", default_documenter(), Utc::now());
        session.push_chat("hi", "hello", Utc::now());

        let json = serde_json::to_value(SessionDTO::from(&session)).unwrap();
        assert_eq!(json["role"], "documenter");
        assert_eq!(json["metadata"]["priority"], "medium");
        assert_eq!(json["metadata"]["sessionDuration"], "3600");
        assert!(json["metadata"]["archiveAfter"].is_string());
        assert_eq!(json["chat"][0]["message"]["content"], "hi");
    }

    #[test]
    fn test_into_domain_restores_session() {
        let mut session = Session::new("docs", default_documenter(), Utc::now());
        session.add_source("README.md");
        session.push_chat("hi", "hello", Utc::now());

        let text = serde_json::to_string_pretty(&SessionDTO::from(&session)).unwrap();
        let dto: SessionDTO = serde_json::from_str(&text).unwrap();
        assert_eq!(dto.into_domain(default_documenter()), session);
    }

    #[test]
    fn test_summary_dto_ignores_chat() {
        let mut session = Session::new("docs", default_documenter(), Utc::now());
        session.push_chat("hi", "hello", Utc::now());
        let text = serde_json::to_string(&SessionDTO::from(&session)).unwrap();

        let summary: SessionSummary = serde_json::from_str::<SessionSummaryDTO>(&text)
            .unwrap()
            .into();
        assert_eq!(summary, session.summary());
    }
}
