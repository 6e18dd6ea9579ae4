//! Preference domain model.

use crate::context::PreferenceSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user-defined instruction such as "prefer unions over enums".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    /// Unique identifier, also the file stem under `preferences/`
    pub id: String,
    /// Free-form instruction text
    pub content: String,
    /// When the preference was created or last updated
    pub timestamp: DateTime<Utc>,
}

impl Preference {
    /// Creates a preference with a generated id, stamped now.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn summary(&self) -> PreferenceSummary {
        PreferenceSummary {
            id: self.id.clone(),
            timestamp: self.timestamp,
            content_snippet: PreferenceSummary::snippet(&self.content),
        }
    }
}
