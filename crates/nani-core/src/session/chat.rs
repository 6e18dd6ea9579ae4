//! Chat log entry types.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Seconds between a message timestamp and its paired response timestamp.
pub const RESPONSE_TIMESTAMP_OFFSET_SECS: i64 = 1;

/// The user's side of an exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedMessage {
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// The assistant's side of an exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedResponse {
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// A paired message/response. Owned by exactly one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: String,
    pub message: SavedMessage,
    pub response: SavedResponse,
}

impl Chat {
    /// Builds an exchange stamped at `now`; the response lands
    /// [`RESPONSE_TIMESTAMP_OFFSET_SECS`] later.
    pub fn new(message: impl Into<String>, response: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            message: SavedMessage {
                content: message.into(),
                timestamp: now,
            },
            response: SavedResponse {
                content: response.into(),
                timestamp: now + Duration::seconds(RESPONSE_TIMESTAMP_OFFSET_SECS),
            },
        }
    }
}
