//! Session domain module.
//!
//! This module contains the session entity, its chat log and lifecycle
//! metadata.
//!
//! # Module Structure
//!
//! - `model`: Core session domain model (`Session`, `Metadata`)
//! - `chat`: Chat log entry types (`Chat`, `SavedMessage`, `SavedResponse`)

mod chat;
mod model;

pub use chat::{Chat, RESPONSE_TIMESTAMP_OFFSET_SECS, SavedMessage, SavedResponse};
pub use model::{
    ARCHIVE_AFTER_DAYS, DEFAULT_PRIORITY, DEFAULT_SESSION_DURATION, Metadata, Session,
};
