//! Completion provider capability.
//!
//! The store and the codec never see the transport. Anything that can open a
//! conversation and answer a prompt with raw text can drive the chat flow.

use crate::error::Result;
use async_trait::async_trait;

/// An AI completion backend.
///
/// Implementations return the provider's raw text unmodified; structure is
/// recovered afterwards by [`crate::response::parse_response`]. Failures should
/// be reported as [`crate::NaniError::Provider`].
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Opens a conversation with the given system instructions and the JSON
    /// shape replies are expected to follow.
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: The provider's acknowledgement, as raw text
    /// - `Err(NaniError)`: The provider could not be reached or refused
    async fn establish_session(&self, system_instructions: &str, schema_hint: &str)
    -> Result<String>;

    /// Sends one prompt within the established conversation.
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: The raw generated reply
    /// - `Err(NaniError)`: The request failed
    async fn send_prompt(&self, text: &str) -> Result<String>;
}
