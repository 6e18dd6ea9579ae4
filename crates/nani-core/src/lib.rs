//! Domain layer for Nani.
//!
//! Models for the workspace context, sessions, roles and preferences, the
//! structured response codec, and the completion provider capability. Nothing
//! in this crate touches the filesystem.

pub mod config;
pub mod context;
pub mod error;
pub mod preference;
pub mod provider;
pub mod response;
pub mod role;
pub mod session;

// Re-export common error type
pub use error::{NaniError, Result};
