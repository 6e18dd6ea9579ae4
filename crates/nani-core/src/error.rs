//! Error types for the Nani workspace.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// A shared error type for the store, the orchestration layer and the
/// provider boundary.
///
/// Variants carry rendered messages rather than source errors so the type can
/// be cloned and handed to the presentation layer unchanged.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NaniError {
    /// A referenced artifact (role, preference, archived session, source file) is absent
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// An operation needed the active session but the slot is empty
    #[error("No active session")]
    NoActiveSession,

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "JSON", "TOML"
        message: String,
    },

    /// A caller-supplied value is unusable (empty name, path separators, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The completion provider failed
    #[error("Provider error: {0}")]
    Provider(String),

    /// The completion provider did not answer in time
    #[error("Request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// The in-flight request was cancelled
    #[error("Request cancelled")]
    Cancelled,

    /// A request is already in flight
    #[error("A request is already in progress")]
    Busy,
}

impl NaniError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates an IO error naming the failed operation and the path it ran against.
    ///
    /// ```
    /// use nani_core::NaniError;
    /// use std::io;
    ///
    /// let err = NaniError::io_at(
    ///     "write",
    ///     "/tmp/ws/context.json",
    ///     io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
    /// );
    /// assert!(err.to_string().contains("failed to write /tmp/ws/context.json"));
    /// ```
    pub fn io_at(operation: &str, path: impl AsRef<Path>, err: std::io::Error) -> Self {
        Self::Io {
            message: format!(
                "failed to {} {}: {} (kind: {:?})",
                operation,
                path.as_ref().display(),
                err,
                err.kind()
            ),
        }
    }

    /// Creates a JSON serialization error tied to a path
    pub fn json_at(path: impl AsRef<Path>, err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: format!("{}: {}", path.as_ref().display(), err),
        }
    }

    /// Creates an InvalidArgument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Provider error
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an IO error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Timeouts and cancellations are ordinary request outcomes, not faults.
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Cancelled)
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for NaniError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for NaniError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for NaniError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for NaniError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, NaniError>`.
pub type Result<T> = std::result::Result<T, NaniError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = NaniError::not_found("role", "reviewer");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Entity not found: role 'reviewer'");
    }

    #[test]
    fn test_io_conversion_keeps_kind() {
        let err: NaniError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope").into();
        assert!(err.is_io());
        assert!(err.to_string().contains("PermissionDenied"));
    }

    #[test]
    fn test_json_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: NaniError = parse_err.into();
        assert!(err.is_serialization());
    }

    #[test]
    fn test_interrupted() {
        assert!(NaniError::Cancelled.is_interrupted());
        assert!(NaniError::Timeout { seconds: 30 }.is_interrupted());
        assert!(!NaniError::Busy.is_interrupted());
    }
}
