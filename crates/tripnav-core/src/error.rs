//! Error types for the Tripnav client core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Tripnav client core.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TripError {
    /// `pop()` was called on an empty route stack (already at root)
    #[error("Route stack is empty")]
    EmptyStack,

    /// Deep link scheme, host or path does not match the join-link shape
    #[error("Unsupported link: {uri}")]
    UnsupportedLink { uri: String },

    /// Deep link query parameter is missing or malformed
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Participant service rejected or failed the join request
    #[error("Failed to join trip {trip_id}: {message}")]
    JoinFailure { trip_id: i64, message: String },

    /// Best-effort deletion of a previous remote asset failed
    #[error("Failed to delete asset '{storage_id}': {message}")]
    AssetDelete { storage_id: String, message: String },

    /// Upload of a replacement asset failed
    #[error("Failed to upload asset: {0}")]
    AssetUpload(String),

    /// A single-flight operation was requested while one is still running
    #[error("Operation already in progress: {0}")]
    Busy(String),

    /// Operation is not valid in the current state machine state
    #[error("Invalid state: expected {expected}, found {actual}")]
    InvalidState { expected: String, actual: String },

    /// An external call did not complete in time
    #[error("Timed out after {seconds}s: {operation}")]
    Timeout { operation: String, seconds: u64 },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Preference storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TripError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an UnsupportedLink error
    pub fn unsupported_link(uri: impl Into<String>) -> Self {
        Self::UnsupportedLink { uri: uri.into() }
    }

    /// Creates an InvalidParameter error
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Creates a Busy error
    pub fn busy(operation: impl Into<String>) -> Self {
        Self::Busy(operation.into())
    }

    /// Creates a Timeout error
    pub fn timeout(operation: impl Into<String>, seconds: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            seconds,
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an EmptyStack error
    pub fn is_empty_stack(&self) -> bool {
        matches!(self, Self::EmptyStack)
    }

    /// Check if this is a Busy error
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy(_))
    }

    /// Check if this is a Timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Check if this error came from a malformed deep link.
    pub fn is_link_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedLink { .. } | Self::InvalidParameter { .. }
        )
    }

    /// Returns the text that should be shown to the user, if any.
    ///
    /// Malformed links, empty-stack pops and cleanup failures are logged only
    /// and return `None`.
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::JoinFailure { .. } => {
                Some("Could not join the trip. Please try again later.".to_string())
            }
            Self::AssetUpload(_) => {
                Some("The image could not be uploaded. Please try again.".to_string())
            }
            Self::Busy(_) => Some("Please wait for the current upload to finish.".to_string()),
            Self::Timeout { .. } => {
                Some("The request took too long. Please check your connection.".to_string())
            }
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for TripError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for TripError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for TripError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for TripError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for TripError {
    fn from(err: url::ParseError) -> Self {
        Self::UnsupportedLink {
            uri: format!("unparseable uri ({})", err),
        }
    }
}

/// A type alias for `Result<T, TripError>`.
pub type Result<T> = std::result::Result<T, TripError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_errors_are_silent() {
        let unsupported = TripError::unsupported_link("other://x");
        let invalid = TripError::invalid_parameter("tripId", "missing");

        assert!(unsupported.is_link_error());
        assert!(invalid.is_link_error());
        assert!(unsupported.user_message().is_none());
        assert!(invalid.user_message().is_none());
    }

    #[test]
    fn test_surfaced_errors_have_messages() {
        let join = TripError::JoinFailure {
            trip_id: 7,
            message: "403".to_string(),
        };
        assert!(join.user_message().is_some());
        assert!(TripError::AssetUpload("boom".into()).user_message().is_some());
        assert!(TripError::busy("asset replacement").user_message().is_some());
    }

    #[test]
    fn test_cleanup_failure_is_silent() {
        let err = TripError::AssetDelete {
            storage_id: "abc".to_string(),
            message: "404".to_string(),
        };
        assert!(err.user_message().is_none());
        assert!(!TripError::EmptyStack.is_busy());
        assert!(TripError::EmptyStack.is_empty_stack());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: TripError = io.into();
        assert!(matches!(err, TripError::Io { .. }));
    }
}
