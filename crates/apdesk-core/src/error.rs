//! Error types for the APDESK console.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire console.
///
/// The first four variants mirror how a failure is surfaced to the user:
/// validation problems are caught before any call, transport problems come
/// from the remote API, application errors are error-shaped bodies behind a
/// success status, and an expired session is handled by logging out.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum DeskError {
    /// Bad or missing form input, detected before any network call
    #[error("Validation error: {0}")]
    Validation(String),

    /// Network or HTTP failure while talking to the remote API
    #[error("Transport error: {message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// Success status but an error-shaped body (PDF generation)
    #[error("Application error: {0}")]
    Application(String),

    /// A protected view was entered without a session marker
    #[error("Session expired")]
    SessionExpired,

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

    /// A workflow stage was requested out of order
    #[error("Invalid transition: cannot {action} while {state}")]
    InvalidTransition { state: String, action: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DeskError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Transport error without an HTTP status
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            status: None,
            message: message.into(),
        }
    }

    /// Creates a Transport error carrying the HTTP status code
    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self::Transport {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Creates an Application error
    pub fn application(message: impl Into<String>) -> Self {
        Self::Application(message.into())
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

    /// Creates an InvalidTransition error
    pub fn invalid_transition(state: impl Into<String>, action: impl Into<String>) -> Self {
        Self::InvalidTransition {
            state: state.into(),
            action: action.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a Transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Check if this is an Application error
    pub fn is_application(&self) -> bool {
        matches!(self, Self::Application(_))
    }

    /// Check if this is a SessionExpired error
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }

    /// Returns the HTTP status attached to a Transport error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for DeskError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for DeskError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for DeskError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for DeskError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, DeskError>`.
pub type Result<T> = std::result::Result<T, DeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_status() {
        let err = DeskError::http_status(500, "boom");
        assert!(err.is_transport());
        assert_eq!(err.status(), Some(500));
        assert_eq!(DeskError::transport("offline").status(), None);
    }

    #[test]
    fn test_display() {
        let err = DeskError::invalid_transition("Idle", "generate document");
        assert_eq!(
            err.to_string(),
            "Invalid transition: cannot generate document while Idle"
        );
        assert_eq!(
            DeskError::validation("Amount is required").to_string(),
            "Validation error: Amount is required"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: DeskError = io.into();
        assert!(matches!(err, DeskError::Io { .. }));
    }
}
