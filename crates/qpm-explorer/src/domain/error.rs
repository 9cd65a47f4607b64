//! Error taxonomy shared by the gateway, coordinator, and UI flows.

use thiserror::Error;

/// JSON-RPC code used when the backend reports an error without one.
pub const DEFAULT_BACKEND_ERROR_CODE: i64 = -32000;

/// Input rejected locally before anything is sent to the backend.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ValidationError {
    /// A name argument was empty after trimming.
    #[error("{field} must not be empty")]
    EmptyName { field: &'static str },
    /// A rename kept the original name.
    #[error("`{name}` already has that name")]
    UnchangedName { name: String },
}

/// Command rejected by the backend (not found, permission denied, name
/// collision, ...).
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("{message}")]
pub struct BackendError {
    pub code: i64,
    /// Backend message, kept verbatim.
    pub message: String,
}

impl BackendError {
    /// Creates a backend error with the default server error code.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: DEFAULT_BACKEND_ERROR_CODE,
            message: message.into(),
        }
    }
}

/// A backend call that could not complete at all.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum TransportError {
    #[error("backend process is unavailable: {0}")]
    Unavailable(String),
    #[error("failed to exchange a frame with the backend: {0}")]
    Io(String),
    #[error("backend sent a malformed response for `{command}`: {reason}")]
    Malformed {
        command: &'static str,
        reason: String,
    },
    #[error("backend did not answer `{command}` within {seconds} seconds")]
    TimedOut { command: &'static str, seconds: u64 },
}

/// Any failure surfaced by an explorer operation.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ExplorerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_display_keeps_message_verbatim() {
        // Arrange
        let error = ExplorerError::from(BackendError {
            code: 2,
            message: "No such file or directory (os error 2)".to_string(),
        });

        // Act
        let text = error.to_string();

        // Assert
        assert_eq!(text, "No such file or directory (os error 2)");
    }

    #[test]
    fn test_backend_error_new_uses_default_code() {
        // Arrange / Act
        let error = BackendError::new("Not a directory");

        // Assert
        assert_eq!(error.code, DEFAULT_BACKEND_ERROR_CODE);
        assert_eq!(error.message, "Not a directory");
    }
}
