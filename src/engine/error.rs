//! Error types for search engine operations

use crate::error::Error;

/// Result type for engine operations
pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Errors reported while talking to the search engine
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Connection or transport failure
    #[error("Search engine request failed: {0}")]
    Transport(String),

    /// Request exceeded its timeout
    #[error("Search engine request timed out: {0}")]
    Timeout(String),

    /// Engine answered with a non-success status
    #[error("Search engine returned {status} for {operation}: {body}")]
    Status {
        status: u16,
        operation: String,
        body: String,
    },

    /// Response body could not be decoded
    #[error("Failed to decode search engine response: {0}")]
    Decode(String),

    /// Client could not be configured
    #[error("Invalid engine configuration: {0}")]
    Configuration(String),
}

impl EngineError {
    /// Build a status error the way the engine reports it
    pub fn status(status: u16, operation: impl Into<String>, body: impl Into<String>) -> Self {
        EngineError::Status {
            status,
            operation: operation.into(),
            body: body.into(),
        }
    }

    /// HTTP status carried by the error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            EngineError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }
}

impl From<reqwest::Error> for EngineError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            EngineError::Timeout(err.to_string())
        } else if err.is_decode() {
            EngineError::Decode(err.to_string())
        } else {
            EngineError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Decode(err.to_string())
    }
}

impl From<EngineError> for Error {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Configuration(msg) => Error::Configuration(msg),
            other => Error::Engine(other),
        }
    }
}
