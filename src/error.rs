use crate::engine::EngineError;
use crate::query::QueryError;
use thiserror::Error;

/// Errors surfaced by the indice manager
#[derive(Error, Debug)]
pub enum Error {
    /// The manager was built without a search engine client
    #[error("no-elasticsearch-client-provided")]
    MissingClient,

    /// No alias exists over the physical pair of a logical indice
    #[error("unable-to-find-alias-for-{indice}")]
    AliasNotFound { indice: String },

    /// The alias exists but does not point to exactly one member of its pair
    #[error("Alias {indice} does not resolve to exactly one of its physical indices: {targets:?}")]
    UnexpectedAliasTarget { indice: String, targets: Vec<String> },

    /// Errors reported by the search engine, propagated as-is
    #[error(transparent)]
    Engine(EngineError),

    /// Invalid query builder input
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Get error code string
    pub fn error_code(&self) -> &str {
        match self {
            Error::MissingClient => "MISSING_CLIENT",
            Error::AliasNotFound { .. } => "ALIAS_NOT_FOUND",
            Error::UnexpectedAliasTarget { .. } => "UNEXPECTED_ALIAS_TARGET",
            Error::Engine(_) => "ENGINE_ERROR",
            Error::Query(_) => "QUERY_ERROR",
            Error::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    /// Logical indice name carried by alias resolution failures
    pub fn indice(&self) -> Option<&str> {
        match self {
            Error::AliasNotFound { indice } | Error::UnexpectedAliasTarget { indice, .. } => {
                Some(indice)
            }
            _ => None,
        }
    }
}

/// Conversion from config::ConfigError
impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::Configuration(err.to_string())
    }
}

/// Conversion from serde_json::Error
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Configuration(err.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
