//! Error types for query fragment builders

/// Result type for query builders
pub type QueryResult<T> = std::result::Result<T, QueryError>;

/// Errors raised while building query fragments
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// Range token without any integer bound
    #[error("Invalid range token '{0}': expected <low>-<high>")]
    InvalidRangeToken(String),
}
