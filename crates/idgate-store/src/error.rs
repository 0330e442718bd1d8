//! Store error types.

use thiserror::Error;

/// Errors produced by the relational access layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Configuration was rejected before any connection was attempted.
    #[error("invalid store configuration: {message}")]
    InvalidConfiguration { message: String },

    /// The connection pool could not be established.
    #[error("database connection failed: {message}")]
    ConnectionFailed {
        message: String,
        #[source]
        source: sqlx::Error,
    },

    /// A query failed after a connection was obtained.
    #[error("query failed: {message}")]
    QueryFailed {
        message: String,
        #[source]
        source: sqlx::Error,
    },
}

impl StoreError {
    /// Create an `InvalidConfiguration` error.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        StoreError::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Create a `ConnectionFailed` error with its driver source.
    pub fn connection_failed(message: impl Into<String>, source: sqlx::Error) -> Self {
        StoreError::ConnectionFailed {
            message: message.into(),
            source,
        }
    }

    /// Create a `QueryFailed` error with its driver source.
    pub fn query_failed(message: impl Into<String>, source: sqlx::Error) -> Self {
        StoreError::QueryFailed {
            message: message.into(),
            source,
        }
    }
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
