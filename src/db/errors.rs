//! # Persistence Errors
//!
//! Error types for the persistence gateway.

use thiserror::Error;

/// Result type for gateway operations
pub type DbResult<T> = Result<T, DbError>;

/// Persistence gateway errors
#[derive(Debug, Error)]
pub enum DbError {
    /// Driver-level failure: connectivity, constraint violation, malformed SQL
    #[error("{0}")]
    Sqlx(#[from] sqlx::Error),

    /// A statement parameter could not be encoded
    #[error("Failed to encode parameter: {0}")]
    Encode(String),

    /// A result row did not match the expected shape
    #[error("Failed to decode row: {0}")]
    Decode(#[from] serde_json::Error),

    /// The metadata catalog has no columns for the table
    #[error("Table not found in catalog: {0}")]
    MissingTable(String),

    /// Invalid connection settings
    #[error("Invalid database configuration: {0}")]
    Config(String),
}
