//! CLI-specific error types
//!
//! All CLI errors end the process with a non-zero exit code.

use thiserror::Error;

use crate::config::ConfigError;
use crate::db::DbError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid
    #[error("ITPORTAL_CLI_CONFIG_ERROR: {0}")]
    Config(#[from] ConfigError),

    /// Database pool could not be opened
    #[error("ITPORTAL_CLI_DATABASE_ERROR: {0}")]
    Database(#[from] DbError),

    /// I/O error (runtime, socket, stdout)
    #[error("ITPORTAL_CLI_IO_ERROR: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output failed
    #[error("ITPORTAL_CLI_IO_ERROR: JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        match self {
            CliError::Config(_) => "ITPORTAL_CLI_CONFIG_ERROR",
            CliError::Database(_) => "ITPORTAL_CLI_DATABASE_ERROR",
            CliError::Io(_) | CliError::Json(_) => "ITPORTAL_CLI_IO_ERROR",
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
