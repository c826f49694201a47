//! # REST API Errors
//!
//! Error types for the REST API module.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::db::DbError;

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

/// REST API errors
#[derive(Debug, Clone, Error)]
pub enum RestError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Invalid query parameter
    #[error("Invalid query parameter: {0}")]
    InvalidQueryParam(String),

    /// Path segment that should be a row key is not one
    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    /// Missing required parameter
    #[error("Missing required parameter: {0}")]
    MissingParam(String),

    /// Invalid request body
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Page size exceeds maximum
    #[error("Page size {0} exceeds maximum {1}")]
    LimitExceeded(u32, u32),

    /// No row matches the key
    #[error("{0} not found")]
    NotFound(String),

    /// Write refused because it would break a data invariant
    #[error("Conflict: {0}")]
    Conflict(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Database failure, surfaced with the driver's message
    #[error("{0}")]
    Database(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RestError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            RestError::InvalidQueryParam(_) => StatusCode::BAD_REQUEST,
            RestError::InvalidId(_) => StatusCode::BAD_REQUEST,
            RestError::MissingParam(_) => StatusCode::BAD_REQUEST,
            RestError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            RestError::LimitExceeded(_, _) => StatusCode::BAD_REQUEST,

            // 404 Not Found
            RestError::NotFound(_) => StatusCode::NOT_FOUND,

            // 409 Conflict
            RestError::Conflict(_) => StatusCode::CONFLICT,

            // 500 Internal Server Error
            RestError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RestError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Not-found error naming the missing resource
    pub fn not_found(resource: &str) -> Self {
        RestError::NotFound(resource.to_string())
    }
}

impl From<DbError> for RestError {
    fn from(err: DbError) -> Self {
        RestError::Database(err.to_string())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<RestError> for ErrorResponse {
    fn from(err: RestError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "request failed");
        }
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            RestError::InvalidQueryParam("test".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RestError::not_found("Invoice").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            RestError::Conflict("asset 4".to_string()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            RestError::Database("test".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_database_error_keeps_message() {
        let rest_err = RestError::from(DbError::MissingTable("renewals".to_string()));
        assert_eq!(rest_err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(rest_err.to_string(), "Table not found in catalog: renewals");
    }

    #[test]
    fn test_error_body() {
        let body = ErrorResponse::from(RestError::not_found("Asset allotment"));
        assert_eq!(body.code, 404);
        assert_eq!(body.error, "Asset allotment not found");
    }
}
