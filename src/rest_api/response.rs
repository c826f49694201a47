//! # Response Formatting
//!
//! Standard response envelopes for the REST API.

use serde::Serialize;

/// Paginated list response
#[derive(Debug, Clone, Serialize)]
pub struct PageResponse<T: Serialize> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
}

impl<T: Serialize> PageResponse<T> {
    pub fn new(data: Vec<T>, total: i64, page: u32, page_size: u32) -> Self {
        Self {
            data,
            total,
            page,
            page_size,
        }
    }
}

/// Create / update response carrying the stored row
#[derive(Debug, Clone, Serialize)]
pub struct MutationResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> MutationResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}

/// Delete response
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
    /// Rows removed; zero when the key did not exist
    pub deleted: u64,
}

impl DeleteResponse {
    pub fn new(message: impl Into<String>, deleted: u64) -> Self {
        Self {
            success: true,
            message: message.into(),
            deleted,
        }
    }
}
