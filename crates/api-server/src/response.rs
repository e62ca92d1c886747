//! Standard JSON response envelope
//!
//! Every endpoint replies with the same `{success, data?, error?, meta?}`
//! shape so clients can handle results uniformly.

use serde::Serialize;

use tm_core::task::Pagination;

/// Standardized API response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

/// Pagination metadata attached to list responses
#[derive(Debug, Serialize)]
pub struct Meta {
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl Meta {
    /// Build metadata from the normalized pagination and the filtered total
    pub fn new(pagination: Pagination, total: usize) -> Self {
        Self {
            page: pagination.page,
            page_size: pagination.page_size,
            total,
            total_pages: total.div_ceil(pagination.page_size),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            meta: None,
        }
    }

    pub fn success_with_meta(data: T, meta: Meta) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            meta: Some(meta),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            meta: None,
        }
    }
}
