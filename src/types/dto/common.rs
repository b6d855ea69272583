use chrono::{DateTime, SecondsFormat};
use poem_openapi::Object;

use crate::types::internal::pagination::{MAX_LIMIT, Page};
use crate::types::internal::validation::FieldValidator;

/// Response model for health check endpoint
#[derive(Object, Debug)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,

    /// Timestamp of the health check (ISO 8601 format)
    pub timestamp: String,
}

/// Success envelope carrying only a message
#[derive(Object, Debug)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Pagination block attached to list responses
#[derive(Object, Debug, Clone, PartialEq)]
#[oai(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// 1-based page number
    pub page: u64,

    /// Page size
    pub limit: u64,

    /// Number of records matching the filters
    pub total: u64,

    /// ceil(total / limit)
    pub total_pages: u64,
}

impl<T> From<&Page<T>> for PaginationMeta {
    fn from(page: &Page<T>) -> Self {
        Self {
            page: page.request.page,
            limit: page.request.limit,
            total: page.total,
            total_pages: page.total_pages(),
        }
    }
}

/// Render a stored millisecond timestamp as RFC 3339
pub fn format_timestamp(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_default()
}

/// Shared `page` / `limit` query checks
pub fn check_paging(v: &mut FieldValidator, page: Option<i64>, limit: Option<i64>) {
    if let Some(page) = page {
        v.range("page", page, 1, None);
    }
    if let Some(limit) = limit {
        v.range("limit", limit, 1, Some(MAX_LIMIT));
    }
}

/// Shared check for the `status` field
pub fn check_status(v: &mut FieldValidator, status: Option<&str>) {
    if let Some(status) = status {
        v.one_of("status", status, &["active", "inactive"]);
    }
}
