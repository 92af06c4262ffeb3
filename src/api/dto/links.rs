//! DTOs for the link listing endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Paginated list of short links.
#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub pagination: PaginationMeta,
    pub items: Vec<LinkItem>,
}

/// A single stored link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkItem {
    pub alias: String,
    pub short_url: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
}

/// Pagination metadata for responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u32,
    pub page_size: u32,
    pub total_items: i64,
    pub total_pages: u32,
}
