//! DTOs for the link shortening endpoint.

use serde::{Deserialize, Serialize};

/// Request to shorten a URL.
///
/// ```json
/// { "fullUrl": "https://example.com/page", "customAlias": "my-link" }
/// ```
///
/// Field rules live in `LinkService::assign`, so URL and alias errors carry
/// their own codes (`invalid_url`, `invalid_alias`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    /// The original URL to shorten (must be HTTP/HTTPS).
    pub full_url: String,

    /// Optional custom alias. Blank values are treated as absent.
    pub custom_alias: Option<String>,
}

/// Response for a created short link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_url: String,
}
