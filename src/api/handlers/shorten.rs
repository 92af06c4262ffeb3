//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "fullUrl": "https://example.com",
///   "customAlias": "my-link"   // optional
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "shortUrl": "http://localhost:8080/my-link" }
/// ```
///
/// # Errors
///
/// - 400 Bad Request if the body, URL or alias is invalid
/// - 409 Conflict if the custom alias is already taken
/// - 503 Service Unavailable if no free alias could be generated (retry)
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = payload?;

    let link = state
        .link_service
        .assign(payload.full_url, payload.custom_alias)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            short_url: state.short_url(&link.short_alias),
        }),
    ))
}
