//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{debug, error};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects an alias to its original URL.
///
/// # Endpoint
///
/// `GET /{alias}`
///
/// Every request is resolved against storage; there is no cache.
///
/// # Response
///
/// `302 Found` with `Location: <originalUrl>`.
///
/// # Errors
///
/// Returns 404 Not Found if the alias doesn't exist.
pub async fn redirect_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let link = state.link_service.resolve(&alias).await?;

    let location = HeaderValue::from_str(&link.original_url).map_err(|e| {
        error!(alias = %alias, error = %e, "Stored URL is not a valid Location header");
        AppError::internal("Stored URL cannot be used as a redirect target")
    })?;

    debug!(alias = %alias, "Redirecting");
    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
