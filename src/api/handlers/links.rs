//! Handlers for link management endpoints (list, delete).

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::api::dto::links::{LinkItem, LinkListResponse, PaginationMeta};
use crate::api::dto::pagination::PaginationParams;
use crate::error::AppError;
use crate::state::AppState;

/// Lists stored short links, newest first.
///
/// # Endpoint
///
/// `GET /urls`
///
/// # Query Parameters
///
/// - `page` (optional): Page number (default: 1)
/// - `pageSize` (optional): Items per page (default: 25, max: 100)
///
/// # Errors
///
/// Returns 400 Bad Request if pagination parameters are invalid.
pub async fn list_links_handler(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<LinkListResponse>, AppError> {
    let (offset, limit) = params.validate_and_get_offset_limit()?;

    let (links, total_items) = state.link_service.list(offset, limit).await?;

    let items = links
        .into_iter()
        .map(|link| LinkItem {
            short_url: state.short_url(&link.short_alias),
            alias: link.short_alias,
            original_url: link.original_url,
            created_at: link.created_at,
        })
        .collect();

    Ok(Json(LinkListResponse {
        pagination: PaginationMeta {
            page: params.page(),
            page_size: params.page_size(),
            total_items,
            total_pages: params.total_pages(total_items),
        },
        items,
    }))
}

/// Deletes a short link.
///
/// # Endpoint
///
/// `DELETE /{alias}`
///
/// # Response
///
/// `204 No Content`
///
/// # Errors
///
/// Returns 404 Not Found if the alias doesn't exist or was already deleted.
pub async fn delete_link_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.link_service.remove(&alias).await?;
    Ok(StatusCode::NO_CONTENT)
}
