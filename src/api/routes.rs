//! API route configuration.

use crate::api::handlers::{
    delete_link_handler, health_handler, list_links_handler, redirect_handler, shorten_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All service routes.
///
/// # Endpoints
///
/// - `POST   /shorten`  - Create a short link
/// - `GET    /urls`     - List short links (paginated)
/// - `GET    /health`   - Storage health check
/// - `GET    /{alias}`  - Redirect to the original URL
/// - `DELETE /{alias}`  - Delete a short link
///
/// Static paths take priority over `/{alias}`; the matching aliases are
/// reserved (see [`crate::utils::alias_generator::RESERVED_ALIASES`]).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/urls", get(list_links_handler))
        .route("/health", get(health_handler))
        .route(
            "/{alias}",
            get(redirect_handler).delete(delete_link_handler),
        )
}
