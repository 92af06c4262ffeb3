//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST   /shorten`  - Create a short link
//! - `GET    /urls`     - List short links
//! - `GET    /health`   - Health check
//! - `GET    /{alias}`  - Redirect (302)
//! - `DELETE /{alias}`  - Delete a short link
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Only when origins are configured
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `cors_allowed_origins` - browser origins allowed to call the API; an
///   empty slice disables CORS
pub fn app_router(state: AppState, cors_allowed_origins: &[String]) -> NormalizePath<Router> {
    let mut router = api::routes::routes()
        .with_state(state)
        .layer(tracing::layer());

    if let Some(cors_layer) = cors::layer(cors_allowed_origins) {
        router = router.layer(cors_layer);
    }

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
