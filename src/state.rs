//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::LinkService;

/// Cloneable handle to the services used by handlers.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    /// Prefix of every short URL; ends with `/`.
    pub base_url: Arc<str>,
}

impl AppState {
    pub fn new(link_service: Arc<LinkService>, base_url: impl Into<String>) -> Self {
        Self {
            link_service,
            base_url: Arc::from(base_url.into()),
        }
    }

    /// Builds the public short URL for an alias.
    pub fn short_url(&self, alias: &str) -> String {
        format!("{}{}", self.base_url, alias)
    }
}
