//! Repository trait for short link data access.

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage contract for short links.
///
/// The uniqueness of `short_alias` is enforced here, not by callers:
/// [`LinkRepository::insert`] must reject a second record with the same alias
/// even when two inserts race. Callers treat [`LinkRepository::exists`] only
/// as a fast path.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - in-process map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Returns whether a link with this alias is stored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn exists(&self, alias: &str) -> Result<bool, AppError>;

    /// Inserts a new short link and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AliasConflict`] if the alias is already present.
    /// Returns [`AppError::Internal`] on other storage errors.
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, AppError>;

    /// Finds a link by alias.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_alias(&self, alias: &str) -> Result<Option<ShortLink>, AppError>;

    /// Deletes the link with this alias, returning the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn delete_by_alias(&self, alias: &str) -> Result<u64, AppError>;

    /// Lists links newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<ShortLink>, AppError>;

    /// Counts all stored links.
    async fn count(&self) -> Result<i64, AppError>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
