//! ShortLink entity: the persisted mapping from an alias to a target URL.

use chrono::{DateTime, Utc};

/// A stored short link.
///
/// Records are never updated in place: they are created once by
/// [`crate::application::services::LinkService::assign`] and later either
/// read or deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    /// Storage-assigned surrogate key.
    pub id: i64,
    pub original_url: String,
    pub short_alias: String,
    pub created_at: DateTime<Utc>,
}

impl ShortLink {
    pub fn new(
        id: i64,
        original_url: String,
        short_alias: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            original_url,
            short_alias,
            created_at,
        }
    }
}

/// Input data for inserting a new short link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortLink {
    pub original_url: String,
    pub short_alias: String,
    pub created_at: DateTime<Utc>,
}

impl NewShortLink {
    /// Builds an insert request stamped with the current time.
    pub fn now(original_url: impl Into<String>, short_alias: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            short_alias: short_alias.into(),
            created_at: Utc::now(),
        }
    }

    /// Materialises the record once storage has assigned an id.
    pub fn into_short_link(self, id: i64) -> ShortLink {
        ShortLink::new(id, self.original_url, self.short_alias, self.created_at)
    }
}
