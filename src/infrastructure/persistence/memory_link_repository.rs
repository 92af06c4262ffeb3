//! In-memory implementation of link repository.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::cmp::Reverse;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Process-local repository backed by a sharded concurrent map.
///
/// Inserts go through [`DashMap::entry`], which locks the alias' shard for
/// the duration of the check-and-insert, so concurrent inserts of one alias
/// admit exactly one winner. Data is lost on restart.
#[derive(Debug)]
pub struct MemoryLinkRepository {
    links: DashMap<String, ShortLink>,
    next_id: AtomicI64,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self {
            links: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryLinkRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn exists(&self, alias: &str) -> Result<bool, AppError> {
        Ok(self.links.contains_key(alias))
    }

    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        match self.links.entry(new_link.short_alias.clone()) {
            Entry::Occupied(_) => Err(AppError::alias_conflict(new_link.short_alias)),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                let link = new_link.into_short_link(id);
                slot.insert(link.clone());
                Ok(link)
            }
        }
    }

    async fn find_by_alias(&self, alias: &str) -> Result<Option<ShortLink>, AppError> {
        Ok(self.links.get(alias).map(|entry| entry.value().clone()))
    }

    async fn delete_by_alias(&self, alias: &str) -> Result<u64, AppError> {
        Ok(u64::from(self.links.remove(alias).is_some()))
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<ShortLink>, AppError> {
        let mut links: Vec<ShortLink> = self
            .links
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        links.sort_by_key(|link| Reverse((link.created_at, link.id)));

        let offset = usize::try_from(offset).unwrap_or(0);
        let limit = usize::try_from(limit).unwrap_or(0);

        Ok(links.into_iter().skip(offset).take(limit).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(i64::try_from(self.links.len()).unwrap_or(i64::MAX))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = MemoryLinkRepository::new();

        let link = repo
            .insert(NewShortLink::now("https://example.com", "abc123"))
            .await
            .unwrap();

        assert_eq!(link.id, 1);
        assert!(repo.exists("abc123").await.unwrap());

        let found = repo.find_by_alias("abc123").await.unwrap().unwrap();
        assert_eq!(found, link);
    }

    #[tokio::test]
    async fn test_insert_duplicate_alias_conflicts() {
        let repo = MemoryLinkRepository::new();
        repo.insert(NewShortLink::now("https://one.com", "dup"))
            .await
            .unwrap();

        let result = repo
            .insert(NewShortLink::now("https://two.com", "dup"))
            .await;

        assert!(matches!(result, Err(AppError::AliasConflict { ref alias }) if alias == "dup"));
        let stored = repo.find_by_alias("dup").await.unwrap().unwrap();
        assert_eq!(stored.original_url, "https://one.com");
    }

    #[tokio::test]
    async fn test_aliases_are_case_sensitive() {
        let repo = MemoryLinkRepository::new();
        repo.insert(NewShortLink::now("https://one.com", "Abc"))
            .await
            .unwrap();

        assert!(!repo.exists("abc").await.unwrap());
        assert!(
            repo.insert(NewShortLink::now("https://two.com", "abc"))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_delete_counts_rows() {
        let repo = MemoryLinkRepository::new();
        repo.insert(NewShortLink::now("https://example.com", "gone"))
            .await
            .unwrap();

        assert_eq!(repo.delete_by_alias("gone").await.unwrap(), 1);
        assert_eq!(repo.delete_by_alias("gone").await.unwrap(), 0);
        assert!(repo.find_by_alias("gone").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_newest_first_with_paging() {
        let repo = MemoryLinkRepository::new();
        let base = Utc::now();

        for i in 0..5 {
            let new_link = NewShortLink {
                original_url: format!("https://example.com/{i}"),
                short_alias: format!("link{i}"),
                created_at: base + Duration::seconds(i),
            };
            repo.insert(new_link).await.unwrap();
        }

        assert_eq!(repo.count().await.unwrap(), 5);

        let first_page = repo.list(0, 2).await.unwrap();
        let aliases: Vec<_> = first_page.iter().map(|l| l.short_alias.as_str()).collect();
        assert_eq!(aliases, ["link4", "link3"]);

        let last_page = repo.list(4, 2).await.unwrap();
        assert_eq!(last_page.len(), 1);
        assert_eq!(last_page[0].short_alias, "link0");
    }
}
