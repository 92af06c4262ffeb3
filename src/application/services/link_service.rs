//! Alias assignment, lookup and deletion.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::alias_generator::{AliasGenerator, is_reserved, validate_custom_alias};
use crate::utils::url_validator::validate_url;

/// Number of generated candidates tried before giving up.
pub const MAX_GENERATION_ATTEMPTS: usize = 5;

/// Service for creating, resolving and removing short links.
///
/// Stateless between calls: all state lives in the repository. The
/// existence check before each insert only saves a round trip; the
/// repository's uniqueness guarantee decides the winner when two requests
/// race for one alias.
pub struct LinkService {
    repository: Arc<dyn LinkRepository>,
    generator: Arc<dyn AliasGenerator>,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(repository: Arc<dyn LinkRepository>, generator: Arc<dyn AliasGenerator>) -> Self {
        Self {
            repository,
            generator,
        }
    }

    /// Assigns an alias to `original_url` and persists the link.
    ///
    /// A non-blank `custom_alias` is validated and used verbatim; otherwise a
    /// random 7-character alias is generated with collision retry.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] if the URL is rejected (no storage access happens)
    /// - [`AppError::InvalidAlias`] if the custom alias is malformed or reserved
    /// - [`AppError::AliasConflict`] if the custom alias is taken, including
    ///   a conflict detected only at insert time
    /// - [`AppError::AliasSpaceExhausted`] if every generated candidate collided
    pub async fn assign(
        &self,
        original_url: String,
        custom_alias: Option<String>,
    ) -> Result<ShortLink, AppError> {
        validate_url(&original_url)?;

        let link = match custom_alias.filter(|alias| !alias.trim().is_empty()) {
            Some(alias) => self.assign_custom(original_url, alias).await?,
            None => self.assign_generated(original_url).await?,
        };

        info!(alias = %link.short_alias, id = link.id, "Short link created");
        Ok(link)
    }

    /// Retrieves a link by alias.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this alias.
    pub async fn resolve(&self, alias: &str) -> Result<ShortLink, AppError> {
        self.repository
            .find_by_alias(alias)
            .await?
            .ok_or_else(|| AppError::not_found(alias))
    }

    /// Deletes the link with this alias.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this alias, including
    /// when it was already removed.
    pub async fn remove(&self, alias: &str) -> Result<(), AppError> {
        let deleted = self.repository.delete_by_alias(alias).await?;

        if deleted == 0 {
            warn!(alias, "Delete failed: alias not found");
            return Err(AppError::not_found(alias));
        }

        info!(alias, "Short link deleted");
        Ok(())
    }

    /// Returns a page of links, newest first, and the total number of links.
    pub async fn list(&self, offset: i64, limit: i64) -> Result<(Vec<ShortLink>, i64), AppError> {
        tokio::try_join!(self.repository.list(offset, limit), self.repository.count())
    }

    /// Checks that storage is reachable.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }

    async fn assign_custom(&self, original_url: String, alias: String) -> Result<ShortLink, AppError> {
        validate_custom_alias(&alias)?;

        if self.repository.exists(&alias).await? {
            return Err(AppError::alias_conflict(alias));
        }

        self.repository
            .insert(NewShortLink::now(original_url, alias))
            .await
    }

    /// Draws candidates until one is stored or the attempt budget runs out.
    ///
    /// A candidate that exists, is reserved, or loses the insert race costs
    /// one attempt.
    async fn assign_generated(&self, original_url: String) -> Result<ShortLink, AppError> {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let alias = self.generator.generate();

            if is_reserved(&alias) || self.repository.exists(&alias).await? {
                warn!(alias = %alias, attempt, "Collision detected for generated alias");
                continue;
            }

            match self
                .repository
                .insert(NewShortLink::now(original_url.clone(), alias))
                .await
            {
                Err(AppError::AliasConflict { alias }) => {
                    warn!(alias = %alias, attempt, "Generated alias taken concurrently");
                }
                result => return result,
            }
        }

        Err(AppError::AliasSpaceExhausted {
            attempts: MAX_GENERATION_ATTEMPTS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use crate::utils::alias_generator::{MockAliasGenerator, RandomAliasGenerator};
    use chrono::Utc;
    use mockall::Sequence;
    use mockall::predicate::eq;

    fn stored(new_link: NewShortLink) -> Result<ShortLink, AppError> {
        Ok(new_link.into_short_link(10))
    }

    fn create_test_link(alias: &str, url: &str) -> ShortLink {
        ShortLink::new(1, url.to_string(), alias.to_string(), Utc::now())
    }

    fn service(repo: MockLinkRepository, generator: impl AliasGenerator + 'static) -> LinkService {
        LinkService::new(Arc::new(repo), Arc::new(generator))
    }

    fn scripted_generator(aliases: &[&str]) -> MockAliasGenerator {
        let mut generator = MockAliasGenerator::new();
        let mut seq = Sequence::new();
        for alias in aliases {
            let alias = alias.to_string();
            generator
                .expect_generate()
                .times(1)
                .in_sequence(&mut seq)
                .returning(move || alias.clone());
        }
        generator
    }

    #[tokio::test]
    async fn test_assign_generates_seven_char_alias() {
        let mut repo = MockLinkRepository::new();
        repo.expect_exists().times(1).returning(|_| Ok(false));
        repo.expect_insert().times(1).returning(stored);

        let service = service(repo, RandomAliasGenerator::from_seed(3));

        let link = service
            .assign("https://example.com".to_string(), None)
            .await
            .unwrap();

        assert_eq!(link.short_alias.len(), 7);
        assert!(link.short_alias.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(link.original_url, "https://example.com");
        assert_eq!(link.id, 10);
    }

    #[tokio::test]
    async fn test_assign_blank_custom_alias_is_treated_as_absent() {
        let mut repo = MockLinkRepository::new();
        repo.expect_exists()
            .with(eq("aZ3kP9q"))
            .times(1)
            .returning(|_| Ok(false));
        repo.expect_insert()
            .withf(|new_link| new_link.short_alias == "aZ3kP9q")
            .times(1)
            .returning(stored);

        let service = service(repo, scripted_generator(&["aZ3kP9q"]));

        let link = service
            .assign("https://example.com".to_string(), Some("   ".to_string()))
            .await
            .unwrap();

        assert_eq!(link.short_alias, "aZ3kP9q");
    }

    #[tokio::test]
    async fn test_assign_retries_on_collision() {
        let mut repo = MockLinkRepository::new();
        repo.expect_exists()
            .with(eq("taken01"))
            .times(1)
            .returning(|_| Ok(true));
        repo.expect_exists()
            .with(eq("taken02"))
            .times(1)
            .returning(|_| Ok(true));
        repo.expect_exists()
            .with(eq("free003"))
            .times(1)
            .returning(|_| Ok(false));
        repo.expect_insert()
            .withf(|new_link| new_link.short_alias == "free003")
            .times(1)
            .returning(stored);

        let service = service(repo, scripted_generator(&["taken01", "taken02", "free003"]));

        let link = service
            .assign("https://example.com".to_string(), None)
            .await
            .unwrap();

        assert_eq!(link.short_alias, "free003");
    }

    #[tokio::test]
    async fn test_assign_skips_reserved_candidate() {
        let mut repo = MockLinkRepository::new();
        repo.expect_exists()
            .with(eq("abcdefg"))
            .times(1)
            .returning(|_| Ok(false));
        repo.expect_insert().times(1).returning(stored);

        let service = service(repo, scripted_generator(&["shorten", "abcdefg"]));

        let link = service
            .assign("https://example.com".to_string(), None)
            .await
            .unwrap();

        assert_eq!(link.short_alias, "abcdefg");
    }

    #[tokio::test]
    async fn test_assign_exhausts_after_five_attempts() {
        let mut repo = MockLinkRepository::new();
        repo.expect_exists()
            .times(MAX_GENERATION_ATTEMPTS)
            .returning(|_| Ok(true));
        repo.expect_insert().times(0);

        let service = service(repo, RandomAliasGenerator::from_seed(11));

        let result = service.assign("https://example.com".to_string(), None).await;

        assert!(matches!(
            result,
            Err(AppError::AliasSpaceExhausted { attempts: 5 })
        ));
    }

    #[tokio::test]
    async fn test_assign_generated_retries_after_insert_race() {
        let mut repo = MockLinkRepository::new();
        repo.expect_exists().times(2).returning(|_| Ok(false));

        let mut seq = Sequence::new();
        repo.expect_insert()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|new_link| Err(AppError::alias_conflict(new_link.short_alias)));
        repo.expect_insert()
            .times(1)
            .in_sequence(&mut seq)
            .returning(stored);

        let service = service(repo, scripted_generator(&["racer01", "racer02"]));

        let link = service
            .assign("https://example.com".to_string(), None)
            .await
            .unwrap();

        assert_eq!(link.short_alias, "racer02");
    }

    #[tokio::test]
    async fn test_assign_with_custom_alias() {
        let mut repo = MockLinkRepository::new();
        repo.expect_exists()
            .with(eq("my-link_1"))
            .times(1)
            .returning(|_| Ok(false));
        repo.expect_insert()
            .withf(|new_link| {
                new_link.short_alias == "my-link_1"
                    && new_link.original_url == "https://example.com/page"
            })
            .times(1)
            .returning(stored);

        let mut generator = MockAliasGenerator::new();
        generator.expect_generate().times(0);

        let service = service(repo, generator);

        let link = service
            .assign(
                "https://example.com/page".to_string(),
                Some("my-link_1".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(link.short_alias, "my-link_1");
    }

    #[tokio::test]
    async fn test_assign_custom_alias_conflict() {
        let mut repo = MockLinkRepository::new();
        repo.expect_exists()
            .with(eq("taken"))
            .times(1)
            .returning(|_| Ok(true));
        repo.expect_insert().times(0);

        let service = service(repo, MockAliasGenerator::new());

        let result = service
            .assign("https://example.com".to_string(), Some("taken".to_string()))
            .await;

        assert!(matches!(result, Err(AppError::AliasConflict { .. })));
    }

    #[tokio::test]
    async fn test_assign_custom_alias_conflict_detected_at_insert() {
        let mut repo = MockLinkRepository::new();
        repo.expect_exists().times(1).returning(|_| Ok(false));
        repo.expect_insert()
            .times(1)
            .returning(|new_link| Err(AppError::alias_conflict(new_link.short_alias)));

        let service = service(repo, MockAliasGenerator::new());

        let result = service
            .assign("https://example.com".to_string(), Some("late".to_string()))
            .await;

        assert!(matches!(result, Err(AppError::AliasConflict { ref alias }) if alias == "late"));
    }

    #[tokio::test]
    async fn test_assign_invalid_custom_alias() {
        let repo = MockLinkRepository::new();
        let service = service(repo, MockAliasGenerator::new());

        let result = service
            .assign(
                "https://example.com".to_string(),
                Some("../admin".to_string()),
            )
            .await;

        assert!(matches!(result, Err(AppError::InvalidAlias { .. })));
    }

    #[tokio::test]
    async fn test_assign_invalid_url_touches_no_storage() {
        let repo = MockLinkRepository::new();
        let service = service(repo, MockAliasGenerator::new());

        let result = service.assign("not-a-url".to_string(), None).await;

        assert!(matches!(result, Err(AppError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn test_assign_propagates_storage_failure() {
        let mut repo = MockLinkRepository::new();
        repo.expect_exists()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error")));
        repo.expect_insert().times(0);

        let service = service(repo, RandomAliasGenerator::from_seed(5));

        let result = service.assign("https://example.com".to_string(), None).await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_resolve_found() {
        let mut repo = MockLinkRepository::new();
        let link = create_test_link("abc1234", "https://example.com");
        repo.expect_find_by_alias()
            .with(eq("abc1234"))
            .times(1)
            .returning(move |_| Ok(Some(link.clone())));

        let service = service(repo, MockAliasGenerator::new());

        let link = service.resolve("abc1234").await.unwrap();
        assert_eq!(link.original_url, "https://example.com");
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_alias().times(1).returning(|_| Ok(None));

        let service = service(repo, MockAliasGenerator::new());

        let result = service.resolve("doesnotexist").await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_remove_twice_fails_second_time() {
        let mut repo = MockLinkRepository::new();
        let mut seq = Sequence::new();
        repo.expect_delete_by_alias()
            .with(eq("once"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(1));
        repo.expect_delete_by_alias()
            .with(eq("once"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(0));

        let service = service(repo, MockAliasGenerator::new());

        assert!(service.remove("once").await.is_ok());
        assert!(matches!(
            service.remove("once").await,
            Err(AppError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_returns_page_and_total() {
        let mut repo = MockLinkRepository::new();
        repo.expect_list()
            .with(eq(0), eq(2))
            .times(1)
            .returning(|_, _| {
                Ok(vec![
                    create_test_link("second", "https://two.com"),
                    create_test_link("first", "https://one.com"),
                ])
            });
        repo.expect_count().times(1).returning(|| Ok(3));

        let service = service(repo, MockAliasGenerator::new());

        let (links, total) = service.list(0, 2).await.unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(total, 3);
    }
}
