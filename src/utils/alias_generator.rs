//! Random alias generation and custom alias validation.
//!
//! Generated aliases are 7 characters drawn uniformly from `[a-zA-Z0-9]`
//! (62^7, roughly 3.5 * 10^12 combinations). The source is a fast
//! non-cryptographic PRNG: collision resistance comes from the size of the
//! space, not from unpredictability, so aliases must never be used as secrets.

use crate::error::AppError;
use rand::distr::Alphanumeric;
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use regex::Regex;
use std::sync::{LazyLock, Mutex, PoisonError};

/// Length of generated aliases.
pub const GENERATED_ALIAS_LENGTH: usize = 7;

/// Maximum length of a custom alias.
pub const MAX_ALIAS_LENGTH: usize = 50;

/// Aliases that would shadow fixed routes.
pub const RESERVED_ALIASES: &[&str] = &["shorten", "health", "urls"];

static ALIAS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9_-]{1,50}$").expect("alias pattern is a valid regex")
});

/// Produces candidate aliases.
///
/// Implementations are pure generators and never touch storage; uniqueness
/// is checked by the caller.
#[cfg_attr(test, mockall::automock)]
pub trait AliasGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// [`AliasGenerator`] backed by an injected random number generator.
///
/// The RNG sits behind a mutex so one generator can be shared across
/// concurrent requests; the lock is held only for the draws.
pub struct RandomAliasGenerator<R = SmallRng> {
    rng: Mutex<R>,
    length: usize,
}

impl RandomAliasGenerator<SmallRng> {
    /// Seeds a generator from operating system entropy.
    pub fn from_entropy() -> Self {
        Self::with_rng(SmallRng::from_os_rng())
    }

    /// Creates a deterministic generator, useful in tests.
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }
}

impl<R: RngCore + Send> RandomAliasGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng: Mutex::new(rng),
            length: GENERATED_ALIAS_LENGTH,
        }
    }
}

impl<R: RngCore + Send> AliasGenerator for RandomAliasGenerator<R> {
    fn generate(&self) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        (&mut *rng)
            .sample_iter(Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect()
    }
}

/// Returns true if the alias collides with a fixed route.
pub fn is_reserved(alias: &str) -> bool {
    RESERVED_ALIASES.contains(&alias)
}

/// Validates a caller-supplied alias.
///
/// # Rules
///
/// - Length: 1-50 characters
/// - Allowed characters: ASCII letters, digits, `_` and `-`
/// - Cannot be a reserved route name
///
/// # Errors
///
/// Returns [`AppError::InvalidAlias`] if any rule is violated.
pub fn validate_custom_alias(alias: &str) -> Result<(), AppError> {
    if alias.len() > MAX_ALIAS_LENGTH {
        return Err(AppError::invalid_alias(
            alias,
            format!("Alias cannot exceed {MAX_ALIAS_LENGTH} characters"),
        ));
    }

    if !ALIAS_REGEX.is_match(alias) {
        return Err(AppError::invalid_alias(
            alias,
            "Alias can only contain letters, digits, '_' and '-'",
        ));
    }

    if is_reserved(alias) {
        return Err(AppError::invalid_alias(alias, "This alias is reserved"));
    }

    Ok(())
}
