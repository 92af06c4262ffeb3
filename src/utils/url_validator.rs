//! Target URL validation.
//!
//! URLs are checked but stored exactly as submitted, so a resolved link
//! always redirects to the string the caller provided.

use crate::error::AppError;
use url::Url;

/// Maximum accepted URL length, in characters.
pub const MAX_URL_LENGTH: usize = 2048;

/// Validates that `input` is an absolute HTTP or HTTPS URL.
///
/// # Rules
///
/// 1. Not blank and at most 2048 characters
/// 2. No surrounding whitespace or control characters (the value ends up in
///    a `Location` header)
/// 3. Parses as an absolute URL with an `http` or `https` scheme and a host
///
/// # Errors
///
/// Returns [`AppError::InvalidUrl`] describing the first violated rule.
pub fn validate_url(input: &str) -> Result<(), AppError> {
    if input.trim().is_empty() {
        return Err(AppError::invalid_url("URL cannot be empty"));
    }

    if input.chars().count() > MAX_URL_LENGTH {
        return Err(AppError::invalid_url(format!(
            "URL cannot exceed {MAX_URL_LENGTH} characters"
        )));
    }

    if input.trim() != input || input.chars().any(char::is_control) {
        return Err(AppError::invalid_url(
            "URL cannot contain surrounding whitespace or control characters",
        ));
    }

    let url = Url::parse(input).map_err(|e| AppError::invalid_url(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(AppError::invalid_url("Only HTTP and HTTPS URLs are allowed")),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(AppError::invalid_url("URL must include a host"));
    }

    Ok(())
}
