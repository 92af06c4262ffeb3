//! Application error type and its HTTP mapping.
//!
//! Every fallible operation in the service returns [`AppError`]. The mapping
//! to an HTTP status is a pure function of the variant ([`AppError::status_code`]),
//! and responses share a single JSON envelope:
//!
//! ```json
//! { "error": { "code": "alias_conflict", "message": "...", "details": { } } }
//! ```

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use validator::ValidationErrors;

/// Message returned for every internal failure. Storage details stay in the logs.
const INTERNAL_MESSAGE: &str = "An unexpected error occurred";

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Errors produced by the service and its collaborators.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The target URL is empty, oversized or not an absolute HTTP(S) URL.
    #[error("Invalid URL: {reason}")]
    InvalidUrl { reason: String },

    /// A caller-supplied alias does not satisfy the alias format.
    #[error("Invalid alias: {reason}")]
    InvalidAlias { alias: String, reason: String },

    /// The request itself could not be parsed or failed field validation.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// The alias is already taken, either at the existence check or at insert.
    #[error("Alias '{alias}' is already taken")]
    AliasConflict { alias: String },

    /// Every generated candidate collided. Safe to retry.
    #[error("Failed to generate a unique alias after {attempts} attempts")]
    AliasSpaceExhausted { attempts: usize },

    /// No short link exists for the alias.
    #[error("Short link '{alias}' not found")]
    NotFound { alias: String },

    /// Unexpected storage or runtime failure.
    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn invalid_url(reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            reason: reason.into(),
        }
    }

    pub fn invalid_alias(alias: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAlias {
            alias: alias.into(),
            reason: reason.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn alias_conflict(alias: impl Into<String>) -> Self {
        Self::AliasConflict {
            alias: alias.into(),
        }
    }

    pub fn not_found(alias: impl Into<String>) -> Self {
        Self::NotFound {
            alias: alias.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidUrl { .. }
            | AppError::InvalidAlias { .. }
            | AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::AliasConflict { .. } => StatusCode::CONFLICT,
            AppError::AliasSpaceExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidUrl { .. } => "invalid_url",
            AppError::InvalidAlias { .. } => "invalid_alias",
            AppError::Validation { .. } => "validation_error",
            AppError::AliasConflict { .. } => "alias_conflict",
            AppError::AliasSpaceExhausted { .. } => "alias_space_exhausted",
            AppError::NotFound { .. } => "not_found",
            AppError::Internal { .. } => "internal_error",
        }
    }

    /// Whether the caller may simply resubmit the same request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::AliasSpaceExhausted { .. })
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = match self {
            AppError::InvalidUrl { reason } => (self.to_string(), json!({ "reason": reason })),
            AppError::InvalidAlias { alias, reason } => (
                self.to_string(),
                json!({ "alias": alias, "reason": reason }),
            ),
            AppError::Validation { message, details } => (message.clone(), details.clone()),
            AppError::AliasConflict { alias } | AppError::NotFound { alias } => {
                (self.to_string(), json!({ "alias": alias }))
            }
            AppError::AliasSpaceExhausted { attempts } => (
                self.to_string(),
                json!({ "attempts": attempts, "retryable": true }),
            ),
            AppError::Internal { .. } => (INTERNAL_MESSAGE.to_string(), json!({})),
        };

        ErrorInfo {
            code: self.code(),
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        let mut response = (status, Json(body)).into_response();
        if self.is_retryable() {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from_static("1"));
        }
        response
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!(error = %e, "Database error");
        AppError::internal("Database error")
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Request validation failed", details)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "Malformed request body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::invalid_url("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::invalid_alias("a b", "x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::alias_conflict("taken").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::not_found("missing").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::AliasSpaceExhausted { attempts: 5 }.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::internal("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_error_does_not_leak_message() {
        let info = AppError::internal("connection refused at 10.0.0.5:5432").to_error_info();

        assert_eq!(info.code, "internal_error");
        assert_eq!(info.message, INTERNAL_MESSAGE);
        assert_eq!(info.details, json!({}));
    }

    #[test]
    fn test_conflict_details_carry_alias() {
        let info = AppError::alias_conflict("my-link").to_error_info();

        assert_eq!(info.code, "alias_conflict");
        assert_eq!(info.details["alias"], "my-link");
        assert!(info.message.contains("my-link"));
    }

    #[test]
    fn test_only_exhaustion_is_retryable() {
        assert!(AppError::AliasSpaceExhausted { attempts: 5 }.is_retryable());
        assert!(!AppError::alias_conflict("x").is_retryable());
        assert!(!AppError::not_found("x").is_retryable());
    }

    #[test]
    fn test_exhaustion_response_sets_retry_after() {
        let response = AppError::AliasSpaceExhausted { attempts: 5 }.into_response();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.headers()[header::RETRY_AFTER], "1");
    }
}
