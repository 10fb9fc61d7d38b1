/**
 * API Error Types
 *
 * This module defines the error taxonomy surfaced by every endpoint.
 * Expected failures (invalid token, bad password, duplicate email) are
 * modeled as enum variants rather than panics or raw storage errors,
 * and each variant maps to a stable HTTP status and machine-readable
 * code.
 *
 * # Information Leakage
 *
 * Several variants carry deliberately generic messages:
 * - `InvalidCredentials` does not distinguish unknown email from wrong password
 * - `TokenExpiredOrInvalid` does not distinguish expired from malformed or consumed
 *
 * Store-level failures are translated to the domain error that caused
 * them (unique violation on `users.email` becomes
 * `EmailAlreadyRegistered`); raw database errors are never surfaced to
 * clients.
 */

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// API-visible error taxonomy
#[derive(Debug, Error)]
pub enum ApiError {
    /// Login failed; uniform regardless of whether the email exists
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Request lacks a valid bearer token, or its subject no longer resolves
    #[error("Authentication required")]
    Unauthenticated,

    /// A user with this email already exists
    #[error("Email already registered")]
    EmailAlreadyRegistered,

    /// Opaque token is unknown, already consumed, or past its expiry
    #[error("Invalid or expired token")]
    TokenExpiredOrInvalid,

    /// New password and confirmation differ
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Password shorter than the 8-character policy minimum
    #[error("Password must be at least 8 characters")]
    WeakPassword,

    /// The owning user vanished mid-flow
    #[error("User not found")]
    UserNotFound,

    /// Request-shape validation failure
    #[error("{0}")]
    Validation(String),

    /// Referenced entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// Entity already exists (duplicate link URL, collection name, membership)
    #[error("{0}")]
    Conflict(String),

    /// Database failure; logged, surfaced as a generic 500
    #[error("Internal server error")]
    Database(#[from] sqlx::Error),

    /// Hashing or token-signing failure; logged, surfaced as a generic 500
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials | Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::EmailAlreadyRegistered | Self::Conflict(_) => StatusCode::CONFLICT,
            Self::TokenExpiredOrInvalid
            | Self::PasswordMismatch
            | Self::WeakPassword
            | Self::UserNotFound
            | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the machine-readable error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "invalid_credentials",
            Self::Unauthenticated => "unauthenticated",
            Self::EmailAlreadyRegistered => "email_already_registered",
            Self::TokenExpiredOrInvalid => "token_expired_or_invalid",
            Self::PasswordMismatch => "password_mismatch",
            Self::WeakPassword => "weak_password",
            Self::UserNotFound => "user_not_found",
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "not_found",
            Self::Conflict(_) => "conflict",
            Self::Database(_) | Self::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Server-side failures keep their detail in the log only
        match &self {
            ApiError::Database(err) => {
                tracing::error!("Database error: {:?}", err);
            }
            ApiError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
            }
            _ => {}
        }

        let body = Json(serde_json::json!({
            "code": self.code(),
            "message": self.to_string(),
        }));

        (self.status_code(), body).into_response()
    }
}

/// Check whether a sqlx error is a Postgres unique-constraint violation
///
/// Used by callers to translate constraint violations into the domain
/// error that caused them (duplicate email, duplicate URL, duplicate
/// collection name).
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23505"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Unauthenticated.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::EmailAlreadyRegistered.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::TokenExpiredOrInvalid.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::WeakPassword.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::NotFound("missing".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_errors_hide_detail() {
        let err = ApiError::Internal("bcrypt exploded".into());
        assert_eq!(err.to_string(), "Internal server error");
        assert_eq!(err.code(), "internal");
    }

    #[test]
    fn test_credential_errors_are_uniform() {
        // The message must not reveal whether the email exists
        assert_eq!(
            ApiError::InvalidCredentials.to_string(),
            "Invalid email or password"
        );
        assert_eq!(
            ApiError::TokenExpiredOrInvalid.to_string(),
            "Invalid or expired token"
        );
    }
}
