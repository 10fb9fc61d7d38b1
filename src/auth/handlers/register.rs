/**
 * Registration Handlers
 *
 * This module implements the two-step registration flow:
 *
 * 1. `POST /auth/register` - validate credentials, store a pending
 *    registration with a fresh verification token, send the
 *    verification link by email
 * 2. `GET /auth/verify_email?token=` - consume the token and promote
 *    the pending registration into a real user
 *
 * # State Machine
 *
 * `Requested -> PendingVerification -> Verified`, with
 * `PendingVerification -> ExpiredUnverified` reached implicitly when
 * the token's 30-minute TTL lapses. Re-registering the same email
 * while pending supersedes the earlier token.
 *
 * # Atomicity
 *
 * Verification consumes the token and creates the user in one
 * transaction. Two verifiers racing on the same token get exactly one
 * success; two pending flows racing on the same email are serialized
 * by the unique constraint on `users.email` - the loser gets
 * `EmailAlreadyRegistered`.
 */

use axum::extract::{Query, State};
use axum::response::Json;
use bcrypt::{hash, DEFAULT_COST};
use chrono::Utc;

use crate::auth::handlers::types::{
    MessageResponse, RegisterRequest, RegisterResponse, VerifyEmailParams,
};
use crate::auth::handlers::validate_password;
use crate::auth::tokens::{consume_pending_registration, issue_pending_registration};
use crate::auth::users::{create_user, find_user_by_email};
use crate::error::{is_unique_violation, ApiError};
use crate::server::state::AppState;

/// Validate email format
///
/// Basic shape check: an '@' with a dotted domain after it.
fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    }
}

/// Registration handler
///
/// Creates a pending registration and triggers the verification email.
/// No user row exists until the token is verified.
///
/// # Errors
///
/// * `ApiError::Validation` - malformed email
/// * `ApiError::WeakPassword` - password under 8 characters
/// * `ApiError::EmailAlreadyRegistered` - a verified user already owns this email
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    tracing::info!("Registration request for {}", request.email);

    if !is_valid_email(&request.email) {
        tracing::warn!("Invalid email format: {}", request.email);
        return Err(ApiError::Validation("Invalid email format".to_string()));
    }

    validate_password(&request.password)?;

    if find_user_by_email(&state.db, &request.email).await?.is_some() {
        tracing::warn!("Email already registered: {}", request.email);
        return Err(ApiError::EmailAlreadyRegistered);
    }

    let password_hash = hash(&request.password, DEFAULT_COST)
        .map_err(|e| ApiError::Internal(format!("Failed to hash password: {}", e)))?;

    let token = issue_pending_registration(
        &state.db,
        &request.email,
        &password_hash,
        state.config.verification_ttl,
    )
    .await?;

    // Fire-and-forget: a delivery failure must not roll back the
    // pending registration, and the token is still returned below.
    let mailer = state.mailer.clone();
    let email = request.email.clone();
    let email_token = token.clone();
    tokio::spawn(async move {
        mailer.send_verification_email(&email, &email_token).await;
    });

    Ok(Json(RegisterResponse {
        message: "Verification email sent. Check your inbox.".to_string(),
        token,
    }))
}

/// Email-verification handler
///
/// Consumes the pending-registration token and creates the user, as
/// one transaction.
///
/// # Errors
///
/// * `ApiError::TokenExpiredOrInvalid` - token unknown, expired, superseded, or already consumed
/// * `ApiError::EmailAlreadyRegistered` - a user with this email was created in the interim
pub async fn verify_email(
    State(state): State<AppState>,
    Query(params): Query<VerifyEmailParams>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut tx = state.db.begin().await?;

    let pending = consume_pending_registration(&mut *tx, &params.token, Utc::now())
        .await?
        .ok_or(ApiError::TokenExpiredOrInvalid)?;

    let user = create_user(&mut *tx, &pending.email, &pending.password_hash)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                // Another flow finalized this email first
                ApiError::EmailAlreadyRegistered
            } else {
                ApiError::Database(e)
            }
        })?;

    tx.commit().await?;

    tracing::info!("Email verified, user created: {} (id {})", user.email, user.id);

    Ok(Json(MessageResponse {
        message: "Email verified and account created".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("bob@example.com"));
        assert!(is_valid_email("a.b+c@sub.example.org"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email("bob"));
        assert!(!is_valid_email("bob@localhost"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email(""));
    }
}
