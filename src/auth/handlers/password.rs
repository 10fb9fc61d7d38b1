/**
 * Password Handlers
 *
 * This module implements the password-reset flow and authenticated
 * password change:
 *
 * - `POST /user/request-password-reset` - issue a reset token and email
 *   a reset link; the response is identical whether or not the account
 *   exists (anti-enumeration)
 * - `POST /user/reset-password` - consume the token and overwrite the
 *   digest, as one transaction
 * - `GET /user/validate-reset-token` - read-only pre-validation of a
 *   reset link; does not consume
 * - `POST /user/change_password` - authenticated digest change
 *
 * # State Machine
 *
 * `Requested -> Issued -> Consumed`, with `Issued -> Expired` reached
 * implicitly when the 30-minute TTL lapses. Multiple live tokens per
 * user are permitted; each is single-use.
 */

use axum::extract::{Query, State};
use axum::response::Json;
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;

use crate::auth::handlers::types::{
    ChangePasswordRequest, MessageResponse, RequestPasswordResetRequest, ResetPasswordRequest,
    ValidateResetTokenParams, ValidateResetTokenResponse,
};
use crate::auth::handlers::validate_password;
use crate::auth::tokens::{consume_reset_token, issue_reset_token, peek_reset_token};
use crate::auth::users::{find_user_by_email, find_user_by_id, update_password};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::server::state::AppState;

/// The one message every reset request gets, account or no account
const RESET_REQUESTED_MESSAGE: &str =
    "If an account with that email exists, a reset link has been sent.";

/// Request a password reset
///
/// Always returns the same generic message. When the account exists a
/// reset token is issued and the link is emailed; delivery failures are
/// logged, never surfaced.
pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(request): Json<RequestPasswordResetRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    tracing::info!("Password reset requested");

    if let Some(user) = find_user_by_email(&state.db, &request.email).await? {
        let token = issue_reset_token(&state.db, user.id, state.config.reset_ttl).await?;

        let mailer = state.mailer.clone();
        let email = user.email.clone();
        tokio::spawn(async move {
            mailer.send_password_reset_email(&email, &token).await;
        });
    }

    Ok(Json(MessageResponse {
        message: RESET_REQUESTED_MESSAGE.to_string(),
    }))
}

/// Confirm a password reset
///
/// Consumes the token and overwrites the password digest in one
/// transaction, so a token cannot apply twice even under concurrent
/// use.
///
/// # Errors
///
/// * `ApiError::PasswordMismatch` - the two supplied passwords differ
/// * `ApiError::WeakPassword` - new password under 8 characters
/// * `ApiError::TokenExpiredOrInvalid` - token unknown, expired, or already consumed
/// * `ApiError::UserNotFound` - the owning user vanished
pub async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    if request.new_password != request.confirm_password {
        return Err(ApiError::PasswordMismatch);
    }

    validate_password(&request.new_password)?;

    let password_hash = hash(&request.new_password, DEFAULT_COST)
        .map_err(|e| ApiError::Internal(format!("Failed to hash password: {}", e)))?;

    let mut tx = state.db.begin().await?;

    let reset_token = consume_reset_token(&mut *tx, &request.token, Utc::now())
        .await?
        .ok_or(ApiError::TokenExpiredOrInvalid)?;

    let updated = update_password(&mut *tx, reset_token.user_id, &password_hash).await?;
    if updated == 0 {
        // Token outlived its user; nothing to apply
        return Err(ApiError::UserNotFound);
    }

    tx.commit().await?;

    tracing::info!("Password reset completed for user {}", reset_token.user_id);

    Ok(Json(MessageResponse {
        message: "Password has been reset".to_string(),
    }))
}

/// Pre-validate a reset token
///
/// Read-only existence and expiry check for front-end use before
/// showing the reset form. Does not consume the token.
pub async fn validate_reset_token(
    State(state): State<AppState>,
    Query(params): Query<ValidateResetTokenParams>,
) -> Result<Json<ValidateResetTokenResponse>, ApiError> {
    let reset_token = peek_reset_token(&state.db, &params.token, Utc::now())
        .await?
        .ok_or(ApiError::TokenExpiredOrInvalid)?;

    Ok(Json(ValidateResetTokenResponse {
        valid: true,
        user_id: reset_token.user_id,
    }))
}

/// Change the acting user's password
///
/// # Errors
///
/// * `ApiError::WeakPassword` - new password under 8 characters
/// * `ApiError::PasswordMismatch` - the two supplied passwords differ
/// * `ApiError::Validation` - new password equals the current one
pub async fn change_password(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    validate_password(&request.new_password1)?;

    if request.new_password1 != request.new_password2 {
        return Err(ApiError::PasswordMismatch);
    }

    let user = find_user_by_id(&state.db, auth.user_id)
        .await?
        .ok_or(ApiError::Unauthenticated)?;

    let same_as_old = verify(&request.new_password1, &user.password_hash)
        .map_err(|e| ApiError::Internal(format!("Password verification error: {}", e)))?;
    if same_as_old {
        return Err(ApiError::Validation(
            "New password must differ from the current one".to_string(),
        ));
    }

    let password_hash = hash(&request.new_password1, DEFAULT_COST)
        .map_err(|e| ApiError::Internal(format!("Failed to hash password: {}", e)))?;

    update_password(&state.db, user.id, &password_hash).await?;

    tracing::info!("Password changed for user {}", user.id);

    Ok(Json(MessageResponse {
        message: "Password changed".to_string(),
    }))
}
