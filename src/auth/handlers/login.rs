/**
 * Login Handler
 *
 * This module implements the user authentication handler for
 * POST /auth/login.
 *
 * # Security
 *
 * - Passwords are verified with bcrypt
 * - Unknown email and wrong password return the same
 *   `InvalidCredentials` error, so responses never reveal whether an
 *   account exists
 * - Passwords are never logged or returned
 */

use axum::extract::State;
use axum::response::Json;
use bcrypt::verify;

use crate::auth::handlers::types::{LoginRequest, LoginResponse};
use crate::auth::sessions::create_token;
use crate::auth::users::find_user_by_email;
use crate::error::ApiError;
use crate::server::state::AppState;

/// Login handler
///
/// Verifies the email and password and issues a JWT session token.
///
/// # Errors
///
/// * `ApiError::InvalidCredentials` - unknown email or wrong password (uniform)
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    tracing::info!("Login request for {}", request.email);

    let user = find_user_by_email(&state.db, &request.email)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Login failed: unknown email");
            ApiError::InvalidCredentials
        })?;

    let valid = verify(&request.password, &user.password_hash)
        .map_err(|e| ApiError::Internal(format!("Password verification error: {}", e)))?;

    if !valid {
        tracing::warn!("Login failed: wrong password for user {}", user.id);
        return Err(ApiError::InvalidCredentials);
    }

    let access_token = create_token(user.id, &state.config.jwt_secret, state.config.session_ttl)
        .map_err(|e| ApiError::Internal(format!("Failed to create token: {}", e)))?;

    tracing::info!("User logged in: {} (id {})", user.email, user.id);

    Ok(Json(LoginResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}
