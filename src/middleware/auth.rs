/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require
 * user authentication. It extracts and verifies JWT tokens from the
 * Authorization header and resolves the acting identity for handlers.
 *
 * A token whose subject no longer maps to a user (deleted after
 * issuance) is treated as unauthenticated, not as a server error.
 */

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use crate::auth::sessions::verify_token;
use crate::auth::users::find_user_by_id;
use crate::error::ApiError;
use crate::server::state::AppState;

/// Authenticated user data resolved from a bearer token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub email: String,
}

/// Authentication middleware
///
/// 1. Extracts the JWT from the `Authorization: Bearer <token>` header
/// 2. Verifies signature and expiry
/// 3. Resolves the subject to a user record
/// 4. Attaches the identity to request extensions for handlers
///
/// Fails with `ApiError::Unauthenticated` on any missing/invalid
/// token or unresolvable subject.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            ApiError::Unauthenticated
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("Invalid Authorization header format");
        ApiError::Unauthenticated
    })?;

    let user_id = verify_token(token, &state.config.jwt_secret).ok_or_else(|| {
        tracing::warn!("Invalid session token");
        ApiError::Unauthenticated
    })?;

    let user = find_user_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Session subject {} no longer exists", user_id);
            ApiError::Unauthenticated
        })?;

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: user.id,
        email: user.email,
    });

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Use as a handler parameter to get the identity resolved by
/// `auth_middleware`.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl axum::extract::FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                ApiError::Unauthenticated
            })?;

        Ok(AuthUser(user))
    }
}
