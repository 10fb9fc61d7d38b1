/**
 * Current User Handler
 *
 * Implements GET /me: resolves the bearer token to the acting
 * identity. The heavy lifting happens in the auth middleware; this
 * handler just echoes the resolved user.
 */

use axum::response::Json;

use crate::auth::handlers::types::MeResponse;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

/// Get current user info
pub async fn get_me(AuthUser(user): AuthUser) -> Result<Json<MeResponse>, ApiError> {
    Ok(Json(MeResponse {
        id: user.user_id,
        email: user.email,
    }))
}
