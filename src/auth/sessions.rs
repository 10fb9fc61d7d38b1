/**
 * Session Management and JWT Tokens
 *
 * This module handles JWT token generation and validation for user
 * sessions. Session tokens are stateless: validation is a pure
 * function of the token, the signing secret, and the current time.
 *
 * There is no server-side revocation list, so a live token cannot be
 * invalidated before its expiry; clients "log out" by discarding the
 * token. Deployments that need revocation would have to move sessions
 * to store-backed opaque tokens, at the cost of a lookup per request.
 *
 * The signing secret is injected by callers (it lives in `AppConfig`)
 * rather than read from the environment here.
 */

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

/// Create a JWT session token for a user
///
/// The claim set is `{sub: user_id, exp: now + ttl, iat: now}` signed
/// with HS256.
pub fn create_token(
    user_id: i64,
    secret: &str,
    ttl: Duration,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();

    let claims = Claims {
        sub: user_id.to_string(),
        exp: (now + ttl).timestamp(),
        iat: now.timestamp(),
    };

    let key = EncodingKey::from_secret(secret.as_ref());
    encode(&Header::default(), &claims, &key)
}

/// Verify a session token and extract its subject
///
/// Returns `Some(user_id)` for a structurally valid, correctly signed,
/// unexpired token and `None` otherwise. Malformed, tampered, and
/// expired tokens are deliberately indistinguishable to callers.
///
/// Leeway is zero so a token is unusable at its exact expiry instant.
pub fn verify_token(token: &str, secret: &str) -> Option<i64> {
    let key = DecodingKey::from_secret(secret.as_ref());
    let mut validation = Validation::default();
    validation.leeway = 0;

    let token_data = decode::<Claims>(token, &key, &validation).ok()?;
    token_data.claims.sub.parse::<i64>().ok()
}
