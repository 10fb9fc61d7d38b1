/**
 * Opaque Token Ledger
 *
 * This module generates, stores, validates, and consumes the two
 * database-backed single-use token kinds:
 *
 * - pending-registration tokens (`temp_users`) - gate account creation
 * - password-reset tokens (`password_reset_tokens`) - gate digest overwrite
 *
 * Both are 256-bit random URL-safe strings bound to one expiry
 * timestamp. Expiry is lazy: expired rows may linger in the store but
 * every lookup is gated on `expires_at > now`, so they are never
 * treated as valid. Consumption is a `DELETE .. RETURNING` so that two
 * concurrent consumers of the same token see exactly one success;
 * callers run it inside the transaction that applies the token's
 * effect, making consume-plus-effect atomic.
 *
 * Session JWTs are not stored here; see `auth::sessions`.
 */

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Pending registration record ("temp user")
///
/// Holds the credentials of a not-yet-verified account together with
/// the verification token. At most one live row exists per email.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PendingRegistration {
    /// Row ID
    pub id: i64,
    /// Email awaiting verification (unique)
    pub email: String,
    /// Password digest captured at registration time
    pub password_hash: String,
    /// Opaque verification token (unique)
    pub token: String,
    /// Expiry timestamp
    pub expires_at: DateTime<Utc>,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

/// Password-reset token record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PasswordResetToken {
    /// Row ID
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Opaque reset token (unique)
    pub token: String,
    /// Expiry timestamp
    pub expires_at: DateTime<Utc>,
    /// Issued at timestamp
    pub created_at: DateTime<Utc>,
}

/// Generate an opaque single-use token
///
/// 32 bytes from the OS RNG, URL-safe base64 without padding: 256 bits
/// of entropy in 43 characters, safe to embed in a query string.
pub fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Issue a pending-registration token for an email
///
/// Deletes any existing pending registration for the email and inserts
/// a fresh one in a single transaction, so issuing a new token
/// supersedes (invalidates) the previous one. Absence of a prior row
/// is not an error.
pub async fn issue_pending_registration(
    pool: &PgPool,
    email: &str,
    password_hash: &str,
    ttl: Duration,
) -> Result<String, sqlx::Error> {
    let token = generate_token();
    let expires_at = Utc::now() + ttl;

    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM temp_users WHERE email = $1")
        .bind(email)
        .execute(&mut *tx)
        .await?;

    sqlx::query(
        r#"
        INSERT INTO temp_users (email, password_hash, token, expires_at)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(email)
    .bind(password_hash)
    .bind(&token)
    .bind(expires_at)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::debug!("Issued pending registration for {}", email);
    Ok(token)
}

/// Consume a pending-registration token
///
/// Deletes the row and returns it, gated on expiry. `None` means the
/// token is unknown, already consumed, superseded, or expired - the
/// caller cannot (and must not) tell which.
///
/// Run this on the transaction that creates the user so that
/// consumption and account creation commit together.
pub async fn consume_pending_registration<'e, E>(
    executor: E,
    token: &str,
    now: DateTime<Utc>,
) -> Result<Option<PendingRegistration>, sqlx::Error>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query_as::<_, PendingRegistration>(
        r#"
        DELETE FROM temp_users
        WHERE token = $1 AND expires_at > $2
        RETURNING id, email, password_hash, token, expires_at, created_at
        "#,
    )
    .bind(token)
    .bind(now)
    .fetch_optional(executor)
    .await
}

/// Issue a password-reset token for a user
///
/// Plain insert: earlier live tokens for the same user remain valid
/// until consumed or expired.
pub async fn issue_reset_token(
    pool: &PgPool,
    user_id: i64,
    ttl: Duration,
) -> Result<String, sqlx::Error> {
    let token = generate_token();
    let expires_at = Utc::now() + ttl;

    sqlx::query(
        r#"
        INSERT INTO password_reset_tokens (user_id, token, expires_at)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(user_id)
    .bind(&token)
    .bind(expires_at)
    .execute(pool)
    .await?;

    tracing::debug!("Issued password-reset token for user {}", user_id);
    Ok(token)
}

/// Consume a password-reset token
///
/// Deletes the row and returns it, gated on expiry. Run this on the
/// transaction that overwrites the password digest so the token cannot
/// be used twice, including under concurrent use.
pub async fn consume_reset_token<'e, E>(
    executor: E,
    token: &str,
    now: DateTime<Utc>,
) -> Result<Option<PasswordResetToken>, sqlx::Error>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query_as::<_, PasswordResetToken>(
        r#"
        DELETE FROM password_reset_tokens
        WHERE token = $1 AND expires_at > $2
        RETURNING id, user_id, token, expires_at, created_at
        "#,
    )
    .bind(token)
    .bind(now)
    .fetch_optional(executor)
    .await
}

/// Look up a reset token without consuming it
///
/// Read-only expiry-gated check used by front-end pre-validation of
/// reset links.
pub async fn peek_reset_token(
    pool: &PgPool,
    token: &str,
    now: DateTime<Utc>,
) -> Result<Option<PasswordResetToken>, sqlx::Error> {
    sqlx::query_as::<_, PasswordResetToken>(
        r#"
        SELECT id, user_id, token, expires_at, created_at
        FROM password_reset_tokens
        WHERE token = $1 AND expires_at > $2
        "#,
    )
    .bind(token)
    .bind(now)
    .fetch_optional(pool)
    .await
}
