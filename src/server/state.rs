/**
 * Application State Management
 *
 * This module defines the application state structure shared by all
 * request handlers.
 *
 * # Thread Safety
 *
 * - `PgPool` is internally reference-counted and thread-safe
 * - `AppConfig` is immutable after startup, shared via `Arc`
 * - `Mailer` clones share one SMTP transport
 *
 * There is no other shared mutable state between requests; all
 * coordination happens through database transactions.
 */

use std::sync::Arc;

use sqlx::PgPool;

use crate::email::Mailer;
use crate::server::config::AppConfig;

/// Application state for the Axum server
///
/// Cloned per handler invocation; every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,
    /// Process-wide immutable configuration
    pub config: Arc<AppConfig>,
    /// Outbound email collaborator (may be disabled)
    pub mailer: Mailer,
}
