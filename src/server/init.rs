/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP
 * server: database connection, migrations, mailer construction, and
 * route configuration.
 *
 * # Initialization Process
 *
 * 1. Connect the PostgreSQL pool from `AppConfig::database_url`
 * 2. Run embedded sqlx migrations
 * 3. Build the `Mailer` from the optional SMTP configuration
 * 4. Assemble the router with shared `AppState`
 *
 * Unlike optional collaborators (SMTP), a missing or unreachable
 * database fails startup: every flow in this server goes through the
 * store.
 */

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;

use crate::email::Mailer;
use crate::routes::router::create_router;
use crate::server::config::AppConfig;
use crate::server::state::AppState;

/// Create and configure the Axum application
///
/// Connects to the database, runs migrations, and returns a router
/// ready to serve requests.
pub async fn create_app(config: AppConfig) -> Result<Router, Box<dyn std::error::Error>> {
    tracing::info!("Initializing Linkstash backend server");

    let pool = PgPool::connect(&config.database_url).await?;
    tracing::info!("Database connection pool created");

    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database migrations completed");

    let state = build_state(pool, config);
    Ok(create_router(state))
}

/// Build application state from an existing pool
///
/// Used by `create_app` and by integration tests that manage their own
/// pool and migrations.
pub fn build_state(pool: PgPool, config: AppConfig) -> AppState {
    let mailer = Mailer::from_config(config.smtp.as_ref(), &config.base_url);
    AppState {
        db: pool,
        config: Arc::new(config),
        mailer,
    }
}
