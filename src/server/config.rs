/**
 * Server Configuration
 *
 * This module handles loading and validation of server configuration.
 * Configuration is read from environment variables exactly once at
 * startup into an immutable `AppConfig`, which is then passed
 * explicitly into the components that need it (token ledger, mailer).
 * No code reads the environment at request time.
 *
 * # Required Variables
 *
 * - `DATABASE_URL` - PostgreSQL connection string
 * - `JWT_SECRET` - HMAC secret for session tokens
 *
 * # Optional Variables
 *
 * - `BASE_URL` - public base URL used in emailed links (default `http://localhost:3000`)
 * - `SERVER_PORT` - listen port (default 3000)
 * - `VERIFICATION_TTL_MINUTES`, `RESET_TTL_MINUTES`, `SESSION_TTL_MINUTES` - token lifetimes (default 30)
 * - `SMTP_HOST`, `SMTP_USERNAME`, `SMTP_PASSWORD`, `SMTP_FROM` - outbound mail; when absent
 *   the mailer is disabled and sends are logged as skipped
 */

use chrono::Duration;
use thiserror::Error;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A variable is set but cannot be parsed
    #[error("invalid value for {0}: {1}")]
    InvalidVar(&'static str, String),
}

/// SMTP transport settings
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// SMTP relay hostname
    pub host: String,
    /// SMTP account username
    pub username: String,
    /// SMTP account password
    pub password: String,
    /// From address for outbound mail
    pub from: String,
}

/// Process-wide immutable configuration
///
/// Built once in `main` and shared through `AppState` as `Arc<AppConfig>`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// PostgreSQL connection string
    pub database_url: String,
    /// HMAC secret for signing session tokens
    pub jwt_secret: String,
    /// Public base URL embedded in verification and reset links
    pub base_url: String,
    /// Listen port for the HTTP server
    pub server_port: u16,
    /// Lifetime of email-verification tokens
    pub verification_ttl: Duration,
    /// Lifetime of password-reset tokens
    pub reset_ttl: Duration,
    /// Lifetime of session tokens
    pub session_ttl: Duration,
    /// Outbound mail settings; `None` disables delivery
    pub smtp: Option<SmtpConfig>,
}

impl AppConfig {
    /// Load configuration from the environment
    ///
    /// Fails fast when `DATABASE_URL` or `JWT_SECRET` is missing: every
    /// flow in this server needs the store and the signing secret, so
    /// starting without them would only defer the failure to request time.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?;
        let jwt_secret =
            std::env::var("JWT_SECRET").map_err(|_| ConfigError::MissingVar("JWT_SECRET"))?;

        let base_url = std::env::var("BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        let server_port = match std::env::var("SERVER_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidVar("SERVER_PORT", raw))?,
            Err(_) => 3000,
        };

        let verification_ttl = ttl_minutes("VERIFICATION_TTL_MINUTES")?;
        let reset_ttl = ttl_minutes("RESET_TTL_MINUTES")?;
        let session_ttl = ttl_minutes("SESSION_TTL_MINUTES")?;

        let smtp = load_smtp();
        if smtp.is_none() {
            tracing::warn!("SMTP not configured; outbound email delivery is disabled");
        }

        Ok(Self {
            database_url,
            jwt_secret,
            base_url,
            server_port,
            verification_ttl,
            reset_ttl,
            session_ttl,
            smtp,
        })
    }
}

/// Read a TTL variable in minutes, defaulting to 30
fn ttl_minutes(var: &'static str) -> Result<Duration, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => {
            let minutes = raw
                .parse::<i64>()
                .map_err(|_| ConfigError::InvalidVar(var, raw.clone()))?;
            if minutes <= 0 {
                return Err(ConfigError::InvalidVar(var, raw));
            }
            Ok(Duration::minutes(minutes))
        }
        Err(_) => Ok(Duration::minutes(30)),
    }
}

/// Load SMTP settings if the full block is present
///
/// A partially configured block is treated as disabled and logged, rather
/// than failing startup: delivery is a best-effort collaborator.
fn load_smtp() -> Option<SmtpConfig> {
    let host = std::env::var("SMTP_HOST").ok();
    let username = std::env::var("SMTP_USERNAME").ok();
    let password = std::env::var("SMTP_PASSWORD").ok();
    let from = std::env::var("SMTP_FROM").ok();

    match (host, username, password, from) {
        (Some(host), Some(username), Some(password), Some(from)) => Some(SmtpConfig {
            host,
            username,
            password,
            from,
        }),
        (None, None, None, None) => None,
        _ => {
            tracing::warn!("Incomplete SMTP configuration; outbound email delivery is disabled");
            None
        }
    }
}
