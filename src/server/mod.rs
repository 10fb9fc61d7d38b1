//! Server Module
//!
//! Handles server setup and lifecycle:
//! - Configuration loading (`config`)
//! - Application state (`state`)
//! - App assembly: pool, migrations, routes (`init`)

/// Server initialization and setup
pub mod init;

/// Application state structures
pub mod state;

/// Configuration loading
pub mod config;

/// Re-export commonly used items
pub use config::AppConfig;
pub use init::create_app;
pub use state::AppState;
