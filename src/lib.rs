//! Linkstash - Main Library
//!
//! Linkstash is a bookmark-management backend built with Rust. Users
//! register (with email verification), authenticate with JWT bearer
//! tokens, and organize saved web links into named collections.
//!
//! # Overview
//!
//! This library provides the core functionality for Linkstash, including:
//! - Registration with single-use email-verification tokens
//! - Stateless JWT session issuance and validation
//! - Single-use, expiring password-reset tokens
//! - Link and collection CRUD with per-user ownership
//! - Best-effort SMTP delivery of verification and reset links
//!
//! # Module Structure
//!
//! - **`server`** - Configuration, application state, app assembly
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Credential store, token ledger, sessions, handlers
//! - **`middleware`** - Bearer-token authentication middleware
//! - **`email`** - SMTP delivery collaborator
//! - **`links`** - Link CRUD
//! - **`collections`** - Collection CRUD and membership
//! - **`error`** - API error taxonomy
//!
//! # Token Model
//!
//! Two token shapes coexist:
//!
//! - **Opaque tokens** (email verification, password reset): 32
//!   random bytes, URL-safe base64, stored in the database and
//!   consumed exactly once via expiry-gated `DELETE .. RETURNING`.
//! - **Session tokens** (JWT): signed claim sets validated without a
//!   store round-trip. No server-side revocation before expiry.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Authentication, token ledger, user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Outbound email delivery
pub mod email;

/// Link CRUD
pub mod links;

/// Collection CRUD and membership
pub mod collections;

/// API error types
pub mod error;

/// Re-export commonly used types
pub use error::ApiError;
pub use server::config::AppConfig;
pub use server::init::create_app;
pub use server::state::AppState;
