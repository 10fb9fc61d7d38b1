//! Middleware Module
//!
//! Request-processing middleware. Currently just bearer-token
//! authentication.

/// Bearer-token authentication
pub mod auth;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
