//! Authentication Module
//!
//! Covers the full token lifecycle:
//!
//! - **`users`** - credential store (user records, email uniqueness)
//! - **`tokens`** - opaque single-use token ledger (verification, reset)
//! - **`sessions`** - stateless JWT session tokens
//! - **`handlers`** - HTTP handlers for the flows built on the above

/// User model and database operations
pub mod users;

/// Opaque single-use token ledger
pub mod tokens;

/// JWT session token management
pub mod sessions;

/// HTTP handlers
pub mod handlers;

pub use handlers::{
    change_password, get_me, login, register, request_password_reset, reset_password,
    validate_reset_token, verify_email,
};
pub use sessions::{create_token, verify_token};
pub use users::User;
