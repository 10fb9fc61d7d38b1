//! Authentication Handlers
//!
//! HTTP handlers for registration, login, current-user lookup, and the
//! password flows. Shared request/response types live in `types`.

/// Request and response types
pub mod types;

/// Registration and email verification
pub mod register;

/// Login
pub mod login;

/// Current user
pub mod me;

/// Password reset and change
pub mod password;

pub use login::login;
pub use me::get_me;
pub use password::{change_password, request_password_reset, reset_password, validate_reset_token};
pub use register::{register, verify_email};

use crate::error::ApiError;

/// Minimum password length accepted anywhere a password is set
pub const MIN_PASSWORD_LEN: usize = 8;

/// Enforce the password policy
///
/// Applied at registration, password change, and reset confirmation.
pub fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::WeakPassword);
    }
    Ok(())
}
