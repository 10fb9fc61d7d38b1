/**
 * Authentication Handler Types
 *
 * This module defines the request and response types used by the
 * authentication, registration, and password handlers.
 */

use serde::{Deserialize, Serialize};

/// Registration request
#[derive(Deserialize, Serialize, Debug)]
pub struct RegisterRequest {
    /// User's email address
    pub email: String,
    /// User's password (will be hashed before storage)
    pub password: String,
}

/// Registration response
///
/// The verification token is echoed in the response so deployments
/// without SMTP (and tests) can complete the flow; with SMTP
/// configured it also travels by email.
#[derive(Serialize, Deserialize, Debug)]
pub struct RegisterResponse {
    /// Human-readable status message
    pub message: String,
    /// Verification token for the pending registration
    pub token: String,
}

/// Generic success message
#[derive(Serialize, Deserialize, Debug)]
pub struct MessageResponse {
    /// Human-readable status message
    pub message: String,
}

/// Query parameters for GET /auth/verify_email
#[derive(Deserialize, Debug)]
pub struct VerifyEmailParams {
    /// Opaque verification token from the emailed link
    pub token: String,
}

/// Login request
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    /// User's email address
    pub email: String,
    /// User's password (verified against the stored digest)
    pub password: String,
}

/// Login response: a bearer session token
#[derive(Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    /// Signed JWT session token
    pub access_token: String,
    /// Always "bearer"
    pub token_type: String,
}

/// Current-user response (without sensitive data)
#[derive(Serialize, Deserialize, Debug)]
pub struct MeResponse {
    /// User's unique ID
    pub id: i64,
    /// User's email address
    pub email: String,
}

/// Change-password request (authenticated)
#[derive(Deserialize, Serialize, Debug)]
pub struct ChangePasswordRequest {
    /// New password
    pub new_password1: String,
    /// New password, repeated
    pub new_password2: String,
}

/// Password-reset request
#[derive(Deserialize, Serialize, Debug)]
pub struct RequestPasswordResetRequest {
    /// Email of the account to reset (existence is never revealed)
    pub email: String,
}

/// Password-reset confirmation
#[derive(Deserialize, Serialize, Debug)]
pub struct ResetPasswordRequest {
    /// Opaque reset token from the emailed link
    pub token: String,
    /// New password
    pub new_password: String,
    /// New password, repeated
    pub confirm_password: String,
}

/// Query parameters for GET /user/validate-reset-token
#[derive(Deserialize, Debug)]
pub struct ValidateResetTokenParams {
    /// Opaque reset token to check
    pub token: String,
}

/// Reset-token pre-validation response
#[derive(Serialize, Deserialize, Debug)]
pub struct ValidateResetTokenResponse {
    /// Whether the token is live
    pub valid: bool,
    /// Owning user of the token
    pub user_id: i64,
}
