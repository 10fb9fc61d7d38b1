//! Links Module
//!
//! Link CRUD: saved URLs with metadata, owned by a user, unique per
//! `(user, url)`.

/// Database operations
pub mod db;

/// HTTP handlers
pub mod handlers;

pub use db::Link;

use crate::error::ApiError;

/// The link kinds the schema accepts
pub const ALLOWED_LINK_KINDS: [&str; 5] = ["website", "book", "article", "music", "video"];

/// Kind used when the client does not supply one
pub const DEFAULT_LINK_KIND: &str = "website";

/// Reject kinds outside the whitelist before they hit the CHECK constraint
pub fn validate_kind(kind: &str) -> Result<(), ApiError> {
    if ALLOWED_LINK_KINDS.contains(&kind) {
        Ok(())
    } else {
        Err(ApiError::Validation(format!(
            "Invalid link kind {:?}; allowed: {}",
            kind,
            ALLOWED_LINK_KINDS.join(", ")
        )))
    }
}
