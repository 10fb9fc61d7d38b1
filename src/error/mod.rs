//! Error Module
//!
//! Defines the API error taxonomy and its mapping to HTTP responses.
//! Every endpoint returns either a success payload or one structured
//! error (`{code, message}`); expected failures are enum variants, not
//! exceptions or raw storage errors.

/// Error type definitions
pub mod types;

pub use types::{is_unique_violation, ApiError};
