//! Collections Module
//!
//! Named groups of links, owned by a user, with a many-to-many
//! membership table. Names are unique per user.

/// Database operations
pub mod db;

/// HTTP handlers
pub mod handlers;

pub use db::Collection;
