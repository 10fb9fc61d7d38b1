//! Routes Module
//!
//! HTTP route configuration: route tables in `api_routes`, assembly in
//! `router`.

/// Main router assembly
pub mod router;

/// API route tables
pub mod api_routes;

pub use router::create_router;
