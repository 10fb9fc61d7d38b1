/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * the public and authenticated route tables into a single Axum router.
 *
 * The auth middleware is layered only onto the authenticated table, so
 * registration, login, and the reset endpoints stay reachable without
 * a session token.
 */

use axum::middleware;
use axum::Router;

use crate::middleware::auth::auth_middleware;
use crate::routes::api_routes::{authenticated_routes, public_routes};
use crate::server::state::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let protected = authenticated_routes().layer(middleware::from_fn_with_state(
        state.clone(),
        auth_middleware,
    ));

    Router::new()
        .merge(public_routes())
        .merge(protected)
        .with_state(state)
}
