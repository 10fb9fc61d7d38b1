/**
 * API Route Handlers
 *
 * This module defines the route tables, split into public routes and
 * routes behind the bearer-token middleware.
 *
 * # Routes
 *
 * ## Public
 * - `POST /auth/register` - start registration (sends verification email)
 * - `GET  /auth/verify_email?token=` - finish registration
 * - `POST /auth/login` - authenticate, returns a JWT
 * - `POST /user/request-password-reset` - request a reset link
 * - `POST /user/reset-password` - consume a reset token
 * - `GET  /user/validate-reset-token?token=` - pre-validate a reset token
 *
 * ## Authenticated (Authorization: Bearer <jwt>)
 * - `GET  /me` - acting identity
 * - `POST /user/change_password`
 * - `GET|POST|PATCH|DELETE /api/links`, `GET /api/links/find`
 * - `GET|POST|PATCH|DELETE /api/collections`, `GET /api/collections/find`
 * - `POST|DELETE /api/collections/links` - membership
 */

use axum::routing::{get, post};
use axum::Router;

use crate::auth::handlers::{
    change_password, get_me, login, register, request_password_reset, reset_password,
    validate_reset_token, verify_email,
};
use crate::collections::handlers as collections;
use crate::links::handlers as links;
use crate::server::state::AppState;

/// Routes reachable without a session token
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/verify_email", get(verify_email))
        .route("/auth/login", post(login))
        .route("/user/request-password-reset", post(request_password_reset))
        .route("/user/reset-password", post(reset_password))
        .route("/user/validate-reset-token", get(validate_reset_token))
}

/// Routes requiring a valid bearer token
///
/// The auth middleware is layered onto this router by `create_router`.
pub fn authenticated_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_me))
        .route("/user/change_password", post(change_password))
        // Links
        .route(
            "/api/links",
            get(links::get_links)
                .post(links::add_link)
                .patch(links::patch_link)
                .delete(links::remove_link),
        )
        .route("/api/links/find", get(links::get_link))
        // Collections
        .route(
            "/api/collections",
            get(collections::get_collections)
                .post(collections::add_collection)
                .patch(collections::patch_collection)
                .delete(collections::remove_collection),
        )
        .route("/api/collections/find", get(collections::get_collection))
        // Collection membership
        .route(
            "/api/collections/links",
            post(collections::add_member).delete(collections::remove_member),
        )
}
