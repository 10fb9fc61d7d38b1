//! Registration and session integration tests
//!
//! Exercises the registration state machine (pending -> verified),
//! supersession, single-use verification tokens, and the login /
//! identity-resolution round trip. Skips when `DATABASE_URL` is unset.

mod common;

use axum::http::StatusCode;
use chrono::Duration;
use pretty_assertions::assert_eq;

use common::{create_session, login, register, register_and_verify, try_app, unique_email};
use linkstash::auth::sessions::create_token;

#[tokio::test]
async fn test_register_verify_creates_user() {
    let Some(app) = try_app().await else { return };
    let email = unique_email();

    register_and_verify(&app, &email, "password123").await;

    // Login proves the user exists with the registered credentials
    let token = login(&app, &email, "password123").await;
    let response = app.server.get("/me").authorization_bearer(&token).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["email"], email.as_str());
    assert!(body["id"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_register_rejects_weak_password() {
    let Some(app) = try_app().await else { return };

    let response = app
        .server
        .post("/auth/register")
        .json(&serde_json::json!({ "email": unique_email(), "password": "short" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "weak_password");
}

#[tokio::test]
async fn test_register_rejects_bad_email() {
    let Some(app) = try_app().await else { return };

    let response = app
        .server
        .post("/auth/register")
        .json(&serde_json::json!({ "email": "not-an-email", "password": "password123" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_registration_blocked_after_verify() {
    let Some(app) = try_app().await else { return };
    let email = unique_email();

    register_and_verify(&app, &email, "password123").await;

    let response = app
        .server
        .post("/auth/register")
        .json(&serde_json::json!({ "email": email, "password": "password456" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "email_already_registered");
}

#[tokio::test]
async fn test_verification_token_is_single_use() {
    let Some(app) = try_app().await else { return };
    let email = unique_email();

    let token = register(&app, &email, "password123").await;

    let first = app
        .server
        .get("/auth/verify_email")
        .add_query_param("token", &token)
        .await;
    assert_eq!(first.status_code(), StatusCode::OK);

    let second = app
        .server
        .get("/auth/verify_email")
        .add_query_param("token", &token)
        .await;
    assert_eq!(second.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = second.json();
    assert_eq!(body["code"], "token_expired_or_invalid");
}

#[tokio::test]
async fn test_reregistration_supersedes_pending_token() {
    let Some(app) = try_app().await else { return };
    let email = unique_email();

    let first_token = register(&app, &email, "password123").await;
    let second_token = register(&app, &email, "password123").await;
    assert_ne!(first_token, second_token);

    // The superseded token is dead
    let response = app
        .server
        .get("/auth/verify_email")
        .add_query_param("token", &first_token)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    // The fresh token still works
    let response = app
        .server
        .get("/auth/verify_email")
        .add_query_param("token", &second_token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_garbage_verification_token_rejected() {
    let Some(app) = try_app().await else { return };

    let response = app
        .server
        .get("/auth/verify_email")
        .add_query_param("token", "no-such-token")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_failures_are_uniform() {
    let Some(app) = try_app().await else { return };
    let email = unique_email();

    register_and_verify(&app, &email, "password123").await;

    // Wrong password for a real account
    let wrong_password = app
        .server
        .post("/auth/login")
        .json(&serde_json::json!({ "email": email, "password": "wrongpassword" }))
        .await;

    // Account that does not exist at all
    let unknown_email = app
        .server
        .post("/auth/login")
        .json(&serde_json::json!({ "email": unique_email(), "password": "password123" }))
        .await;

    assert_eq!(wrong_password.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status_code(), StatusCode::UNAUTHORIZED);

    // Identical bodies: responses must not reveal which half failed
    let body_a: serde_json::Value = wrong_password.json();
    let body_b: serde_json::Value = unknown_email.json();
    assert_eq!(body_a, body_b);
}

#[tokio::test]
async fn test_me_requires_token() {
    let Some(app) = try_app().await else { return };

    let response = app.server.get("/me").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = app
        .server
        .get("/me")
        .authorization_bearer("invalid.token.here")
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_session_rejected() {
    let Some(app) = try_app().await else { return };
    let email = unique_email();
    create_session(&app, &email, "password123").await;

    // Find the user id via a live session, then forge an expired token
    let live = login(&app, &email, "password123").await;
    let me: serde_json::Value = app
        .server
        .get("/me")
        .authorization_bearer(&live)
        .await
        .json();
    let user_id = me["id"].as_i64().unwrap();

    let expired = create_token(user_id, common::TEST_JWT_SECRET, Duration::minutes(-5)).unwrap();
    let response = app.server.get("/me").authorization_bearer(&expired).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_for_vanished_user_rejected() {
    let Some(app) = try_app().await else { return };

    // Subject id that cannot exist
    let token = create_token(i64::MAX, common::TEST_JWT_SECRET, Duration::minutes(30)).unwrap();
    let response = app.server.get("/me").authorization_bearer(&token).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}
