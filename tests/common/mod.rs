//! Shared test fixtures
//!
//! Builds a `TestServer` around the real router with a throwaway
//! config. All DB-backed tests go through `try_app`, which skips
//! cleanly when `DATABASE_URL` is not set so the suite can run without
//! a PostgreSQL instance.

#![allow(dead_code)]

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::Duration;
use sqlx::PgPool;

use linkstash::auth::tokens::generate_token;
use linkstash::routes::create_router;
use linkstash::server::config::AppConfig;
use linkstash::server::init::build_state;

/// Secret used to sign session tokens in tests
pub const TEST_JWT_SECRET: &str = "test-secret";

/// Test application: server plus direct pool access
pub struct TestApp {
    pub server: TestServer,
    pub pool: PgPool,
}

/// Build a test app against the configured database
///
/// Returns `None` (after logging) when `DATABASE_URL` is unset, so
/// callers can skip rather than fail on machines without PostgreSQL.
pub async fn try_app() -> Option<TestApp> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("skipping: DATABASE_URL not set");
        return None;
    };

    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let config = test_config(database_url);
    let state = build_state(pool.clone(), config);
    let server = TestServer::new(create_router(state)).expect("Failed to start test server");

    Some(TestApp { server, pool })
}

/// Config with known values and no SMTP
pub fn test_config(database_url: String) -> AppConfig {
    AppConfig {
        database_url,
        jwt_secret: TEST_JWT_SECRET.to_string(),
        base_url: "http://localhost:3000".to_string(),
        server_port: 0,
        verification_ttl: Duration::minutes(30),
        reset_ttl: Duration::minutes(30),
        session_ttl: Duration::minutes(30),
        smtp: None,
    }
}

/// A fresh email address per call, so tests never collide on the
/// unique constraints
pub fn unique_email() -> String {
    format!("user-{}@example.com", &generate_token()[..12])
}

/// Register an email and return the verification token from the response
pub async fn register(app: &TestApp, email: &str, password: &str) -> String {
    let response = app
        .server
        .post("/auth/register")
        .json(&serde_json::json!({ "email": email, "password": password }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: serde_json::Value = response.json();
    body["token"]
        .as_str()
        .expect("register returns token")
        .to_string()
}

/// Register and verify, leaving a real user behind
pub async fn register_and_verify(app: &TestApp, email: &str, password: &str) {
    let token = register(app, email, password).await;

    let response = app
        .server
        .get("/auth/verify_email")
        .add_query_param("token", &token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

/// Log in and return the bearer token
pub async fn login(app: &TestApp, email: &str, password: &str) -> String {
    let response = app
        .server
        .post("/auth/login")
        .json(&serde_json::json!({ "email": email, "password": password }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: serde_json::Value = response.json();
    body["access_token"]
        .as_str()
        .expect("login returns access_token")
        .to_string()
}

/// Full pipeline: register, verify, log in
pub async fn create_session(app: &TestApp, email: &str, password: &str) -> String {
    register_and_verify(app, email, password).await;
    login(app, email, password).await
}
