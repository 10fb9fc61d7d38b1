//! Link and collection CRUD integration tests
//!
//! Exercises link CRUD, collection CRUD, membership add/remove, and
//! per-user isolation. Skips when `DATABASE_URL` is unset.

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use common::{create_session, try_app, unique_email, TestApp};

async fn save_link(app: &TestApp, token: &str, url: &str, title: &str) -> serde_json::Value {
    let response = app
        .server
        .post("/api/links")
        .authorization_bearer(token)
        .json(&serde_json::json!({ "title": title, "url": url }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    response.json()
}

#[tokio::test]
async fn test_link_crud() {
    let Some(app) = try_app().await else { return };
    let token = create_session(&app, &unique_email(), "password123").await;

    let url = format!("https://example.com/{}", unique_email());
    let link = save_link(&app, &token, &url, "Example").await;
    assert_eq!(link["title"], "Example");
    assert_eq!(link["kind"], "website");

    // Listed
    let list: serde_json::Value = app
        .server
        .get("/api/links")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(list.as_array().unwrap().len(), 1);

    // Fetch by URL
    let found: serde_json::Value = app
        .server
        .get("/api/links/find")
        .authorization_bearer(&token)
        .add_query_param("url", &url)
        .await
        .json();
    assert_eq!(found["id"], link["id"]);

    // Update metadata
    let updated: serde_json::Value = app
        .server
        .patch("/api/links")
        .authorization_bearer(&token)
        .add_query_param("url", &url)
        .json(&serde_json::json!({ "title": "Renamed", "kind": "article" }))
        .await
        .json();
    assert_eq!(updated["title"], "Renamed");
    assert_eq!(updated["kind"], "article");
    assert_eq!(updated["url"], url.as_str());

    // Delete
    let response = app
        .server
        .delete("/api/links")
        .authorization_bearer(&token)
        .add_query_param("url", &url)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = app
        .server
        .get("/api/links/find")
        .authorization_bearer(&token)
        .add_query_param("url", &url)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_link_url_rejected() {
    let Some(app) = try_app().await else { return };
    let token = create_session(&app, &unique_email(), "password123").await;

    let url = format!("https://example.com/{}", unique_email());
    save_link(&app, &token, &url, "First").await;

    let response = app
        .server
        .post("/api/links")
        .authorization_bearer(&token)
        .json(&serde_json::json!({ "title": "Second", "url": url }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_same_url_allowed_for_different_users() {
    let Some(app) = try_app().await else { return };
    let token_a = create_session(&app, &unique_email(), "password123").await;
    let token_b = create_session(&app, &unique_email(), "password123").await;

    let url = format!("https://example.com/{}", unique_email());
    save_link(&app, &token_a, &url, "Mine").await;
    save_link(&app, &token_b, &url, "Also mine").await;
}

#[tokio::test]
async fn test_invalid_link_kind_rejected() {
    let Some(app) = try_app().await else { return };
    let token = create_session(&app, &unique_email(), "password123").await;

    let response = app
        .server
        .post("/api/links")
        .authorization_bearer(&token)
        .json(&serde_json::json!({
            "title": "Pod",
            "url": "https://example.com/pod",
            "kind": "podcast"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_collection_crud_and_membership() {
    let Some(app) = try_app().await else { return };
    let token = create_session(&app, &unique_email(), "password123").await;

    // Create a collection
    let response = app
        .server
        .post("/api/collections")
        .authorization_bearer(&token)
        .json(&serde_json::json!({ "name": "reading", "description": "to read" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let collection: serde_json::Value = response.json();
    assert_eq!(collection["name"], "reading");
    assert_eq!(collection["links"].as_array().unwrap().len(), 0);

    // Duplicate name for the same user is a conflict
    let response = app
        .server
        .post("/api/collections")
        .authorization_bearer(&token)
        .json(&serde_json::json!({ "name": "reading" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);

    // Save a link and add it to the collection
    let url = format!("https://example.com/{}", unique_email());
    save_link(&app, &token, &url, "Example").await;

    let membership = serde_json::json!({ "name": "reading", "url": url });
    let response = app
        .server
        .post("/api/collections/links")
        .authorization_bearer(&token)
        .json(&membership)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["links"].as_array().unwrap().len(), 1);
    assert_eq!(body["links"][0]["url"], url.as_str());

    // Adding twice is a conflict
    let response = app
        .server
        .post("/api/collections/links")
        .authorization_bearer(&token)
        .json(&membership)
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);

    // Remove the link from the collection; the link itself survives
    let response = app
        .server
        .delete("/api/collections/links")
        .authorization_bearer(&token)
        .json(&membership)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["links"].as_array().unwrap().len(), 0);

    let response = app
        .server
        .get("/api/links/find")
        .authorization_bearer(&token)
        .add_query_param("url", &url)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    // Removing again: not a member
    let response = app
        .server
        .delete("/api/collections/links")
        .authorization_bearer(&token)
        .json(&membership)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    // Rename the collection
    let response = app
        .server
        .patch("/api/collections")
        .authorization_bearer(&token)
        .add_query_param("name", "reading")
        .json(&serde_json::json!({ "name": "archive" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["name"], "archive");

    // Delete it
    let response = app
        .server
        .delete("/api/collections")
        .authorization_bearer(&token)
        .add_query_param("name", "archive")
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_users_cannot_see_each_others_links() {
    let Some(app) = try_app().await else { return };
    let token_a = create_session(&app, &unique_email(), "password123").await;
    let token_b = create_session(&app, &unique_email(), "password123").await;

    let url = format!("https://example.com/{}", unique_email());
    save_link(&app, &token_a, &url, "Private").await;

    let response = app
        .server
        .get("/api/links/find")
        .authorization_bearer(&token_b)
        .add_query_param("url", &url)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let list: serde_json::Value = app
        .server
        .get("/api/links")
        .authorization_bearer(&token_b)
        .await
        .json();
    assert_eq!(list.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_links_require_auth() {
    let Some(app) = try_app().await else { return };

    let response = app.server.get("/api/links").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = app.server.get("/api/collections").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}
