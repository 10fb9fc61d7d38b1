/**
 * Link Database Operations
 *
 * Straightforward parameterized queries over the `links` table. Every
 * query is scoped to the owning user; URLs are unique per user.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Link struct representing a saved link in the database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Link {
    /// Unique link ID
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Page title
    pub title: String,
    /// The saved URL (unique per user)
    pub url: String,
    /// Optional description
    pub description: Option<String>,
    /// Optional preview image URL
    pub image: Option<String>,
    /// Link kind: website, book, article, music, or video
    pub kind: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a link
#[derive(Debug, Clone)]
pub struct NewLink<'a> {
    pub title: &'a str,
    pub url: &'a str,
    pub description: Option<&'a str>,
    pub image: Option<&'a str>,
    pub kind: &'a str,
}

/// Optional fields for updating a link; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct LinkChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub kind: Option<String>,
}

const LINK_COLUMNS: &str = "id, user_id, title, url, description, image, kind, created_at, updated_at";

/// List all links owned by a user
pub async fn list_links(pool: &PgPool, user_id: i64) -> Result<Vec<Link>, sqlx::Error> {
    sqlx::query_as::<_, Link>(&format!(
        "SELECT {LINK_COLUMNS} FROM links WHERE user_id = $1 ORDER BY id"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Get a user's link by URL
pub async fn find_link_by_url(
    pool: &PgPool,
    user_id: i64,
    url: &str,
) -> Result<Option<Link>, sqlx::Error> {
    sqlx::query_as::<_, Link>(&format!(
        "SELECT {LINK_COLUMNS} FROM links WHERE user_id = $1 AND url = $2"
    ))
    .bind(user_id)
    .bind(url)
    .fetch_optional(pool)
    .await
}

/// Create a link
///
/// Fails with a unique violation if the user already saved this URL;
/// callers translate that into a conflict error.
pub async fn create_link(pool: &PgPool, user_id: i64, new: NewLink<'_>) -> Result<Link, sqlx::Error> {
    sqlx::query_as::<_, Link>(&format!(
        r#"
        INSERT INTO links (user_id, title, url, description, image, kind)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {LINK_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(new.title)
    .bind(new.url)
    .bind(new.description)
    .bind(new.image)
    .bind(new.kind)
    .fetch_one(pool)
    .await
}

/// Update a user's link by URL, leaving unset fields unchanged
pub async fn update_link(
    pool: &PgPool,
    user_id: i64,
    url: &str,
    changes: LinkChanges,
) -> Result<Option<Link>, sqlx::Error> {
    sqlx::query_as::<_, Link>(&format!(
        r#"
        UPDATE links
        SET title = COALESCE($1, title),
            description = COALESCE($2, description),
            image = COALESCE($3, image),
            kind = COALESCE($4, kind),
            updated_at = now()
        WHERE user_id = $5 AND url = $6
        RETURNING {LINK_COLUMNS}
        "#
    ))
    .bind(changes.title)
    .bind(changes.description)
    .bind(changes.image)
    .bind(changes.kind)
    .bind(user_id)
    .bind(url)
    .fetch_optional(pool)
    .await
}

/// Delete a user's link by URL
///
/// Returns the number of rows deleted (zero if the link did not exist).
/// Membership rows in collections cascade away with it.
pub async fn delete_link(pool: &PgPool, user_id: i64, url: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM links WHERE user_id = $1 AND url = $2")
        .bind(user_id)
        .bind(url)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
