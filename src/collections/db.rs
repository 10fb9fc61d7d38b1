/**
 * Collection Database Operations
 *
 * Parameterized queries over `collections` and the `collection_links`
 * membership table (many-to-many with `links`). Collection names are
 * unique per user; membership rows cascade away when either side is
 * deleted.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::links::db::Link;

/// Collection struct representing a named group of links
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Collection {
    /// Unique collection ID
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Collection name (unique per user)
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

const COLLECTION_COLUMNS: &str = "id, user_id, name, description, created_at, updated_at";

/// List all collections owned by a user
pub async fn list_collections(pool: &PgPool, user_id: i64) -> Result<Vec<Collection>, sqlx::Error> {
    sqlx::query_as::<_, Collection>(&format!(
        "SELECT {COLLECTION_COLUMNS} FROM collections WHERE user_id = $1 ORDER BY id"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Get a user's collection by name
pub async fn find_collection_by_name(
    pool: &PgPool,
    user_id: i64,
    name: &str,
) -> Result<Option<Collection>, sqlx::Error> {
    sqlx::query_as::<_, Collection>(&format!(
        "SELECT {COLLECTION_COLUMNS} FROM collections WHERE user_id = $1 AND name = $2"
    ))
    .bind(user_id)
    .bind(name)
    .fetch_optional(pool)
    .await
}

/// Create a collection
///
/// Fails with a unique violation if the user already has a collection
/// with this name; callers translate that into a conflict error.
pub async fn create_collection(
    pool: &PgPool,
    user_id: i64,
    name: &str,
    description: Option<&str>,
) -> Result<Collection, sqlx::Error> {
    sqlx::query_as::<_, Collection>(&format!(
        r#"
        INSERT INTO collections (user_id, name, description)
        VALUES ($1, $2, $3)
        RETURNING {COLLECTION_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(name)
    .bind(description)
    .fetch_one(pool)
    .await
}

/// Update a user's collection by name, leaving unset fields unchanged
pub async fn update_collection(
    pool: &PgPool,
    user_id: i64,
    name: &str,
    new_name: Option<&str>,
    new_description: Option<&str>,
) -> Result<Option<Collection>, sqlx::Error> {
    sqlx::query_as::<_, Collection>(&format!(
        r#"
        UPDATE collections
        SET name = COALESCE($1, name),
            description = COALESCE($2, description),
            updated_at = now()
        WHERE user_id = $3 AND name = $4
        RETURNING {COLLECTION_COLUMNS}
        "#
    ))
    .bind(new_name)
    .bind(new_description)
    .bind(user_id)
    .bind(name)
    .fetch_optional(pool)
    .await
}

/// Delete a user's collection by name
///
/// Returns the number of rows deleted. Membership rows cascade; the
/// links themselves survive.
pub async fn delete_collection(pool: &PgPool, user_id: i64, name: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM collections WHERE user_id = $1 AND name = $2")
        .bind(user_id)
        .bind(name)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// List the links that are members of a collection
pub async fn links_in_collection(
    pool: &PgPool,
    collection_id: i64,
) -> Result<Vec<Link>, sqlx::Error> {
    sqlx::query_as::<_, Link>(
        r#"
        SELECT l.id, l.user_id, l.title, l.url, l.description, l.image, l.kind,
               l.created_at, l.updated_at
        FROM links l
        JOIN collection_links cl ON cl.link_id = l.id
        WHERE cl.collection_id = $1
        ORDER BY l.id
        "#,
    )
    .bind(collection_id)
    .fetch_all(pool)
    .await
}

/// Add a link to a collection
///
/// Returns false if the link was already a member.
pub async fn add_link_to_collection(
    pool: &PgPool,
    collection_id: i64,
    link_id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO collection_links (collection_id, link_id)
        VALUES ($1, $2)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(collection_id)
    .bind(link_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Remove a link from a collection
///
/// Returns false if the link was not a member.
pub async fn remove_link_from_collection(
    pool: &PgPool,
    collection_id: i64,
    link_id: i64,
) -> Result<bool, sqlx::Error> {
    let result =
        sqlx::query("DELETE FROM collection_links WHERE collection_id = $1 AND link_id = $2")
            .bind(collection_id)
            .bind(link_id)
            .execute(pool)
            .await?;

    Ok(result.rows_affected() > 0)
}
