/**
 * Link Handlers
 *
 * HTTP handlers for link CRUD. All routes sit behind the auth
 * middleware; every operation is scoped to the acting user.
 *
 * Link metadata (title, description, image, kind) arrives in the
 * request body; this server does not fetch or scrape the target page.
 */

use axum::extract::{Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::error::{is_unique_violation, ApiError};
use crate::links::db::{
    create_link, delete_link, find_link_by_url, list_links, update_link, Link, LinkChanges,
    NewLink,
};
use crate::links::{validate_kind, DEFAULT_LINK_KIND};
use crate::middleware::auth::AuthUser;
use crate::server::state::AppState;

/// Create-link request body
#[derive(Deserialize, Serialize, Debug)]
pub struct CreateLinkRequest {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    /// Defaults to "website"
    #[serde(default)]
    pub kind: Option<String>,
}

/// Update-link request body; absent fields are left unchanged
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct UpdateLinkRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
}

/// Query parameter selecting a link by URL
#[derive(Deserialize, Debug)]
pub struct LinkUrlParams {
    pub url: String,
}

/// Delete-link response
#[derive(Serialize, Deserialize, Debug)]
pub struct DeleteLinkResponse {
    pub message: String,
    pub deleted: u64,
}

/// GET /api/links - list the acting user's links
pub async fn get_links(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<Link>>, ApiError> {
    let links = list_links(&state.db, user.user_id).await?;
    Ok(Json(links))
}

/// GET /api/links/find?url= - get one link by URL
pub async fn get_link(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(params): Query<LinkUrlParams>,
) -> Result<Json<Link>, ApiError> {
    let link = find_link_by_url(&state.db, user.user_id, &params.url)
        .await?
        .ok_or_else(|| ApiError::NotFound("Link not found".to_string()))?;
    Ok(Json(link))
}

/// POST /api/links - save a new link
pub async fn add_link(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<CreateLinkRequest>,
) -> Result<Json<Link>, ApiError> {
    if request.url.is_empty() {
        return Err(ApiError::Validation("URL must not be empty".to_string()));
    }
    if request.title.is_empty() {
        return Err(ApiError::Validation("Title must not be empty".to_string()));
    }

    let kind = request.kind.as_deref().unwrap_or(DEFAULT_LINK_KIND);
    validate_kind(kind)?;

    let link = create_link(
        &state.db,
        user.user_id,
        NewLink {
            title: &request.title,
            url: &request.url,
            description: request.description.as_deref(),
            image: request.image.as_deref(),
            kind,
        },
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::Conflict("Link already exists".to_string())
        } else {
            ApiError::Database(e)
        }
    })?;

    tracing::info!("Link {} created for user {}", link.id, user.user_id);
    Ok(Json(link))
}

/// PATCH /api/links?url= - update a link's metadata
pub async fn patch_link(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(params): Query<LinkUrlParams>,
    Json(request): Json<UpdateLinkRequest>,
) -> Result<Json<Link>, ApiError> {
    if let Some(kind) = request.kind.as_deref() {
        validate_kind(kind)?;
    }

    let changes = LinkChanges {
        title: request.title,
        description: request.description,
        image: request.image,
        kind: request.kind,
    };

    let link = update_link(&state.db, user.user_id, &params.url, changes)
        .await?
        .ok_or_else(|| ApiError::NotFound("Link not found".to_string()))?;

    Ok(Json(link))
}

/// DELETE /api/links?url= - delete a link
pub async fn remove_link(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(params): Query<LinkUrlParams>,
) -> Result<Json<DeleteLinkResponse>, ApiError> {
    let deleted = delete_link(&state.db, user.user_id, &params.url).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Link not found".to_string()));
    }

    Ok(Json(DeleteLinkResponse {
        message: "Link deleted".to_string(),
        deleted,
    }))
}
