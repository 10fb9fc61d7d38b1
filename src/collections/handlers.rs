/**
 * Collection Handlers
 *
 * HTTP handlers for collection CRUD and membership management. All
 * routes sit behind the auth middleware and operate only on the acting
 * user's collections and links.
 *
 * Collection reads always include the member links, so clients never
 * need a second round trip to render a collection.
 */

use axum::extract::{Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::collections::db::{
    add_link_to_collection, create_collection, delete_collection, find_collection_by_name,
    links_in_collection, list_collections, remove_link_from_collection, update_collection,
    Collection,
};
use crate::error::{is_unique_violation, ApiError};
use crate::links::db::{find_link_by_url, Link};
use crate::middleware::auth::AuthUser;
use crate::server::state::AppState;

/// Collection payload with its member links
#[derive(Serialize, Deserialize, Debug)]
pub struct CollectionResponse {
    #[serde(flatten)]
    pub collection: Collection,
    pub links: Vec<Link>,
}

/// Create-collection request body
#[derive(Deserialize, Serialize, Debug)]
pub struct CreateCollectionRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Update-collection request body; absent fields are left unchanged
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct UpdateCollectionRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Query parameter selecting a collection by name
#[derive(Deserialize, Debug)]
pub struct CollectionNameParams {
    pub name: String,
}

/// Membership request: which link, which collection
#[derive(Deserialize, Serialize, Debug)]
pub struct MembershipRequest {
    /// Collection name
    pub name: String,
    /// Link URL
    pub url: String,
}

/// Delete-collection response
#[derive(Serialize, Deserialize, Debug)]
pub struct DeleteCollectionResponse {
    pub message: String,
    pub deleted: u64,
}

/// Attach member links to a collection row
async fn with_links(state: &AppState, collection: Collection) -> Result<CollectionResponse, ApiError> {
    let links = links_in_collection(&state.db, collection.id).await?;
    Ok(CollectionResponse { collection, links })
}

/// GET /api/collections - list the acting user's collections
pub async fn get_collections(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<CollectionResponse>>, ApiError> {
    let collections = list_collections(&state.db, user.user_id).await?;

    let mut out = Vec::with_capacity(collections.len());
    for collection in collections {
        out.push(with_links(&state, collection).await?);
    }
    Ok(Json(out))
}

/// GET /api/collections/find?name= - get one collection with its links
pub async fn get_collection(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(params): Query<CollectionNameParams>,
) -> Result<Json<CollectionResponse>, ApiError> {
    let collection = find_collection_by_name(&state.db, user.user_id, &params.name)
        .await?
        .ok_or_else(|| ApiError::NotFound("Collection not found".to_string()))?;

    Ok(Json(with_links(&state, collection).await?))
}

/// POST /api/collections - create a collection
pub async fn add_collection(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<CreateCollectionRequest>,
) -> Result<Json<CollectionResponse>, ApiError> {
    if request.name.is_empty() {
        return Err(ApiError::Validation(
            "Collection name must not be empty".to_string(),
        ));
    }

    let collection = create_collection(
        &state.db,
        user.user_id,
        &request.name,
        request.description.as_deref(),
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::Conflict("Collection with this name already exists".to_string())
        } else {
            ApiError::Database(e)
        }
    })?;

    tracing::info!("Collection {} created for user {}", collection.id, user.user_id);

    Ok(Json(CollectionResponse {
        collection,
        links: Vec::new(),
    }))
}

/// PATCH /api/collections?name= - rename or re-describe a collection
pub async fn patch_collection(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(params): Query<CollectionNameParams>,
    Json(request): Json<UpdateCollectionRequest>,
) -> Result<Json<CollectionResponse>, ApiError> {
    if matches!(request.name.as_deref(), Some("")) {
        return Err(ApiError::Validation(
            "Collection name must not be empty".to_string(),
        ));
    }

    let collection = update_collection(
        &state.db,
        user.user_id,
        &params.name,
        request.name.as_deref(),
        request.description.as_deref(),
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::Conflict("Collection with this name already exists".to_string())
        } else {
            ApiError::Database(e)
        }
    })?
    .ok_or_else(|| ApiError::NotFound("Collection not found".to_string()))?;

    Ok(Json(with_links(&state, collection).await?))
}

/// DELETE /api/collections?name= - delete a collection (links survive)
pub async fn remove_collection(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(params): Query<CollectionNameParams>,
) -> Result<Json<DeleteCollectionResponse>, ApiError> {
    let deleted = delete_collection(&state.db, user.user_id, &params.name).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Collection not found".to_string()));
    }

    Ok(Json(DeleteCollectionResponse {
        message: "Collection deleted".to_string(),
        deleted,
    }))
}

/// Resolve a membership request to the user's collection and link
async fn resolve_membership(
    state: &AppState,
    user_id: i64,
    request: &MembershipRequest,
) -> Result<(Collection, Link), ApiError> {
    let link = find_link_by_url(&state.db, user_id, &request.url)
        .await?
        .ok_or_else(|| ApiError::NotFound("Link not found".to_string()))?;

    let collection = find_collection_by_name(&state.db, user_id, &request.name)
        .await?
        .ok_or_else(|| ApiError::NotFound("Collection not found".to_string()))?;

    Ok((collection, link))
}

/// POST /api/collections/links - add a link to a collection
pub async fn add_member(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<MembershipRequest>,
) -> Result<Json<CollectionResponse>, ApiError> {
    let (collection, link) = resolve_membership(&state, user.user_id, &request).await?;

    let inserted = add_link_to_collection(&state.db, collection.id, link.id).await?;
    if !inserted {
        return Err(ApiError::Conflict(
            "Link is already in this collection".to_string(),
        ));
    }

    Ok(Json(with_links(&state, collection).await?))
}

/// DELETE /api/collections/links - remove a link from a collection
pub async fn remove_member(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<MembershipRequest>,
) -> Result<Json<CollectionResponse>, ApiError> {
    let (collection, link) = resolve_membership(&state, user.user_id, &request).await?;

    let removed = remove_link_from_collection(&state.db, collection.id, link.id).await?;
    if !removed {
        return Err(ApiError::NotFound(
            "Link is not in this collection".to_string(),
        ));
    }

    Ok(Json(with_links(&state, collection).await?))
}
