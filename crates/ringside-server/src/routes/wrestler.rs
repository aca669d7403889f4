//! Wrestler Routes
//!
//! CRUD over wrestlers. Create and update take the complete promotion and
//! faction id sets; links are replaced, never merged.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use super::{domain_error, store_image, ApiResult};
use crate::models::{
    CreateWrestlerRequest, UpdateWrestlerRequest, UploadParams, UploadResponse, WrestlerResponse,
    WrestlerSearchParams,
};
use crate::AppState;

/// List wrestlers with promotions and factions
#[utoipa::path(
    get,
    path = "/api/wrestlers",
    params(WrestlerSearchParams),
    responses(
        (status = 200, description = "Matching wrestlers, newest first", body = Vec<WrestlerResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Wrestler"
)]
pub async fn list_wrestlers(
    State(state): State<AppState>,
    Query(params): Query<WrestlerSearchParams>,
) -> ApiResult<Json<Vec<WrestlerResponse>>> {
    let wrestlers = state
        .roster
        .search_wrestlers(&params.into())
        .await
        .map_err(domain_error)?;

    Ok(Json(wrestlers.into_iter().map(Into::into).collect()))
}

/// Create new wrestler with its links
#[utoipa::path(
    post,
    path = "/api/wrestlers",
    request_body = CreateWrestlerRequest,
    responses(
        (status = 201, description = "Wrestler created", body = WrestlerResponse),
        (status = 400, description = "Empty name"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Wrestler"
)]
pub async fn create_wrestler(
    State(state): State<AppState>,
    Json(payload): Json<CreateWrestlerRequest>,
) -> ApiResult<(StatusCode, Json<WrestlerResponse>)> {
    let wrestler = state
        .roster
        .wrestlers
        .create(payload.into())
        .await
        .map_err(domain_error)?;

    Ok((StatusCode::CREATED, Json(wrestler.into())))
}

/// Get wrestler by ID
#[utoipa::path(
    get,
    path = "/api/wrestlers/{id}",
    params(("id" = Uuid, Path, description = "Wrestler ID")),
    responses(
        (status = 200, description = "Wrestler found", body = WrestlerResponse),
        (status = 404, description = "Wrestler not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Wrestler"
)]
pub async fn get_wrestler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<WrestlerResponse>> {
    let wrestler = state
        .roster
        .wrestlers
        .get_with_associations(id)
        .await
        .map_err(domain_error)?
        .ok_or((StatusCode::NOT_FOUND, "Wrestler not found".to_string()))?;

    Ok(Json(wrestler.into()))
}

/// Update wrestler and replace its links
#[utoipa::path(
    put,
    path = "/api/wrestlers/{id}",
    params(("id" = Uuid, Path, description = "Wrestler ID")),
    request_body = UpdateWrestlerRequest,
    responses(
        (status = 200, description = "Wrestler updated", body = WrestlerResponse),
        (status = 400, description = "Empty name"),
        (status = 404, description = "Wrestler not found"),
        (status = 500, description = "Internal server error; links may be partially applied")
    ),
    tag = "Wrestler"
)]
pub async fn update_wrestler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateWrestlerRequest>,
) -> ApiResult<Json<WrestlerResponse>> {
    let wrestler = state
        .roster
        .wrestlers
        .update(id, payload.into())
        .await
        .map_err(domain_error)?;

    Ok(Json(wrestler.into()))
}

/// Delete wrestler
#[utoipa::path(
    delete,
    path = "/api/wrestlers/{id}",
    params(("id" = Uuid, Path, description = "Wrestler ID")),
    responses(
        (status = 204, description = "Wrestler deleted"),
        (status = 404, description = "Wrestler not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Wrestler"
)]
pub async fn delete_wrestler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let deleted = state
        .roster
        .wrestlers
        .delete(id)
        .await
        .map_err(domain_error)?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, "Wrestler not found".to_string()))
    }
}

/// Upload a wrestler image
#[utoipa::path(
    post,
    path = "/api/wrestlers/images",
    params(UploadParams),
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "Image stored", body = UploadResponse),
        (status = 400, description = "Empty body"),
        (status = 500, description = "Upload failed")
    ),
    tag = "Wrestler"
)]
pub async fn upload_wrestler_image(
    State(state): State<AppState>,
    Query(params): Query<UploadParams>,
    body: Bytes,
) -> ApiResult<Json<UploadResponse>> {
    let wrestlers = &state.roster.wrestlers;
    store_image(params, body, |name, bytes| async move {
        wrestlers.upload_image(&name, bytes).await
    })
    .await
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/wrestlers", get(list_wrestlers).post(create_wrestler))
        .route("/api/wrestlers/images", post(upload_wrestler_image))
        .route(
            "/api/wrestlers/:id",
            get(get_wrestler).put(update_wrestler).delete(delete_wrestler),
        )
}
