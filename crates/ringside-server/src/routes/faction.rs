//! Faction Routes
//!
//! HTTP handlers that delegate to the faction repository.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use super::{affiliation, ApiResult};
use crate::models::{
    AffiliationResponse, AffiliationSearchParams, CountedAffiliationResponse,
    CreateAffiliationRequest, EntityRefResponse, UpdateAffiliationRequest, UploadParams,
    UploadResponse,
};
use crate::AppState;

/// List all factions
#[utoipa::path(
    get,
    path = "/api/factions",
    responses(
        (status = 200, description = "Factions, newest first", body = Vec<AffiliationResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Faction"
)]
pub async fn list_factions(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<AffiliationResponse>>> {
    affiliation::list(&state.roster.factions).await
}

/// List factions with their wrestler counts
#[utoipa::path(
    get,
    path = "/api/factions/counts",
    params(AffiliationSearchParams),
    responses(
        (status = 200, description = "Factions with wrestler counts", body = Vec<CountedAffiliationResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Faction"
)]
pub async fn list_faction_counts(
    State(state): State<AppState>,
    Query(params): Query<AffiliationSearchParams>,
) -> ApiResult<Json<Vec<CountedAffiliationResponse>>> {
    affiliation::counts(&state.roster.factions, params).await
}

/// Faction `{id, name}` pairs for pickers
#[utoipa::path(
    get,
    path = "/api/factions/options",
    responses(
        (status = 200, description = "Faction references", body = Vec<EntityRefResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Faction"
)]
pub async fn list_faction_options(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<EntityRefResponse>>> {
    affiliation::options(&state.roster.factions).await
}

/// Create new faction
#[utoipa::path(
    post,
    path = "/api/factions",
    request_body = CreateAffiliationRequest,
    responses(
        (status = 201, description = "Faction created", body = AffiliationResponse),
        (status = 400, description = "Empty name"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Faction"
)]
pub async fn create_faction(
    State(state): State<AppState>,
    Json(payload): Json<CreateAffiliationRequest>,
) -> ApiResult<(StatusCode, Json<AffiliationResponse>)> {
    affiliation::create(&state.roster.factions, payload).await
}

/// Get faction by ID
#[utoipa::path(
    get,
    path = "/api/factions/{id}",
    params(("id" = Uuid, Path, description = "Faction ID")),
    responses(
        (status = 200, description = "Faction found", body = AffiliationResponse),
        (status = 404, description = "Faction not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Faction"
)]
pub async fn get_faction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<AffiliationResponse>> {
    affiliation::get(&state.roster.factions, id).await
}

/// Update faction
#[utoipa::path(
    put,
    path = "/api/factions/{id}",
    params(("id" = Uuid, Path, description = "Faction ID")),
    request_body = UpdateAffiliationRequest,
    responses(
        (status = 200, description = "Faction updated", body = AffiliationResponse),
        (status = 400, description = "Empty name"),
        (status = 404, description = "Faction not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Faction"
)]
pub async fn update_faction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAffiliationRequest>,
) -> ApiResult<Json<AffiliationResponse>> {
    affiliation::update(&state.roster.factions, id, payload).await
}

/// Delete faction and unlink it from every wrestler
#[utoipa::path(
    delete,
    path = "/api/factions/{id}",
    params(("id" = Uuid, Path, description = "Faction ID")),
    responses(
        (status = 204, description = "Faction deleted"),
        (status = 404, description = "Faction not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Faction"
)]
pub async fn delete_faction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    affiliation::delete(&state.roster.factions, id).await
}

/// Upload a faction image
#[utoipa::path(
    post,
    path = "/api/factions/images",
    params(UploadParams),
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "Image stored", body = UploadResponse),
        (status = 400, description = "Empty body"),
        (status = 500, description = "Upload failed")
    ),
    tag = "Faction"
)]
pub async fn upload_faction_image(
    State(state): State<AppState>,
    Query(params): Query<UploadParams>,
    body: Bytes,
) -> ApiResult<Json<UploadResponse>> {
    affiliation::upload(&state.roster.factions, params, body).await
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/factions", get(list_factions).post(create_faction))
        .route("/api/factions/counts", get(list_faction_counts))
        .route("/api/factions/options", get(list_faction_options))
        .route("/api/factions/images", post(upload_faction_image))
        .route(
            "/api/factions/:id",
            get(get_faction)
                .put(update_faction)
                .delete(delete_faction),
        )
}
