//! Promotion Routes
//!
//! HTTP handlers that delegate to the promotion repository.

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

/// List all promotions
#[utoipa::path(
    get,
    path = "/api/promotions",
    responses(
        (status = 200, description = "Promotions, newest first", body = Vec<AffiliationResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Promotion"
)]
pub async fn list_promotions(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<AffiliationResponse>>> {
    affiliation::list(&state.roster.promotions).await
}

/// List promotions with their wrestler counts
#[utoipa::path(
    get,
    path = "/api/promotions/counts",
    params(AffiliationSearchParams),
    responses(
        (status = 200, description = "Promotions with wrestler counts", body = Vec<CountedAffiliationResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Promotion"
)]
pub async fn list_promotion_counts(
    State(state): State<AppState>,
    Query(params): Query<AffiliationSearchParams>,
) -> ApiResult<Json<Vec<CountedAffiliationResponse>>> {
    affiliation::counts(&state.roster.promotions, params).await
}

/// Promotion `{id, name}` pairs for pickers
#[utoipa::path(
    get,
    path = "/api/promotions/options",
    responses(
        (status = 200, description = "Promotion references", body = Vec<EntityRefResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Promotion"
)]
pub async fn list_promotion_options(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<EntityRefResponse>>> {
    affiliation::options(&state.roster.promotions).await
}

/// Create new promotion
#[utoipa::path(
    post,
    path = "/api/promotions",
    request_body = CreateAffiliationRequest,
    responses(
        (status = 201, description = "Promotion created", body = AffiliationResponse),
        (status = 400, description = "Empty name"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Promotion"
)]
pub async fn create_promotion(
    State(state): State<AppState>,
    Json(payload): Json<CreateAffiliationRequest>,
) -> ApiResult<(StatusCode, Json<AffiliationResponse>)> {
    affiliation::create(&state.roster.promotions, payload).await
}

/// Get promotion by ID
#[utoipa::path(
    get,
    path = "/api/promotions/{id}",
    params(("id" = Uuid, Path, description = "Promotion ID")),
    responses(
        (status = 200, description = "Promotion found", body = AffiliationResponse),
        (status = 404, description = "Promotion not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Promotion"
)]
pub async fn get_promotion(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<AffiliationResponse>> {
    affiliation::get(&state.roster.promotions, id).await
}

/// Update promotion
#[utoipa::path(
    put,
    path = "/api/promotions/{id}",
    params(("id" = Uuid, Path, description = "Promotion ID")),
    request_body = UpdateAffiliationRequest,
    responses(
        (status = 200, description = "Promotion updated", body = AffiliationResponse),
        (status = 400, description = "Empty name"),
        (status = 404, description = "Promotion not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Promotion"
)]
pub async fn update_promotion(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAffiliationRequest>,
) -> ApiResult<Json<AffiliationResponse>> {
    affiliation::update(&state.roster.promotions, id, payload).await
}

/// Delete promotion and unlink it from every wrestler
#[utoipa::path(
    delete,
    path = "/api/promotions/{id}",
    params(("id" = Uuid, Path, description = "Promotion ID")),
    responses(
        (status = 204, description = "Promotion deleted"),
        (status = 404, description = "Promotion not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Promotion"
)]
pub async fn delete_promotion(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    affiliation::delete(&state.roster.promotions, id).await
}

/// Upload a promotion image
#[utoipa::path(
    post,
    path = "/api/promotions/images",
    params(UploadParams),
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "Image stored", body = UploadResponse),
        (status = 400, description = "Empty body"),
        (status = 500, description = "Upload failed")
    ),
    tag = "Promotion"
)]
pub async fn upload_promotion_image(
    State(state): State<AppState>,
    Query(params): Query<UploadParams>,
    body: Bytes,
) -> ApiResult<Json<UploadResponse>> {
    affiliation::upload(&state.roster.promotions, params, body).await
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/promotions", get(list_promotions).post(create_promotion))
        .route("/api/promotions/counts", get(list_promotion_counts))
        .route("/api/promotions/options", get(list_promotion_options))
        .route("/api/promotions/images", post(upload_promotion_image))
        .route(
            "/api/promotions/:id",
            get(get_promotion)
                .put(update_promotion)
                .delete(delete_promotion),
        )
}
