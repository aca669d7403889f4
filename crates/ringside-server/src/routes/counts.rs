//! Count Routes
//!
//! Both counted lists in one call, read concurrently.

use axum::{extract::State, routing::get, Json, Router};

use super::{domain_error, ApiResult};
use crate::models::CountsResponse;
use crate::AppState;

/// Wrestler counts for every promotion and faction
#[utoipa::path(
    get,
    path = "/api/counts",
    responses(
        (status = 200, description = "Promotion and faction counts", body = CountsResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Counts"
)]
pub async fn get_counts(State(state): State<AppState>) -> ApiResult<Json<CountsResponse>> {
    let counts = state.roster.refresh_counts().await.map_err(domain_error)?;

    Ok(Json(CountsResponse {
        promotions: counts.promotions.into_iter().map(Into::into).collect(),
        factions: counts.factions.into_iter().map(Into::into).collect(),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/counts", get(get_counts))
}
