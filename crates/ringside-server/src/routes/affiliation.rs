//! Handlers shared by the promotion and faction routes

use axum::{body::Bytes, http::StatusCode, Json};
use uuid::Uuid;

use ringside::{Affiliation, AffiliationRepository};

use super::{domain_error, store_image, ApiResult};
use crate::adapters::{PgStore, SupabaseStorage};
use crate::models::{
    AffiliationResponse, AffiliationSearchParams, CountedAffiliationResponse,
    CreateAffiliationRequest, EntityRefResponse, UpdateAffiliationRequest, UploadParams,
    UploadResponse,
};

pub(super) type Repo<A> = AffiliationRepository<PgStore, SupabaseStorage, A>;

pub(super) async fn list<A: Affiliation>(repo: &Repo<A>) -> ApiResult<Json<Vec<AffiliationResponse>>> {
    let items = repo.list().await.map_err(domain_error)?;
    Ok(Json(items.iter().map(AffiliationResponse::from_domain).collect()))
}

pub(super) async fn counts<A: Affiliation>(
    repo: &Repo<A>,
    params: AffiliationSearchParams,
) -> ApiResult<Json<Vec<CountedAffiliationResponse>>> {
    let items = repo
        .search(params.q.as_deref().unwrap_or_default())
        .await
        .map_err(domain_error)?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

pub(super) async fn options<A: Affiliation>(
    repo: &Repo<A>,
) -> ApiResult<Json<Vec<EntityRefResponse>>> {
    let refs = repo.options().await.map_err(domain_error)?;
    Ok(Json(refs.into_iter().map(Into::into).collect()))
}

pub(super) async fn get<A: Affiliation>(repo: &Repo<A>, id: Uuid) -> ApiResult<Json<AffiliationResponse>> {
    let item = repo
        .get(id)
        .await
        .map_err(domain_error)?
        .ok_or((
            StatusCode::NOT_FOUND,
            format!("{} not found", A::KIND.entity_name()),
        ))?;
    Ok(Json(AffiliationResponse::from_domain(&item)))
}

pub(super) async fn create<A: Affiliation>(
    repo: &Repo<A>,
    payload: CreateAffiliationRequest,
) -> ApiResult<(StatusCode, Json<AffiliationResponse>)> {
    let item = repo
        .create(&payload.name, payload.image_url)
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(AffiliationResponse::from_domain(&item))))
}

pub(super) async fn update<A: Affiliation>(
    repo: &Repo<A>,
    id: Uuid,
    payload: UpdateAffiliationRequest,
) -> ApiResult<Json<AffiliationResponse>> {
    let item = repo.update(id, payload.into()).await.map_err(domain_error)?;
    Ok(Json(AffiliationResponse::from_domain(&item)))
}

pub(super) async fn delete<A: Affiliation>(repo: &Repo<A>, id: Uuid) -> ApiResult<StatusCode> {
    if repo.delete(id).await.map_err(domain_error)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((
            StatusCode::NOT_FOUND,
            format!("{} not found", A::KIND.entity_name()),
        ))
    }
}

pub(super) async fn upload<A: Affiliation>(
    repo: &Repo<A>,
    params: UploadParams,
    body: Bytes,
) -> ApiResult<Json<UploadResponse>> {
    store_image(params, body, |name, bytes| async move {
        repo.upload_image(&name, bytes).await
    })
    .await
}
