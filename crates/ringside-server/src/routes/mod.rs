//! Ringside API Routes
//!
//! - /api/promotions - Promotion management
//! - /api/factions - Faction management
//! - /api/wrestlers - Wrestlers and their promotion/faction links
//! - /api/counts - Wrestler counts per promotion and faction

use std::future::Future;

use axum::{body::Bytes, http::StatusCode, Json};
use ringside::DomainError;

use crate::models::{UploadParams, UploadResponse};

mod affiliation;
pub mod counts;
pub mod faction;
pub mod promotion;
pub mod swagger;
pub mod wrestler;

pub type ApiError = (StatusCode, String);
pub type ApiResult<T> = Result<T, ApiError>;

/// Map a domain error to a status code, keeping its message
pub fn domain_error(err: DomainError) -> ApiError {
    let status = match &err {
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Store(_) | DomainError::Blob(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!("{}", err);
    }
    (status, err.to_string())
}

/// Reject an empty body, then hand the bytes to `upload` and wrap the URL
pub(crate) async fn store_image<F, Fut>(
    params: UploadParams,
    body: Bytes,
    upload: F,
) -> ApiResult<Json<UploadResponse>>
where
    F: FnOnce(String, Vec<u8>) -> Fut,
    Fut: Future<Output = Result<String, DomainError>>,
{
    if body.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Image body is empty".to_string()));
    }
    let url = upload(params.file_name, body.to_vec())
        .await
        .map_err(domain_error)?;
    Ok(Json(UploadResponse { url }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DomainError::Validation("empty".into()), StatusCode::BAD_REQUEST),
            (DomainError::not_found("Wrestler", Uuid::nil()), StatusCode::NOT_FOUND),
            (DomainError::Store("down".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::Blob("exists".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            let message = err.to_string();
            assert_eq!(domain_error(err), (expected, message));
        }
    }

    fn params() -> UploadParams {
        UploadParams {
            file_name: "kenny.png".to_string(),
        }
    }

    #[tokio::test]
    async fn test_empty_image_body_never_reaches_storage() {
        let result = store_image(params(), Bytes::new(), |_, _| async {
            Err(DomainError::Blob("storage was called".to_string()))
        })
        .await;
        let (status, _) = result.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_stored_image_returns_url() {
        let body = Bytes::from_static(b"png");
        let Json(response) = store_image(params(), body, |name, bytes| async move {
            assert_eq!(name, "kenny.png");
            assert_eq!(bytes, b"png".to_vec());
            Ok("https://cdn.example/wrestler-images/x.png".to_string())
        })
        .await
        .unwrap();
        assert_eq!(response.url, "https://cdn.example/wrestler-images/x.png");
    }
}
