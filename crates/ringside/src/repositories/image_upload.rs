//! Image upload shared by every repository
//!
//! Upload and the subsequent create/update are separate steps. If the
//! second step fails the blob stays behind; it is never cleaned up.

use crate::domain::{DomainError, ImagePath};
use crate::ports::BlobStore;

/// Store `bytes` under a fresh random path in `bucket` and return its
/// public URL
pub async fn upload_image<B: BlobStore + ?Sized>(
    blobs: &B,
    bucket: &str,
    file_name: &str,
    bytes: Vec<u8>,
) -> Result<String, DomainError> {
    let path = ImagePath::generate(file_name);
    blobs
        .put(bucket, path.as_str(), bytes, path.content_type())
        .await?;

    let url = blobs.public_url(bucket, path.as_str());
    tracing::info!("Uploaded image {}/{}", bucket, path);
    Ok(url)
}
