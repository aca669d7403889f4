//! Blob Store Port
//!
//! Abstract interface for image storage.

use async_trait::async_trait;

use crate::domain::errors::DomainError;

/// Write-once object storage with public URLs
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `bytes` at `bucket/path`. Never overwrites: an existing path
    /// is an error.
    async fn put(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), DomainError>;

    /// Public URL of `bucket/path`. Does not check that the object exists.
    fn public_url(&self, bucket: &str, path: &str) -> String;
}
