//! Supabase Storage Implementation
//!
//! Uploads images over the storage REST API using reqwest. Uploads never
//! overwrite (`x-upsert: false`); objects are served from public buckets.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use ringside::{BlobStore, DomainError};

/// Supabase Storage implementation of BlobStore
pub struct SupabaseStorage {
    client: Client,
    base_url: String,
    service_key: String,
}

impl SupabaseStorage {
    pub fn new(base_url: &str, service_key: &str, timeout: Duration) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(DomainError::blob)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
        })
    }

    fn object_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, bucket, path)
    }
}

#[async_trait]
impl BlobStore for SupabaseStorage {
    async fn put(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), DomainError> {
        let response = self
            .client
            .post(self.object_url(bucket, path))
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .header("Content-Type", content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await
            .map_err(DomainError::blob)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Upload to {}/{} failed: {} {}", bucket, path, status, body);
            return Err(DomainError::Blob(format!(
                "upload to {}/{} failed ({}): {}",
                bucket, path, status, body
            )));
        }

        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, bucket, path
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_ignore_trailing_slash() {
        let storage = SupabaseStorage::new(
            "https://abc.supabase.co/",
            "service-key",
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(
            storage.object_url("wrestler-images", "a.png"),
            "https://abc.supabase.co/storage/v1/object/wrestler-images/a.png"
        );
        assert_eq!(
            storage.public_url("wrestler-images", "a.png"),
            "https://abc.supabase.co/storage/v1/object/public/wrestler-images/a.png"
        );
    }
}
