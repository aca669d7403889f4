//! Server configuration
//!
//! Read from shuttle secrets, falling back to the process environment
//! (and a local `.env`) for keys the secret store does not define.

use std::time::Duration;

use anyhow::{Context, Result};
use shuttle_runtime::SecretStore;

const DEFAULT_STORAGE_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub storage_url: String,
    pub storage_key: String,
    pub storage_timeout: Duration,
}

impl ServerConfig {
    pub fn from_secrets(secrets: &SecretStore) -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::info!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| secrets.get(key).or_else(|| std::env::var(key).ok()))
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let storage_url = get("SUPABASE_URL").context("SUPABASE_URL is not set")?;
        let storage_key = get("SUPABASE_SERVICE_KEY").context("SUPABASE_SERVICE_KEY is not set")?;

        let storage_timeout = match get("STORAGE_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("STORAGE_TIMEOUT_SECS is not a number: {raw}"))?,
            None => DEFAULT_STORAGE_TIMEOUT_SECS,
        };

        Ok(Self {
            storage_url,
            storage_key,
            storage_timeout: Duration::from_secs(storage_timeout),
        })
    }
}
