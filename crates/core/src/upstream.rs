use reqwest::Client;
use serde_json::{Number, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error(transparent)]
    Request(#[from] reqwest::Error),
}

/// One-shot client for the upstream cats API. Each call performs exactly one
/// GET; no retries, no timeout beyond reqwest's defaults. Bodies are relayed
/// verbatim without shape validation.
pub struct CatsClient {
    client: Client,
    base_url: String,
}

impl CatsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub async fn get(&self, path: &str) -> Result<Value, UpstreamError> {
        let url = format!("{}{}", self.base_url, path);
        self.fetch(&url).await
    }

    pub async fn get_with_count(&self, path: &str, n: &Number) -> Result<Value, UpstreamError> {
        let url = format!("{}{}?n={}", self.base_url, path, n);
        self.fetch(&url).await
    }

    async fn fetch(&self, url: &str) -> Result<Value, UpstreamError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }
}
