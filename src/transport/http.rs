//! reqwest-backed transport.

use std::time::{Duration, Instant};

use reqwest::{Client, Method, Url};
use tokio::sync::RwLock;

use super::{ApiResponse, RequestOptions, Transport};
use crate::config::normalize_base_url;
use crate::errors::ClientError;

/// HTTP transport over a shared reqwest client.
pub struct HttpTransport {
    client: Client,
    base_url: RwLock<String>,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: RwLock::new(normalize_base_url(base_url)),
        })
    }

    async fn build_url(&self, path: &str, query: &[(String, String)]) -> Result<Url, ClientError> {
        let base = self.base_url.read().await.clone();
        let mut url = Url::parse(&format!("{}{}", base, path))
            .map_err(|e| ClientError::Config(format!("Invalid URL {}{}: {}", base, path, e)))?;

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }
}

impl Transport for HttpTransport {
    async fn base_url(&self) -> String {
        self.base_url.read().await.clone()
    }

    async fn set_base_url(&self, raw: &str) -> String {
        let normalized = normalize_base_url(raw);
        *self.base_url.write().await = normalized.clone();
        normalized
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse, ClientError> {
        let url = self.build_url(path, &options.query).await?;
        tracing::debug!("{} {}", method, url);

        let mut builder = self.client.request(method.clone(), url.clone());
        if let Some(body) = &options.body {
            builder = builder.json(body);
        }

        let started_at = Instant::now();
        let response = builder.send().await?;
        let elapsed_ms = started_at.elapsed().as_millis() as u64;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::debug!("{} {} -> {}", method, url, status);
        }

        Ok(ApiResponse {
            ok: status.is_success(),
            status: status.as_u16(),
            method: method.to_string(),
            url: url.to_string(),
            elapsed_ms,
            payload: ApiResponse::decode_payload(&text),
        })
    }
}
