use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use tracing::debug;
use crate::error::{redact_api_key, GatewayError};
use crate::traits::HttpFetch;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// `HttpFetch` over a shared reqwest client
#[derive(Clone)]
pub struct ReqwestFetch {
    client: Arc<Client>,
}

impl ReqwestFetch {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::ACCEPT,
                    reqwest::header::HeaderValue::from_static("application/json"),
                );
                headers
            })
            .user_agent(concat!("marquee/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client: Arc::new(client) })
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetch {
    async fn get(&self, url: &str) -> Result<HttpResponse, GatewayError> {
        debug!("GET {}", redact_api_key(url));

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| GatewayError::transport(url, e.without_url().to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::transport(url, e.without_url().to_string()))?;

        Ok(HttpResponse { status, body })
    }
}
