//! Card feed HTTP client
//!
//! Fetches the whole card store from a JSON endpoint.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;

use crate::config::SourceConfig;
use crate::core::library::CardSource;
use crate::core::store::CardStore;

/// HTTP client for the card feed
#[derive(Debug, Clone)]
pub struct RemoteClient {
    client: Client,
    feed_url: Url,
    token: Option<String>,
}

impl RemoteClient {
    /// Create new client from source config
    pub fn from_config(config: &SourceConfig) -> Result<Self> {
        let url = config.url.as_ref().ok_or_else(|| {
            anyhow::anyhow!("Card feed URL not configured. Set source.url in config or use --url.")
        })?;

        Self::new(url, config.token.clone(), config.timeout_secs)
    }

    /// Create new client with explicit parameters
    pub fn new(feed_url: &str, token: Option<String>, timeout_secs: u64) -> Result<Self> {
        let feed_url =
            Url::parse(feed_url).with_context(|| format!("Invalid feed URL: {}", feed_url))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            feed_url,
            token,
        })
    }

    /// Add auth header if token is set
    fn auth_header(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(ref token) = self.token {
            builder.header("Authorization", format!("Bearer {}", token))
        } else {
            builder
        }
    }

    /// Download and parse the card feed
    pub async fn fetch_cards(&self) -> Result<CardStore> {
        let resp = self
            .auth_header(self.client.get(self.feed_url.clone()))
            .send()
            .await
            .context("Failed to connect to card feed")?;

        self.handle_response(resp).await
    }

    /// Handle response and deserialize
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T> {
        let status = resp.status();

        if status == StatusCode::NOT_FOUND {
            anyhow::bail!("Card feed not found at {}", self.feed_url);
        }

        if !status.is_success() {
            let err = self.extract_error(resp).await;
            anyhow::bail!("Card feed error ({}): {}", status, err);
        }

        resp.json().await.context("Failed to parse card feed")
    }

    /// Extract error message from response
    async fn extract_error(&self, resp: reqwest::Response) -> String {
        match resp.text().await {
            Ok(body) if !body.trim().is_empty() => body.trim().to_string(),
            _ => "Unknown error".to_string(),
        }
    }
}

#[async_trait]
impl CardSource for RemoteClient {
    async fn fetch(&self) -> Result<CardStore> {
        self.fetch_cards().await
    }

    fn describe(&self) -> String {
        self.feed_url.to_string()
    }
}
