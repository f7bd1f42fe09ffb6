//! HTTP transport for catalog pages using wreq.

use crate::config::Config;
use crate::error::TransportError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use url::Url;
use wreq::Client;

/// Single GET of a page body - enables mocking for tests.
#[async_trait]
pub trait CatalogTransport: Send + Sync {
    /// Fetches `url` and returns the raw body. Non-2xx statuses are errors.
    async fn get(&self, url: &Url) -> Result<String, TransportError>;
}

/// Catalog HTTP client: fixed timeout, one User-Agent header, no cookies.
pub struct CatalogClient {
    client: Client,
    user_agent: String,
}

impl CatalogClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder =
            Client::builder().timeout(config.timeout()).connect_timeout(Duration::from_secs(10));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { client, user_agent: config.user_agent.clone() })
    }
}

#[async_trait]
impl CatalogTransport for CatalogClient {
    async fn get(&self, url: &Url) -> Result<String, TransportError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url.as_str())
            .header("User-Agent", self.user_agent.as_str())
            .send()
            .await
            .map_err(|e| TransportError::Request { url: url.to_string(), message: e.to_string() })?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(TransportError::Status { url: url.to_string(), status: status.as_u16() });
        }

        response
            .text()
            .await
            .map_err(|e| TransportError::Body { url: url.to_string(), message: e.to_string() })
    }
}
