// src/services/fetch.rs

//! HTTP transport for the article server.
//!
//! All remote resources (listings, article bodies, view templates) are plain
//! GET requests for text. The transport sits behind the `Fetch` trait so
//! sessions can run against stub implementations in tests.

use std::time::Duration;

use async_trait::async_trait;
use futures::future::try_join_all;

use crate::error::{AppError, Result};
use crate::models::HttpConfig;

/// Asynchronous text fetching.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// GET a URL and return the response body. Completes exactly once, with
    /// failures surfaced as structured errors.
    async fn fetch_text(&self, url: &str) -> Result<String>;

    /// Fetch every URL concurrently, resolving only once all have completed.
    ///
    /// Results arrive in request order regardless of completion order. Any
    /// constituent failure fails the whole call.
    async fn fetch_all(&self, urls: &[&str]) -> Result<Vec<String>> {
        try_join_all(urls.iter().map(|url| self.fetch_text(url))).await
    }
}

/// `Fetch` implementation over a configured reqwest client.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher with user agent and timeout from configuration.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::status(url, status.as_u16()));
        }
        Ok(response.text().await?)
    }
}
