//! HTTP Client
//!
//! reqwest-backed `HttpSource`. Every request carries the configured
//! browser User-Agent and a hard timeout; there are no retries.

use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::ports::{FetchErrorKind, HttpSource};

/// Desktop Chrome UA; the scraped sites reject obvious bots
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

#[derive(Debug, Error)]
pub enum HttpClientError {
    #[error("Failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Per-request timeout
    pub timeout: Duration,
    /// User-Agent header sent on every request
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Outbound HTTP client shared by all adapters
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: Client,
}

impl HttpClient {
    /// Create a client with default configuration
    pub fn new() -> Result<Self, HttpClientError> {
        Self::with_config(HttpClientConfig::default())
    }

    pub fn with_config(config: HttpClientConfig) -> Result<Self, HttpClientError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()?;

        Ok(Self { http })
    }
}

#[async_trait]
impl HttpSource for HttpClient {
    async fn get_text(&self, url: &str) -> Result<String, FetchErrorKind> {
        tracing::debug!(url, "GET");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchErrorKind::Transport(describe(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchErrorKind::Transport(format!("{} returned status {}", url, status)));
        }

        response
            .text()
            .await
            .map_err(|e| FetchErrorKind::Transport(describe(&e)))
    }
}

fn describe(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        format!("request timed out: {}", error)
    } else if error.is_connect() {
        format!("connection failed: {}", error)
    } else {
        error.to_string()
    }
}
