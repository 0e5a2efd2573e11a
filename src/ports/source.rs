//! Source Ports
//!
//! The two seams of the ingestion core: `HttpSource` abstracts outbound
//! transport, `SourceAdapter` is the contract every network adapter
//! implements.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Why a fetch failed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchErrorKind {
    /// Network, DNS, timeout or non-success HTTP status
    #[error("transport error: {0}")]
    Transport(String),

    /// Selector miss or undecodable body
    #[error("parse error: {0}")]
    Parse(String),

    /// Document has the wrong top-level shape
    #[error("unexpected upstream shape: expected {expected}, got {found}")]
    UpstreamShape {
        expected: &'static str,
        found: &'static str,
    },
}

/// A failed adapter invocation, tagged with the source that failed
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{source_name} fetch failed: {cause}")]
pub struct FetchError {
    pub source_name: String,
    pub cause: FetchErrorKind,
}

impl FetchError {
    pub fn new(source_name: impl Into<String>, cause: FetchErrorKind) -> Self {
        Self {
            source_name: source_name.into(),
            cause,
        }
    }
}

/// Outbound HTTP transport used by every adapter
#[async_trait]
pub trait HttpSource: Send + Sync {
    /// GET a URL and return the response body
    async fn get_text(&self, url: &str) -> Result<String, FetchErrorKind>;

    /// GET a URL and decode the body as JSON
    async fn get_json(&self, url: &str) -> Result<Value, FetchErrorKind> {
        let body = self.get_text(url).await?;
        serde_json::from_str(&body).map_err(|e| FetchErrorKind::Parse(format!("invalid JSON from {}: {}", url, e)))
    }
}

/// A single-source ingestion unit
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Normalized payload published on success
    type Output: Serialize + Send;

    /// Source name used in errors and logs
    fn name(&self) -> &'static str;

    /// Fetch, extract and normalize one batch of records
    async fn fetch(&self) -> Result<Self::Output, FetchError>;
}
