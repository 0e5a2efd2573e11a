//! Alpha Radar Scanner
//!
//! Queries DexScreener pair search, keeps liquid and active pairs on the
//! target chain, and returns the newest few.

use std::sync::Arc;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info};

use crate::adapters::shape::{decode, expect_object, optional_array};
use crate::domain::{rank_pairs, PairFilter, RawPair, TradingPairCandidate};
use crate::ports::{FetchError, FetchErrorKind, HttpSource, SourceAdapter};

use super::types::DexPair;

pub const SOURCE_NAME: &str = "alpha";

/// DexScreener pair search endpoint
pub const DEX_SEARCH_API: &str = "https://api.dexscreener.com/latest/dex/search";

/// Scanner configuration
#[derive(Debug, Clone)]
pub struct TokenScanConfig {
    pub search_url: String,
    /// Fixed search term
    pub query: String,
    pub filter: PairFilter,
}

impl Default for TokenScanConfig {
    fn default() -> Self {
        Self {
            search_url: DEX_SEARCH_API.to_string(),
            query: "solana".to_string(),
            filter: PairFilter::default(),
        }
    }
}

impl TokenScanConfig {
    pub fn request_url(&self) -> String {
        format!("{}?q={}", self.search_url, self.query)
    }
}

/// DexScreener-backed "Alpha Radar"
#[derive(Clone)]
pub struct TokenScanAdapter {
    config: TokenScanConfig,
    http: Arc<dyn HttpSource>,
}

impl TokenScanAdapter {
    pub fn new(config: TokenScanConfig, http: Arc<dyn HttpSource>) -> Self {
        Self { config, http }
    }

    pub fn config(&self) -> &TokenScanConfig {
        &self.config
    }

    /// Run one search and rank the results
    pub async fn scan(&self) -> Result<Vec<TradingPairCandidate>, FetchError> {
        let url = self.config.request_url();
        debug!(source = SOURCE_NAME, %url, "Searching pairs");

        let document = self
            .http
            .get_json(&url)
            .await
            .map_err(|e| FetchError::new(SOURCE_NAME, e))?;

        let pairs = parse_search_response(&document).map_err(|e| FetchError::new(SOURCE_NAME, e))?;
        let upstream = pairs.len();

        let ranked = rank_pairs(pairs, &self.config.filter, Utc::now().timestamp_millis());
        info!(source = SOURCE_NAME, upstream, kept = ranked.len(), "Pair scan complete");
        Ok(ranked)
    }
}

#[async_trait]
impl SourceAdapter for TokenScanAdapter {
    type Output = Vec<TradingPairCandidate>;

    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    async fn fetch(&self) -> Result<Self::Output, FetchError> {
        self.scan().await
    }
}

/// Validate a search response and pull out its usable pairs
pub fn parse_search_response(document: &Value) -> Result<Vec<RawPair>, FetchErrorKind> {
    let root = expect_object(document)?;
    let entries = optional_array(root, "pairs")?;

    let mut pairs = Vec::with_capacity(entries.len());
    for entry in entries {
        expect_object(entry)?;
        let pair: DexPair = decode(entry)?;
        if let Some(raw) = pair.into_raw() {
            pairs.push(raw);
        }
    }
    Ok(pairs)
}
