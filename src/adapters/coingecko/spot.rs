//! Spot Price Client
//!
//! Looks up one asset's USD price. The asset id arrives from callers
//! (including the HTTP path) and is always query-encoded.

use std::sync::Arc;
use async_trait::async_trait;
use reqwest::Url;
use tracing::debug;

use crate::adapters::shape::number_at;
use crate::domain::SpotPrice;
use crate::ports::{FetchError, FetchErrorKind, HttpSource, SourceAdapter};

pub const SOURCE_NAME: &str = "spot";

const COINGECKO_SIMPLE_PRICE_API: &str = "https://api.coingecko.com/api/v3/simple/price";

#[derive(Debug, Clone)]
pub struct SpotPriceConfig {
    pub api_url: String,
    /// CoinGecko asset id used when none is requested
    pub default_asset: String,
}

impl Default for SpotPriceConfig {
    fn default() -> Self {
        Self {
            api_url: COINGECKO_SIMPLE_PRICE_API.to_string(),
            default_asset: "solana".to_string(),
        }
    }
}

impl SpotPriceConfig {
    pub fn request_url(&self, asset: &str) -> Result<String, FetchErrorKind> {
        Url::parse_with_params(&self.api_url, &[("ids", asset), ("vs_currencies", "usd")])
            .map(String::from)
            .map_err(|e| FetchErrorKind::Parse(format!("invalid spot URL: {}", e)))
    }
}

#[derive(Clone)]
pub struct SpotPriceAdapter {
    config: SpotPriceConfig,
    http: Arc<dyn HttpSource>,
}

impl SpotPriceAdapter {
    pub fn new(config: SpotPriceConfig, http: Arc<dyn HttpSource>) -> Self {
        Self { config, http }
    }

    /// Get USD price for a single asset
    pub async fn fetch_spot(&self, asset: &str) -> Result<f64, FetchError> {
        let url = self.config.request_url(asset).map_err(|e| FetchError::new(SOURCE_NAME, e))?;
        debug!(source = SOURCE_NAME, asset, "Fetching spot price");

        let document = self
            .http
            .get_json(&url)
            .await
            .map_err(|e| FetchError::new(SOURCE_NAME, e))?;

        number_at(&document, &[asset, "usd"]).map_err(|e| FetchError::new(SOURCE_NAME, e))
    }

    pub async fn spot_price(&self, asset: &str) -> Result<SpotPrice, FetchError> {
        Ok(SpotPrice {
            asset: asset.to_string(),
            price_usd: self.fetch_spot(asset).await?,
        })
    }

    pub fn default_asset(&self) -> &str {
        &self.config.default_asset
    }
}

#[async_trait]
impl SourceAdapter for SpotPriceAdapter {
    type Output = SpotPrice;

    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    async fn fetch(&self) -> Result<Self::Output, FetchError> {
        self.spot_price(&self.config.default_asset).await
    }
}
