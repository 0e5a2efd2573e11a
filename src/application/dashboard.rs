//! Dashboard
//!
//! The aggregation boundary: owns one instance of each source adapter and
//! invokes them independently. No result is merged, cached or shared
//! between sources.

use std::sync::Arc;
use std::time::Instant;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::adapters::bulkammo::CommodityPriceAdapter;
use crate::adapters::coingecko::SpotPriceAdapter;
use crate::adapters::dexscreener::TokenScanAdapter;
use crate::adapters::forum::MarketplaceListingAdapter;
use crate::adapters::http::{HttpClient, HttpClientConfig, HttpClientError};
use crate::adapters::scrape::InvalidSelector;
use crate::adapters::snapshot::SnapshotReader;
use crate::config::Config;
use crate::domain::{CommodityPrices, MarketplaceListing, SpotPrice, TradingPairCandidate};
use crate::ports::{FetchError, HttpSource, SourceAdapter};

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("HTTP client error: {0}")]
    Http(#[from] HttpClientError),
    #[error("Adapter configuration error: {0}")]
    Selector(#[from] InvalidSelector),
}

/// How one source fared in a report cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReportOutcome {
    /// Records published; `degraded` counts per-unit failures (ERR calibers)
    Ok { records: usize, degraded: usize },
    Failed { cause: String },
}

/// Result of invoking one source, stamped with when it was fetched
#[derive(Debug, Clone, Serialize)]
pub struct SourceReport {
    pub source: &'static str,
    pub fetched_at: DateTime<Utc>,
    pub elapsed_ms: u64,
    pub outcome: ReportOutcome,
}

impl SourceReport {
    /// Time since this report's data was fetched
    pub fn age(&self) -> Duration {
        Utc::now() - self.fetched_at
    }

    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, ReportOutcome::Ok { .. })
    }
}

/// Holds every source adapter; invoke-and-return only, no timers
#[derive(Clone)]
pub struct Dashboard {
    alpha: TokenScanAdapter,
    ammo: CommodityPriceAdapter,
    gear: MarketplaceListingAdapter,
    spot: SpotPriceAdapter,
    snapshots: SnapshotReader,
}

impl Dashboard {
    /// Build all adapters over a real HTTP client
    pub fn from_config(config: &Config) -> Result<Self, DashboardError> {
        let http = HttpClient::with_config(HttpClientConfig::from(config))?;
        Self::with_source(config, Arc::new(http))
    }

    /// Build all adapters over the given transport
    pub fn with_source(config: &Config, http: Arc<dyn HttpSource>) -> Result<Self, DashboardError> {
        Ok(Self {
            alpha: TokenScanAdapter::new(config.into(), Arc::clone(&http)),
            ammo: CommodityPriceAdapter::new(config.into(), Arc::clone(&http))?,
            gear: MarketplaceListingAdapter::new(config.into(), Arc::clone(&http))?,
            spot: SpotPriceAdapter::new(config.into(), http),
            snapshots: SnapshotReader::new(config.snapshots.resolved_dir()),
        })
    }

    pub async fn alpha(&self) -> Result<Vec<TradingPairCandidate>, FetchError> {
        self.alpha.scan().await
    }

    pub async fn ammo(&self) -> CommodityPrices {
        self.ammo.fetch_prices().await
    }

    pub async fn gear(&self) -> Result<Vec<MarketplaceListing>, FetchError> {
        self.gear.scan().await
    }

    /// Spot price for `asset`, or the configured default asset
    pub async fn spot(&self, asset: Option<&str>) -> Result<SpotPrice, FetchError> {
        let asset = asset.unwrap_or_else(|| self.spot.default_asset());
        self.spot.spot_price(asset).await
    }

    pub async fn snapshot(&self, name: &str) -> Value {
        self.snapshots.read_snapshot(name).await
    }

    pub fn snapshot_reader(&self) -> &SnapshotReader {
        &self.snapshots
    }

    /// Invoke every network source concurrently and report on each
    pub async fn report_all(&self) -> Vec<SourceReport> {
        let (alpha, ammo, gear, spot) = tokio::join!(
            report(&self.alpha, |r| (r.len(), 0)),
            report(&self.ammo, |r| (r.len(), r.error_count())),
            report(&self.gear, |r| (r.len(), 0)),
            report(&self.spot, |_| (1, 0)),
        );
        vec![alpha, ammo, gear, spot]
    }
}

async fn report<A, F>(adapter: &A, count: F) -> SourceReport
where
    A: SourceAdapter,
    F: FnOnce(&A::Output) -> (usize, usize),
{
    let fetched_at = Utc::now();
    let started = Instant::now();
    let result = adapter.fetch().await;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    let outcome = match result {
        Ok(output) => {
            let (records, degraded) = count(&output);
            ReportOutcome::Ok { records, degraded }
        }
        Err(e) => {
            tracing::warn!(source = adapter.name(), error = %e.cause, "Source failed");
            ReportOutcome::Failed {
                cause: e.cause.to_string(),
            }
        }
    };

    SourceReport {
        source: adapter.name(),
        fetched_at,
        elapsed_ms,
        outcome,
    }
}
