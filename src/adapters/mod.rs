//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits:
//! - HTTP: reqwest transport shared by every network source
//! - DexScreener: token pair search
//! - BulkAmmo: per-caliber price pages
//! - Forum: AR15.com Equipment Exchange listings
//! - CoinGecko: spot prices
//! - Snapshot: collector JSON documents on disk
//! - Server: axum routes for the dashboard
//! - CLI: Command-line interface handlers

pub mod http;
pub mod shape;
pub mod scrape;
pub mod dexscreener;
pub mod bulkammo;
pub mod forum;
pub mod coingecko;
pub mod snapshot;
pub mod server;
pub mod cli;

pub use http::HttpClient;
pub use dexscreener::TokenScanAdapter;
pub use bulkammo::CommodityPriceAdapter;
pub use forum::MarketplaceListingAdapter;
pub use coingecko::SpotPriceAdapter;
pub use snapshot::SnapshotReader;
pub use server::DashboardServer;
pub use cli::CliApp;
