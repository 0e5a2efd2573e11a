//! Maximus - Multi-Source Intel Dashboard Library
//!
//! Independent ingestion adapters that each pull one external source on
//! demand and return a normalized payload for the dashboard.
//!
//! # Modules
//!
//! - `domain`: Records and pure rules (pair ranking, listing filter, price text)
//! - `ports`: Trait abstractions (HttpSource, SourceAdapter) and mocks
//! - `adapters`: External implementations (DexScreener, BulkAmmo, forum, CoinGecko, snapshots, HTTP server, CLI)
//! - `config`: Configuration loading and validation
//! - `application`: Dashboard aggregation and report watcher

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod config;
pub mod application;
