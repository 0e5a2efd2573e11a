//! Domain Layer - Normalized records and per-source ranking rules
//!
//! Pure types and logic with no I/O. Adapters fetch and validate upstream
//! payloads, then hand them to these rules:
//! - `records`: output shapes every adapter publishes
//! - `pair_ranking`: DEX pair filter / newest-first ordering / cap
//! - `listing_filter`: forum keyword matching and URL dedup
//! - `price_text`: numeric reading of retail price labels

pub mod records;
pub mod pair_ranking;
pub mod listing_filter;
pub mod price_text;

pub use records::{
    Caliber, CommodityPrice, CommodityPrices, MarketplaceListing, SpotPrice, TradingPairCandidate,
    PRICE_ERROR_MARKER,
};
pub use pair_ranking::{rank_pairs, PairFilter, RawPair};
pub use listing_filter::{ListingFilter, RawLink};
pub use price_text::{lowest_price, parse_price, LowestPrice};
