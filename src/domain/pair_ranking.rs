//! Pair Ranking
//!
//! Filters, orders and truncates DEX pair search results into the
//! "Alpha Radar" candidate list.
//!
//! Rules, applied in order:
//! 1. chain must equal the target chain
//! 2. liquidity and 24h volume must exceed their minimums (missing = excluded)
//! 3. newest first by creation timestamp, missing timestamps last, stable
//! 4. at most `max_results` entries

use super::records::TradingPairCandidate;

/// A search result after schema validation, before ranking
#[derive(Debug, Clone, PartialEq)]
pub struct RawPair {
    pub chain_id: Option<String>,
    pub name: String,
    pub symbol: String,
    pub price_usd: Option<String>,
    pub liquidity_usd: Option<f64>,
    pub volume_24h_usd: Option<f64>,
    /// Pair creation time, unix milliseconds
    pub created_at_ms: Option<i64>,
    pub url: String,
}

/// Filter thresholds for pair ranking
#[derive(Debug, Clone, PartialEq)]
pub struct PairFilter {
    pub chain_id: String,
    pub min_liquidity_usd: f64,
    pub min_volume_24h_usd: f64,
    pub max_results: usize,
}

impl Default for PairFilter {
    fn default() -> Self {
        Self {
            chain_id: "solana".to_string(),
            min_liquidity_usd: 5_000.0,
            min_volume_24h_usd: 10_000.0,
            max_results: 5,
        }
    }
}

impl PairFilter {
    /// Check whether a pair passes the chain and activity filters
    pub fn accepts(&self, pair: &RawPair) -> bool {
        pair.chain_id.as_deref() == Some(self.chain_id.as_str())
            && pair.liquidity_usd.is_some_and(|l| l > self.min_liquidity_usd)
            && pair.volume_24h_usd.is_some_and(|v| v > self.min_volume_24h_usd)
    }
}

/// Rank pairs newest first and map them to candidates.
///
/// `now_ms` is the reference time for `age_ms`.
pub fn rank_pairs(pairs: Vec<RawPair>, filter: &PairFilter, now_ms: i64) -> Vec<TradingPairCandidate> {
    let mut kept: Vec<RawPair> = pairs.into_iter().filter(|p| filter.accepts(p)).collect();

    // sort_by is stable, so equal timestamps keep response order
    kept.sort_by(|a, b| b.created_at_ms.unwrap_or(0).cmp(&a.created_at_ms.unwrap_or(0)));
    kept.truncate(filter.max_results);

    kept.into_iter()
        .map(|p| TradingPairCandidate {
            name: p.name,
            symbol: p.symbol,
            price_usd: p.price_usd,
            // accepts() guarantees both are present
            liquidity_usd: p.liquidity_usd.unwrap_or_default(),
            volume_24h_usd: p.volume_24h_usd.unwrap_or_default(),
            // Out-of-range upstream timestamps read as unknown age
            age_ms: p.created_at_ms.and_then(|created| now_ms.checked_sub(created)),
            url: p.url,
        })
        .collect()
}
