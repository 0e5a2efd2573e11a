//! DexScreener API types
//!
//! Every field is optional: the search endpoint omits substructures for
//! young or thin pairs, and a missing field must exclude the pair rather
//! than fail the whole response.

use serde::Deserialize;

use crate::domain::RawPair;

/// One entry of `GET /latest/dex/search` `pairs`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DexPair {
    pub chain_id: Option<String>,
    pub dex_id: Option<String>,
    pub url: Option<String>,
    pub pair_address: Option<String>,
    pub base_token: Option<DexToken>,
    pub price_usd: Option<String>,
    pub liquidity: Option<DexLiquidity>,
    pub volume: Option<DexVolume>,
    /// Unix milliseconds
    pub pair_created_at: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DexToken {
    pub address: Option<String>,
    pub name: Option<String>,
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DexLiquidity {
    pub usd: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DexVolume {
    pub h24: Option<f64>,
}

impl DexPair {
    /// Convert to a rankable pair; `None` when the pair has no token or URL
    pub fn into_raw(self) -> Option<RawPair> {
        let token = self.base_token?;
        Some(RawPair {
            chain_id: self.chain_id,
            name: token.name.unwrap_or_default(),
            symbol: token.symbol?,
            price_usd: self.price_usd,
            liquidity_usd: self.liquidity.and_then(|l| l.usd),
            volume_24h_usd: self.volume.and_then(|v| v.h24),
            created_at_ms: self.pair_created_at,
            url: self.url?,
        })
    }
}
