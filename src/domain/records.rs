//! Normalized Records
//!
//! The output shapes each source adapter publishes. Records are built fresh
//! on every fetch and never mutated afterwards.

use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Marker reported for a caliber whose page could not be read
pub const PRICE_ERROR_MARKER: &str = "ERR";

/// A ranked DEX trading pair ("Alpha Radar" row)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingPairCandidate {
    /// Base token name
    pub name: String,
    /// Base token symbol
    pub symbol: String,
    /// Price in USD, kept as the upstream decimal string
    pub price_usd: Option<String>,
    /// Pool liquidity in USD
    pub liquidity_usd: f64,
    /// 24-hour volume in USD
    pub volume_24h_usd: f64,
    /// Milliseconds since the pair was created, if known
    pub age_ms: Option<i64>,
    /// DEX page for the pair
    pub url: String,
}

/// Ammunition category used as the price lookup key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Caliber {
    #[serde(rename = "9mm")]
    NineMm,
    #[serde(rename = "5.56")]
    FiveFiftySix,
    #[serde(rename = ".223")]
    TwoTwentyThree,
}

impl Caliber {
    pub const ALL: [Caliber; 3] = [Caliber::NineMm, Caliber::FiveFiftySix, Caliber::TwoTwentyThree];

    pub fn as_str(&self) -> &'static str {
        match self {
            Caliber::NineMm => "9mm",
            Caliber::FiveFiftySix => "5.56",
            Caliber::TwoTwentyThree => ".223",
        }
    }
}

impl fmt::Display for Caliber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Caliber {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Caliber::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown caliber: {}", s))
    }
}

/// Lowest listed price for one caliber, as display text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommodityPrice {
    pub caliber: Caliber,
    pub price_text: String,
}

impl CommodityPrice {
    pub fn failed(caliber: Caliber) -> Self {
        Self {
            caliber,
            price_text: PRICE_ERROR_MARKER.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.price_text == PRICE_ERROR_MARKER
    }
}

/// One price per configured caliber, in configuration order.
///
/// Serializes as a JSON object keyed by caliber.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommodityPrices(pub Vec<CommodityPrice>);

impl CommodityPrices {
    pub fn get(&self, caliber: Caliber) -> Option<&str> {
        self.0
            .iter()
            .find(|p| p.caliber == caliber)
            .map(|p| p.price_text.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.0.iter().filter(|p| p.is_error()).count()
    }
}

impl Serialize for CommodityPrices {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for price in &self.0 {
            map.serialize_entry(price.caliber.as_str(), &price.price_text)?;
        }
        map.end()
    }
}

/// A forum classified thread matching the keyword allowlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketplaceListing {
    pub title: String,
    pub url: String,
    /// Same as `url`; the dedup key
    pub id: String,
}

impl MarketplaceListing {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            title: title.into(),
            id: url.clone(),
            url,
        }
    }
}

/// Current USD price of a single asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotPrice {
    pub asset: String,
    pub price_usd: f64,
}
