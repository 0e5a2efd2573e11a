//! CoinGecko Adapter
//!
//! Single-asset USD spot price from the simple price endpoint.

mod spot;

pub use spot::{SpotPriceAdapter, SpotPriceConfig};
