//! DexScreener Adapter
//!
//! "Alpha Radar": newest liquid pairs from DexScreener pair search.

pub mod scanner;
mod types;

pub use scanner::{parse_search_response, TokenScanAdapter, TokenScanConfig, DEX_SEARCH_API};
pub use types::{DexLiquidity, DexPair, DexToken, DexVolume};
