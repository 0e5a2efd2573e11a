//! Forum Adapter
//!
//! "Gear Sniper": keyword-matched classifieds from the AR15.com optics
//! exchange.

mod listings;

pub use listings::{
    extract_row_links, MarketplaceConfig, MarketplaceListingAdapter, DEFAULT_PAGE_URL, DEFAULT_SECTION_PREFIX,
};
