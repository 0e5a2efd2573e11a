//! BulkAmmo Adapter
//!
//! "Supply Watch": lowest listed price per caliber, scraped from HTML.

mod prices;

pub use prices::{
    default_pages, extract_lowest_price, CaliberPage, CommodityPriceAdapter, CommodityPriceConfig,
    DEFAULT_PRICE_SELECTOR,
};
