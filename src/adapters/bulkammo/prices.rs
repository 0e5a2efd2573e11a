//! Supply Watch Price Scraper
//!
//! Reads the cheapest listing per caliber from BulkAmmo category pages.
//! Pages are requested sorted by cost per round; the adapter still compares
//! the parsed values so an ignored sort parameter cannot go unnoticed.
//!
//! Each caliber is isolated: a failed page yields `ERR` for that caliber
//! and the rest of the batch is unaffected.

use std::sync::Arc;
use async_trait::async_trait;
use futures::future::join_all;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::adapters::scrape::{compile, element_text, InvalidSelector};
use crate::domain::{lowest_price, Caliber, CommodityPrice, CommodityPrices};
use crate::ports::{FetchError, FetchErrorKind, HttpSource, SourceAdapter};

pub const SOURCE_NAME: &str = "ammo";

/// Magento product grid price label
pub const DEFAULT_PRICE_SELECTOR: &str = ".price-box .price";

/// One category page to scrape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaliberPage {
    pub caliber: Caliber,
    pub url: String,
}

impl CaliberPage {
    pub fn new(caliber: Caliber, url: impl Into<String>) -> Self {
        Self {
            caliber,
            url: url.into(),
        }
    }
}

/// Category pages sorted ascending by cost per round
pub fn default_pages() -> Vec<CaliberPage> {
    vec![
        CaliberPage::new(
            Caliber::NineMm,
            "https://www.bulkammo.com/handgun/bulk-9mm-ammo?dir=asc&order=cost_per_round",
        ),
        CaliberPage::new(
            Caliber::FiveFiftySix,
            "https://www.bulkammo.com/rifle/bulk-5.56x45-ammo?dir=asc&order=cost_per_round",
        ),
        CaliberPage::new(
            Caliber::TwoTwentyThree,
            "https://www.bulkammo.com/rifle/bulk-.223-ammo?dir=asc&order=cost_per_round",
        ),
    ]
}

/// Scraper configuration
#[derive(Debug, Clone)]
pub struct CommodityPriceConfig {
    pub price_selector: String,
    pub pages: Vec<CaliberPage>,
}

impl Default for CommodityPriceConfig {
    fn default() -> Self {
        Self {
            price_selector: DEFAULT_PRICE_SELECTOR.to_string(),
            pages: default_pages(),
        }
    }
}

/// BulkAmmo-backed "Supply Watch"
#[derive(Clone)]
pub struct CommodityPriceAdapter {
    pages: Vec<CaliberPage>,
    price_selector: Selector,
    http: Arc<dyn HttpSource>,
}

impl CommodityPriceAdapter {
    pub fn new(config: CommodityPriceConfig, http: Arc<dyn HttpSource>) -> Result<Self, InvalidSelector> {
        Ok(Self {
            price_selector: compile(&config.price_selector)?,
            pages: config.pages,
            http,
        })
    }

    /// Fetch every configured caliber; never fails as a whole
    pub async fn fetch_prices(&self) -> CommodityPrices {
        let prices = join_all(self.pages.iter().map(|page| self.fetch_caliber(page))).await;

        let prices = CommodityPrices(prices);
        info!(
            source = SOURCE_NAME,
            calibers = prices.len(),
            errors = prices.error_count(),
            "Price scrape complete"
        );
        prices
    }

    async fn fetch_caliber(&self, page: &CaliberPage) -> CommodityPrice {
        debug!(source = SOURCE_NAME, caliber = %page.caliber, url = %page.url, "Fetching category page");

        match self.lowest_on_page(page).await {
            Ok(price_text) => CommodityPrice {
                caliber: page.caliber,
                price_text,
            },
            Err(e) => {
                warn!(source = SOURCE_NAME, caliber = %page.caliber, error = %e, "Caliber price unavailable");
                CommodityPrice::failed(page.caliber)
            }
        }
    }

    async fn lowest_on_page(&self, page: &CaliberPage) -> Result<String, FetchErrorKind> {
        let body = self.http.get_text(&page.url).await?;
        extract_lowest_price(&body, &self.price_selector, page.caliber)
    }
}

#[async_trait]
impl SourceAdapter for CommodityPriceAdapter {
    type Output = CommodityPrices;

    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    async fn fetch(&self) -> Result<Self::Output, FetchError> {
        Ok(self.fetch_prices().await)
    }
}

/// Cheapest price label on a category page
pub fn extract_lowest_price(html: &str, selector: &Selector, caliber: Caliber) -> Result<String, FetchErrorKind> {
    let document = Html::parse_document(html);
    let labels: Vec<String> = document
        .select(selector)
        .map(|element| element_text(&element))
        .collect();

    let picked = lowest_price(labels.iter().map(String::as_str))
        .ok_or_else(|| FetchErrorKind::Parse("no price element matched".to_string()))?;

    if picked.reordered {
        warn!(
            source = SOURCE_NAME,
            caliber = %caliber,
            first = %labels[0],
            lowest = picked.text,
            "Page was not sorted by price; using client-side minimum"
        );
    }

    Ok(picked.text.to_string())
}
