//! Gear Sniper Listing Scanner
//!
//! Scrapes the AR15.com optics classifieds index and keeps threads whose
//! title names an allowlisted brand. The page is table based: each thread
//! is a row whose first section link is the thread title.

use std::sync::Arc;
use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::{debug, info};

use crate::adapters::scrape::{compile, element_text, InvalidSelector};
use crate::domain::{ListingFilter, MarketplaceListing, RawLink};
use crate::ports::{FetchError, HttpSource, SourceAdapter};

pub const SOURCE_NAME: &str = "gear";

pub const DEFAULT_PAGE_URL: &str =
    "https://www.ar15.com/forums/Equipment-Exchange/Optics-Sight-and-Sighting-Equipment-Used-/163/";
pub const DEFAULT_SECTION_PREFIX: &str = "/forums/Equipment-Exchange/";

/// Scanner configuration
#[derive(Debug, Clone)]
pub struct MarketplaceConfig {
    pub page_url: String,
    /// Selector for thread rows
    pub row_selector: String,
    /// Only links whose href contains this prefix are thread links
    pub section_prefix: String,
    pub filter: ListingFilter,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            page_url: DEFAULT_PAGE_URL.to_string(),
            row_selector: "tr".to_string(),
            section_prefix: DEFAULT_SECTION_PREFIX.to_string(),
            filter: ListingFilter::default(),
        }
    }
}

impl MarketplaceConfig {
    /// CSS selector matching thread links inside a row
    pub fn link_selector(&self) -> String {
        format!(r#"a[href*="{}"]"#, self.section_prefix.replace('"', "\\\""))
    }
}

/// AR15.com-backed "Gear Sniper"
#[derive(Clone)]
pub struct MarketplaceListingAdapter {
    page_url: String,
    rows: Selector,
    links: Selector,
    filter: ListingFilter,
    http: Arc<dyn HttpSource>,
}

impl MarketplaceListingAdapter {
    pub fn new(config: MarketplaceConfig, http: Arc<dyn HttpSource>) -> Result<Self, InvalidSelector> {
        Ok(Self {
            rows: compile(&config.row_selector)?,
            links: compile(&config.link_selector())?,
            page_url: config.page_url,
            filter: config.filter,
            http,
        })
    }

    /// Fetch the index page and return matching listings
    pub async fn scan(&self) -> Result<Vec<MarketplaceListing>, FetchError> {
        debug!(source = SOURCE_NAME, url = %self.page_url, "Fetching forum index");

        let body = self
            .http
            .get_text(&self.page_url)
            .await
            .map_err(|e| FetchError::new(SOURCE_NAME, e))?;

        let links = extract_row_links(&body, &self.rows, &self.links);
        let rows = links.len();
        let listings = self.filter.apply(links);

        info!(source = SOURCE_NAME, rows, hits = listings.len(), "Forum scan complete");
        Ok(listings)
    }
}

#[async_trait]
impl SourceAdapter for MarketplaceListingAdapter {
    type Output = Vec<MarketplaceListing>;

    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    async fn fetch(&self) -> Result<Self::Output, FetchError> {
        self.scan().await
    }
}

/// First section link of every row, in page order
pub fn extract_row_links(html: &str, rows: &Selector, links: &Selector) -> Vec<RawLink> {
    let document = Html::parse_document(html);

    document
        .select(rows)
        .filter_map(|row| row.select(links).next())
        .map(|link| RawLink::new(element_text(&link), link.value().attr("href").unwrap_or_default()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::FetchErrorKind;
    use crate::ports::MockHttpSource;

    fn forum_page(rows: &[(&str, &str)]) -> String {
        let body: String = rows
            .iter()
            .map(|(title, href)| {
                format!(
                    r#"<tr><td class="icon"><a href="/members/seller">seller</a></td>
                       <td><a href="{}">{}</a> <a href="{}?page=2">2</a></td><td>12</td></tr>"#,
                    href, title, href
                )
            })
            .collect();
        format!(
            r#"<html><body><table>
               <tr><th>Topic</th><th>Replies</th></tr>
               {}
               <tr><td><a href="/forums/Equipment-Exchange/Optics/163/?page=2">Next Page</a></td></tr>
               </table></body></html>"#,
            body
        )
    }

    fn adapter(body: String) -> MarketplaceListingAdapter {
        let config = MarketplaceConfig::default();
        let mock = MockHttpSource::new().with_body(&config.page_url, body);
        MarketplaceListingAdapter::new(config, Arc::new(mock)).unwrap()
    }

    #[test]
    fn test_link_selector() {
        assert_eq!(
            MarketplaceConfig::default().link_selector(),
            r#"a[href*="/forums/Equipment-Exchange/"]"#
        );
    }

    #[tokio::test]
    async fn test_scan_keeps_keyword_rows_in_order() {
        let page = forum_page(&[
            ("Aimpoint T2 For Sale", "/forums/Equipment-Exchange/Aimpoint-T2/163/1001/"),
            ("Random Off Topic Post", "/forums/Equipment-Exchange/Random/163/1002/"),
            ("PVS-14 gen3 white phosphor", "/forums/Equipment-Exchange/PVS-14/163/1003/"),
        ]);

        let listings = adapter(page).scan().await.unwrap();

        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].title, "Aimpoint T2 For Sale");
        assert_eq!(
            listings[0].url,
            "https://www.ar15.com/forums/Equipment-Exchange/Aimpoint-T2/163/1001/"
        );
        assert_eq!(listings[0].id, listings[0].url);
        assert_eq!(listings[1].title, "PVS-14 gen3 white phosphor");
    }

    #[tokio::test]
    async fn test_scan_dedups_and_caps() {
        let mut rows = vec![
            ("EOTech EXPS3-0", "/forums/Equipment-Exchange/EXPS3/163/1/"),
            ("EOTech EXPS3-0 price drop", "/forums/Equipment-Exchange/EXPS3/163/1/"),
        ];
        let titles: Vec<String> = (2..10).map(|i| format!("Trijicon RMR RM0{}", i)).collect();
        let hrefs: Vec<String> = (2..10).map(|i| format!("/forums/Equipment-Exchange/RMR/163/{}/", i)).collect();
        rows.extend(titles.iter().map(String::as_str).zip(hrefs.iter().map(String::as_str)));

        let listings = adapter(forum_page(&rows)).fetch().await.unwrap();

        assert_eq!(listings.len(), 5);
        assert_eq!(listings[0].title, "EOTech EXPS3-0");
        assert_eq!(listings[1].title, "Trijicon RMR RM02");
        let unique: std::collections::HashSet<&str> = listings.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(unique.len(), 5);
    }

    #[tokio::test]
    async fn test_no_matches_is_empty_not_error() {
        let page = forum_page(&[("Vortex Razor Gen III", "/forums/Equipment-Exchange/Vortex/163/5/")]);
        assert!(adapter(page).scan().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_page_fetch_failure_is_gear_error() {
        let config = MarketplaceConfig::default();
        let mock = MockHttpSource::new().with_error(&config.page_url, FetchErrorKind::Transport("503".into()));
        let adapter = MarketplaceListingAdapter::new(config, Arc::new(mock)).unwrap();

        let err = adapter.scan().await.unwrap_err();
        assert_eq!(err.source_name, "gear");
    }

    #[test]
    fn test_rows_without_section_links_skipped() {
        let html = r#"<table>
            <tr><td><a href="/members/x">Aimpoint lover profile</a></td></tr>
            <tr><td><a href="/forums/Equipment-Exchange/A/1/">Aimpoint PRO</a></td></tr>
        </table>"#;
        let config = MarketplaceConfig::default();
        let rows = compile(&config.row_selector).unwrap();
        let links = compile(&config.link_selector()).unwrap();

        let found = extract_row_links(html, &rows, &links);
        assert_eq!(found, vec![RawLink::new("Aimpoint PRO", "/forums/Equipment-Exchange/A/1/")]);
    }
}
