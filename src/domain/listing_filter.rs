//! Listing Filter
//!
//! Turns raw forum links into "Gear Sniper" hits: drops navigation noise,
//! keeps keyword matches, dedups by URL and caps the result.

use std::collections::HashSet;
use reqwest::Url;

use super::records::MarketplaceListing;

/// Pagination controls render as links containing this text
const PAGINATION_MARKER: &str = "Page";

/// A link pulled from one forum row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLink {
    pub title: String,
    pub href: String,
}

impl RawLink {
    pub fn new(title: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            href: href.into(),
        }
    }
}

/// Keyword and noise rules for forum listings
#[derive(Debug, Clone, PartialEq)]
pub struct ListingFilter {
    /// Site origin prepended to relative links
    pub origin: String,
    /// Case-insensitive allowlist
    pub keywords: Vec<String>,
    pub min_title_len: usize,
    pub max_results: usize,
}

impl Default for ListingFilter {
    fn default() -> Self {
        Self {
            origin: "https://www.ar15.com".to_string(),
            keywords: default_keywords(),
            min_title_len: 6,
            max_results: 5,
        }
    }
}

pub fn default_keywords() -> Vec<String> {
    ["EOTech", "Aimpoint", "Trijicon", "RMR", "Surefire", "Modlite", "PVS-14"]
        .iter()
        .map(|k| k.to_string())
        .collect()
}

impl ListingFilter {
    /// True when the title is not navigation noise
    pub fn is_listing_title(&self, title: &str) -> bool {
        !title.is_empty()
            && title.chars().count() >= self.min_title_len
            && !title.contains(PAGINATION_MARKER)
    }

    /// True when the title mentions an allowlisted keyword
    pub fn matches_keyword(&self, title: &str) -> bool {
        let title = title.to_lowercase();
        self.keywords
            .iter()
            .any(|k| title.contains(&k.to_lowercase()))
    }

    /// Resolve a forum href against the configured origin.
    ///
    /// Absolute, protocol-relative and relative hrefs are all joined the way
    /// a browser would; `None` when the origin or href cannot form a URL.
    pub fn absolute_url(&self, href: &str) -> Option<String> {
        let base = Url::parse(&self.origin).ok()?;
        base.join(href).ok().map(String::from)
    }

    /// Apply noise, keyword, dedup and cap rules in page order
    pub fn apply(&self, links: Vec<RawLink>) -> Vec<MarketplaceListing> {
        let mut seen = HashSet::new();

        links
            .into_iter()
            .filter(|l| !l.href.is_empty() && self.is_listing_title(&l.title))
            .filter(|l| self.matches_keyword(&l.title))
            .filter_map(|l| {
                let url = self.absolute_url(&l.href)?;
                Some(MarketplaceListing::new(l.title, url))
            })
            .filter(|listing| seen.insert(listing.url.clone()))
            .take(self.max_results)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECTION: &str = "/forums/Equipment-Exchange/Optics/163";

    fn link(title: &str, id: u32) -> RawLink {
        RawLink::new(title, format!("{}/{}/", SECTION, id))
    }

    #[test]
    fn test_keyword_rows_kept_in_order() {
        let links = vec![
            link("Aimpoint T2 For Sale", 1),
            link("Random Off Topic Post", 2),
            link("PVS-14 gen3 white phosphor", 3),
        ];

        let listings = ListingFilter::default().apply(links);

        let titles: Vec<&str> = listings.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["Aimpoint T2 For Sale", "PVS-14 gen3 white phosphor"]);
        assert_eq!(
            listings[0].url,
            "https://www.ar15.com/forums/Equipment-Exchange/Optics/163/1/"
        );
    }

    #[test]
    fn test_keyword_match_ignores_case() {
        let filter = ListingFilter::default();
        assert!(filter.matches_keyword("WTS eotech exps3"));
        assert!(filter.matches_keyword("surefire M600DF scout"));
        assert!(!filter.matches_keyword("Vortex Razor 1-6"));
    }

    #[test]
    fn test_noise_excluded_even_with_keyword() {
        let links = vec![
            link("RMR", 1),
            link("Aimpoint Page 2", 2),
            link("", 3),
            RawLink::new("Trijicon ACOG TA31", ""),
        ];

        assert!(ListingFilter::default().apply(links).is_empty());
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let links = vec![
            link("Modlite OKW head", 7),
            link("Modlite OKW head (bump)", 7),
            link("Trijicon SRO", 8),
        ];

        let listings = ListingFilter::default().apply(links);

        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].title, "Modlite OKW head");
        let urls: HashSet<&str> = listings.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(urls.len(), listings.len());
    }

    #[test]
    fn test_capped_at_max_results() {
        let links = (0..9).map(|i| link(&format!("Aimpoint lot #{}", i), i)).collect();
        let listings = ListingFilter::default().apply(links);
        assert_eq!(listings.len(), 5);
        assert_eq!(listings[4].title, "Aimpoint lot #4");
    }

    #[test]
    fn test_absolute_urls_kept() {
        let filter = ListingFilter::default();
        assert_eq!(
            filter.absolute_url("https://other.example/forums/Equipment-Exchange/x").as_deref(),
            Some("https://other.example/forums/Equipment-Exchange/x")
        );
        assert_eq!(filter.absolute_url("/a").as_deref(), Some("https://www.ar15.com/a"));
    }

    #[test]
    fn test_protocol_relative_and_dotted_hrefs_resolve() {
        let filter = ListingFilter::default();
        assert_eq!(
            filter.absolute_url("//www.ar15.com/forums/Equipment-Exchange/X/163/1/").as_deref(),
            Some("https://www.ar15.com/forums/Equipment-Exchange/X/163/1/")
        );
        assert_eq!(
            filter.absolute_url("../forums/Equipment-Exchange/X/163/1/").as_deref(),
            Some("https://www.ar15.com/forums/Equipment-Exchange/X/163/1/")
        );
        assert_eq!(
            filter.absolute_url("forums/Equipment-Exchange/X/163/1/").as_deref(),
            Some("https://www.ar15.com/forums/Equipment-Exchange/X/163/1/")
        );
    }

    #[test]
    fn test_href_forms_dedup_to_one_listing() {
        let thread = "/forums/Equipment-Exchange/X/163/1/";
        let links = vec![
            RawLink::new("Aimpoint T2 For Sale", thread),
            RawLink::new("Aimpoint T2 For Sale", format!("//www.ar15.com{}", thread)),
            RawLink::new("Aimpoint T2 For Sale", format!("..{}", thread)),
            RawLink::new("Aimpoint T2 For Sale", format!("https://www.ar15.com{}", thread)),
        ];

        let listings = ListingFilter::default().apply(links);
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].url, "https://www.ar15.com/forums/Equipment-Exchange/X/163/1/");
    }

    #[test]
    fn test_unusable_origin_drops_links() {
        let filter = ListingFilter {
            origin: "not a url".to_string(),
            ..ListingFilter::default()
        };
        assert!(filter.absolute_url("/a").is_none());
        assert!(filter.apply(vec![link("Aimpoint T2 For Sale", 1)]).is_empty());
    }

    #[test]
    fn test_title_length_boundary() {
        let filter = ListingFilter::default();
        assert!(!filter.is_listing_title("RMR T"));
        assert!(filter.is_listing_title("RMR T2"));
    }
}
