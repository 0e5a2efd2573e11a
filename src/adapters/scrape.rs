//! HTML Scraping Helpers
//!
//! Selector compilation and text extraction shared by the HTML adapters.
//! Selectors come from configuration, so compile failures are reported as
//! values rather than panics.

use scraper::{ElementRef, Selector};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid CSS selector '{selector}': {reason}")]
pub struct InvalidSelector {
    pub selector: String,
    pub reason: String,
}

/// Compile a configured CSS selector
pub fn compile(selector: &str) -> Result<Selector, InvalidSelector> {
    if selector.trim().is_empty() {
        return Err(InvalidSelector {
            selector: selector.to_string(),
            reason: "selector is empty".to_string(),
        });
    }

    Selector::parse(selector).map_err(|e| InvalidSelector {
        selector: selector.to_string(),
        reason: format!("{:?}", e),
    })
}

/// Visible text of an element, whitespace-collapsed
pub fn element_text(element: &ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
