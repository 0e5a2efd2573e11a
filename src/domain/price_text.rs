//! Price Text Parsing
//!
//! Retail pages format prices inconsistently ("$199.99", "$1,049.00",
//! "As low as $0.29"). Display text is what gets published; the numeric
//! value is only used to double-check the upstream sort order.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Extract the first numeric amount from a price label
pub fn parse_price(text: &str) -> Option<Decimal> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let digits: String = text[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .filter(|c| *c != ',')
        .collect();

    Decimal::from_str(digits.trim_end_matches('.')).ok()
}

/// Outcome of picking the cheapest label on a server-sorted page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LowestPrice<'a> {
    /// Label to publish
    pub text: &'a str,
    /// True when the numeric minimum was not the first label on the page
    pub reordered: bool,
}

/// Pick the cheapest of a page's price labels.
///
/// Labels that parse are compared numerically (first one wins on ties).
/// When none parse, the first non-empty label is trusted as-is.
pub fn lowest_price<'a, I>(labels: I) -> Option<LowestPrice<'a>>
where
    I: IntoIterator<Item = &'a str>,
{
    let labels: Vec<&str> = labels
        .into_iter()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    let first = *labels.first()?;

    let mut best: Option<(Decimal, &str)> = None;
    for label in &labels {
        if let Some(value) = parse_price(label) {
            if best.map_or(true, |(lowest, _)| value < lowest) {
                best = Some((value, *label));
            }
        }
    }

    Some(match best {
        Some((_, text)) => LowestPrice {
            text,
            reordered: text != first,
        },
        None => LowestPrice {
            text: first,
            reordered: false,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_common_formats() {
        assert_eq!(parse_price("$199.99"), Some(dec!(199.99)));
        assert_eq!(parse_price("$1,049.00"), Some(dec!(1049.00)));
        assert_eq!(parse_price("As low as $0.29 /rd"), Some(dec!(0.29)));
        assert_eq!(parse_price("$409."), Some(dec!(409)));
        assert_eq!(parse_price("Call for price"), None);
        assert_eq!(parse_price(""), None);
    }

    #[test]
    fn test_server_sorted_page_keeps_first() {
        let picked = lowest_price(["$199.99", "$215.00", "$240.50"]).unwrap();
        assert_eq!(picked.text, "$199.99");
        assert!(!picked.reordered);
    }

    #[test]
    fn test_unsorted_page_is_resorted() {
        let picked = lowest_price(["$442.00", "$1,200.00", "$409.99"]).unwrap();
        assert_eq!(picked.text, "$409.99");
        assert!(picked.reordered);
    }

    #[test]
    fn test_unparseable_labels_trust_first() {
        let picked = lowest_price(["  Sold out ", "Call"]).unwrap();
        assert_eq!(picked.text, "Sold out");
        assert!(!picked.reordered);
    }

    #[test]
    fn test_empty_labels() {
        assert!(lowest_price(["", "   "]).is_none());
        assert!(lowest_price(Vec::<&str>::new()).is_none());
    }
}
