//! Email extraction from HTML structure
//!
//! Raw text scanning misses addresses that only live in attributes the scanner
//! cannot see cleanly: `mailto:` hrefs with query strings, and image alt text on
//! sites that publish their address as a picture.

use crate::extract::scorer::{RelevanceScorer, ScoreMapping};
use scraper::{Html, Selector};

/// Extracts and scores emails from `mailto:` links and image alt text
pub fn extract_markup_emails(
    document: &Html,
    source_url: &str,
    scorer: &RelevanceScorer,
) -> ScoreMapping {
    let mut emails = ScoreMapping::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(address) = element.value().attr("href").and_then(mailto_address) {
                emails.merge(scorer.score_text(address, source_url));
            }
        }
    }

    if let Ok(img_selector) = Selector::parse("img[alt]") {
        for element in document.select(&img_selector) {
            if let Some(alt) = element.value().attr("alt") {
                emails.merge(scorer.score_text(alt, source_url));
            }
        }
    }

    emails
}

/// Returns the address part of a `mailto:` href, without query parameters
fn mailto_address(href: &str) -> Option<&str> {
    if !href.to_lowercase().starts_with("mailto:") {
        return None;
    }

    let (_, rest) = href.split_once(':')?;
    rest.split('?').next()
}
