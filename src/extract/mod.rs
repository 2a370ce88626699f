//! Email discovery over fetched pages
//!
//! This module contains everything that looks at page content:
//! - Email token scanning over raw text
//! - Relevance scoring and the per-site score mapping
//! - Markup-aware extraction (mailto links, image alt text)
//! - Selection of same-site links for the one-hop follow-up
//!
//! All of it is synchronous; the fetch strategies call [`extract_page`] once the
//! body is in hand so that no parsed document is held across an `.await`.

mod links;
mod markup;
mod scanner;
mod scorer;

pub use links::LinkFilter;
pub use markup::extract_markup_emails;
pub use scanner::EmailTokenScanner;
pub use scorer::{RelevanceScorer, Rejection, ScoreMapping};

use scraper::Html;
use url::Url;

/// What one page contributed to a site's results
#[derive(Debug, Clone, Default)]
pub struct PageExtract {
    /// Scored emails found in the raw body and in the markup
    pub emails: ScoreMapping,

    /// Same-site links worth following (empty unless a link filter was given)
    pub links: Vec<Url>,
}

/// Extracts emails, and optionally follow-up links, from one page body
///
/// # Arguments
///
/// * `body` - The page source (raw HTTP body or rendered DOM)
/// * `page_url` - The URL the page was requested as; the scoring context
/// * `scorer` - Scorer shared by every page of the site
/// * `link_filter` - Pass `Some` for the landing page only; followed pages are not mined for links
pub fn extract_page(
    body: &str,
    page_url: &Url,
    scorer: &RelevanceScorer,
    link_filter: Option<&LinkFilter>,
) -> PageExtract {
    let document = Html::parse_document(body);

    let mut emails = scorer.score_text(body, page_url.as_str());
    emails.merge(extract_markup_emails(&document, page_url.as_str(), scorer));

    let links = link_filter
        .map(|filter| filter.relevant_links(&document, page_url))
        .unwrap_or_default();

    tracing::debug!(
        "Extracted {} emails and {} links from {}",
        emails.len(),
        links.len(),
        page_url
    );

    PageExtract { emails, links }
}
