//! Selection of the same-site pages worth a second look

use crate::config::ScoringConfig;
use crate::url::{resolve_link, same_host};
use scraper::{Html, Selector};
use url::Url;

/// Picks the contact/about/team style links on a page
///
/// This is what keeps the crawl to one hop: only anchors whose href mentions a
/// keyword, and only on the exact host of the page, are ever followed.
#[derive(Debug, Clone)]
pub struct LinkFilter {
    keywords: Vec<String>,
}

impl LinkFilter {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            keywords: config
                .link_keywords
                .iter()
                .map(|k| k.to_lowercase())
                .collect(),
        }
    }

    /// Returns the deduplicated relevant links on the page, first-seen order
    ///
    /// # Link Selection Rules
    ///
    /// - The lower-cased href contains one of the keywords
    /// - The href resolves against `base_url` to an HTTP(S) URL
    /// - The resolved host and port are exactly those of `base_url`
    pub fn relevant_links(&self, document: &Html, base_url: &Url) -> Vec<Url> {
        let mut links: Vec<Url> = Vec::new();

        let Ok(a_selector) = Selector::parse("a[href]") else {
            return links;
        };

        for element in document.select(&a_selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };

            let lowered = href.to_lowercase();
            if !self.keywords.iter().any(|k| lowered.contains(k.as_str())) {
                continue;
            }

            match resolve_link(href, base_url) {
                Ok(link) if same_host(&link, base_url) => {
                    if !links.contains(&link) {
                        links.push(link);
                    }
                }
                Ok(link) => tracing::trace!("Skipping off-site link {}", link),
                Err(e) => tracing::trace!("Skipping link {}: {}", href, e),
            }
        }

        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> LinkFilter {
        LinkFilter::new(&ScoringConfig::default())
    }

    fn links(html: &str, base: &str) -> Vec<String> {
        filter()
            .relevant_links(&Html::parse_document(html), &Url::parse(base).unwrap())
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_keyword_links_resolved() {
        let html = r#"
            <a href="/Contact-Us">Contact</a>
            <a href="about.html">About</a>
            <a href="/products">Products</a>
            <a href="https://example.com/our-team">Team</a>
        "#;
        assert_eq!(
            links(html, "https://example.com/home/"),
            vec![
                "https://example.com/Contact-Us",
                "https://example.com/home/about.html",
                "https://example.com/our-team",
            ]
        );
    }

    #[test]
    fn test_other_hosts_excluded() {
        let html = r#"
            <a href="https://facebook.com/acme/about">FB</a>
            <a href="https://help.example.com/">Help center</a>
            <a href="https://www.example.com/contact">WWW contact</a>
            <a href="//cdn.other.net/support">CDN</a>
        "#;
        assert!(links(html, "https://example.com/").is_empty());
    }

    #[test]
    fn test_deduplicated() {
        let html = r#"
            <a href="/contact">Contact</a>
            <a href="https://example.com/contact">Contact again</a>
            <a href="contact">And again</a>
        "#;
        assert_eq!(links(html, "https://example.com/"), vec!["https://example.com/contact"]);
    }

    #[test]
    fn test_non_web_schemes_excluded() {
        let html = r#"
            <a href="mailto:info@example.com">Mail</a>
            <a href="javascript:openSupport()">Support</a>
            <a href="tel:+1-555-help">Call</a>
        "#;
        assert!(links(html, "https://example.com/").is_empty());
    }

    #[test]
    fn test_custom_keywords() {
        let config = ScoringConfig {
            link_keywords: vec!["Kontakt".to_string()],
            ..ScoringConfig::default()
        };
        let filter = LinkFilter::new(&config);
        let document = Html::parse_document(r#"<a href="/kontakt">K</a><a href="/contact">C</a>"#);
        let base = Url::parse("https://firma.de/").unwrap();

        let found = filter.relevant_links(&document, &base);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].path(), "/kontakt");
    }
}
