//! The fetch strategy seam
//!
//! The coordinator holds an ordered list of strategies and asks each in turn
//! until one returns a non-empty mapping.

use crate::config::ScoringConfig;
use crate::extract::{extract_page, LinkFilter, PageExtract, RelevanceScorer, ScoreMapping};
use crate::{ConfigError, FetchError};
use async_trait::async_trait;
use url::Url;

/// A way of turning a site URL into scored emails
#[async_trait]
pub trait FetchStrategy: Send + Sync {
    /// Short name used in log lines
    fn name(&self) -> &'static str;

    /// Visits the site and its relevant same-site pages
    ///
    /// # Returns
    ///
    /// * `Ok(ScoreMapping)` - Everything found, possibly empty
    /// * `Err(FetchError)` - The landing page itself could not be retrieved
    async fn fetch(&self, url: &Url) -> Result<ScoreMapping, FetchError>;
}

/// Scorer and link filter shared by every strategy
#[derive(Debug, Clone)]
pub struct Extractors {
    pub scorer: RelevanceScorer,
    pub link_filter: LinkFilter,
}

impl Extractors {
    pub fn new(config: &ScoringConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            scorer: RelevanceScorer::new(config)?,
            link_filter: LinkFilter::new(config),
        })
    }

    /// Extracts emails and follow-up links from a landing page
    pub fn landing_page(&self, body: &str, url: &Url) -> PageExtract {
        extract_page(body, url, &self.scorer, Some(&self.link_filter))
    }

    /// Extracts emails from a followed page
    pub fn linked_page(&self, body: &str, url: &Url) -> ScoreMapping {
        extract_page(body, url, &self.scorer, None).emails
    }
}
