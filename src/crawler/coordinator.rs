//! Crawler coordinator - per-site orchestration
//!
//! This module contains the main loop that walks the URL list, including:
//! - Running each site through the ordered fetch strategies
//! - Reducing the merged score mapping to the reported short-list
//! - Writing one row per site before moving on
//! - Pacing between sites

use crate::config::Config;
use crate::crawler::fetcher::DirectStrategy;
use crate::crawler::renderer::RenderedStrategy;
use crate::crawler::strategy::{Extractors, FetchStrategy};
use crate::extract::ScoreMapping;
use crate::output::{EmailSummary, ResultSink, RunStatistics, SiteResult, XlsxSink};
use crate::url::normalize_seed_url;
use crate::SieveError;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Main coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    strategies: Vec<Box<dyn FetchStrategy>>,
    sink: Box<dyn ResultSink>,
    stats: RunStatistics,
}

impl Coordinator {
    /// Creates a coordinator with the standard strategies and the workbook sink
    ///
    /// The strategy list is Direct, then Rendered unless the browser fallback is
    /// disabled. The workbook is prepared immediately: rows from an earlier run
    /// are kept, and a new file gets its header row. If that fails the run still
    /// goes ahead and each row reports its own save failure.
    pub fn new(config: Config) -> Result<Self, SieveError> {
        let strategies = build_strategies(&config)?;

        let mut sink = XlsxSink::new(&config.output.xlsx_path, &config.output.sheet_name);
        if let Err(e) = sink.prepare() {
            tracing::error!(
                "Failed to prepare workbook {}: {}",
                config.output.xlsx_path,
                e
            );
        }

        Ok(Self::with_parts(config, strategies, Box::new(sink)))
    }

    /// Creates a coordinator from explicit parts
    pub fn with_parts(
        config: Config,
        strategies: Vec<Box<dyn FetchStrategy>>,
        sink: Box<dyn ResultSink>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            strategies,
            sink,
            stats: RunStatistics::new(),
        }
    }

    pub fn statistics(&self) -> &RunStatistics {
        &self.stats
    }

    /// Runs the main loop over the URL list
    ///
    /// Each site is resolved completely, and its row written, before the next
    /// starts. Per-site failures never abort the run.
    pub async fn run(&mut self, urls: &[String]) -> RunStatistics {
        let total = urls.len();
        let delay = Duration::from_millis(self.config.pacing.site_delay_ms);

        for (i, url) in urls.iter().enumerate() {
            tracing::info!("[{}/{}] Scraping: {}", i + 1, total, url);
            self.process_site(i + 1, url).await;

            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        tracing::info!("Done! Polishing final workbook...");
        if let Err(e) = self.sink.finish() {
            tracing::error!("Failed to finalize output: {}", e);
            self.stats.sink_failures += 1;
        }

        self.stats.clone()
    }

    /// Processes one site and hands its row to the sink
    ///
    /// A line that does not parse as a URL still gets a row.
    pub async fn process_site(&mut self, index: usize, raw_url: &str) -> SiteResult {
        let emails = match normalize_seed_url(raw_url) {
            Ok(url) => self.discover(&url).await,
            Err(e) => {
                tracing::warn!("Skipping malformed URL {}: {}", raw_url, e);
                ScoreMapping::new()
            }
        };

        let summary = summarize(&emails, self.config.scoring.top_n);
        match &summary {
            EmailSummary::Found(found) => tracing::info!("Found: {}", found.join(", ")),
            EmailSummary::NoValidEmails => {
                tracing::info!("No valid company emails after filtering")
            }
            EmailSummary::NoEmailsFound => tracing::info!("No emails found"),
        }

        let row = SiteResult {
            index,
            url: raw_url.to_string(),
            summary,
        };
        self.stats.record(&row);

        if let Err(e) = self.sink.append(&row) {
            tracing::error!("Failed to save row {} ({}): {}", index, raw_url, e);
            self.stats.sink_failures += 1;
        }

        row
    }

    /// Tries each strategy in order until one finds something
    pub async fn discover(&mut self, url: &Url) -> ScoreMapping {
        for (position, strategy) in self.strategies.iter().enumerate() {
            if position > 0 {
                self.stats.fallbacks += 1;
            }

            match strategy.fetch(url).await {
                Ok(emails) if !emails.is_empty() => return emails,
                Ok(_) => {
                    tracing::info!("{} method found nothing for {}", strategy.name(), url);
                }
                Err(e) => {
                    tracing::warn!("{} method failed for {}: {}", strategy.name(), url, e);
                    self.stats.strategy_failures += 1;
                }
            }
        }

        ScoreMapping::new()
    }
}

/// Builds the ordered strategy list from configuration
pub fn build_strategies(config: &Config) -> Result<Vec<Box<dyn FetchStrategy>>, SieveError> {
    let extractors = Arc::new(Extractors::new(&config.scoring)?);

    let mut strategies: Vec<Box<dyn FetchStrategy>> = vec![Box::new(DirectStrategy::new(
        &config.fetch,
        Arc::clone(&extractors),
    )?)];

    if config.render.enabled {
        strategies.push(Box::new(RenderedStrategy::new(
            config.render.clone(),
            config.fetch.user_agent.clone(),
            extractors,
        )));
    }

    Ok(strategies)
}

/// Reduces a site's mapping to its reported summary
///
/// Scores are ranked descending with a stable sort, so ties keep first-seen order.
pub fn summarize(emails: &ScoreMapping, top_n: usize) -> EmailSummary {
    if emails.is_empty() {
        return EmailSummary::NoEmailsFound;
    }

    let top = emails.top(top_n);
    if top.is_empty() {
        EmailSummary::NoValidEmails
    } else {
        EmailSummary::Found(top)
    }
}

/// Runs a complete harvest over a URL list
///
/// # Example
///
/// ```no_run
/// use contact_sieve::config::Config;
/// use contact_sieve::crawler::run_harvest;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let urls = vec!["example.com".to_string()];
/// let stats = run_harvest(Config::default(), &urls).await?;
/// println!("{} emails found", stats.emails_reported);
/// # Ok(())
/// # }
/// ```
pub async fn run_harvest(config: Config, urls: &[String]) -> Result<RunStatistics, SieveError> {
    let mut coordinator = Coordinator::new(config)?;
    Ok(coordinator.run(urls).await)
}
