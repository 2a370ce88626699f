//! Plain HTTP fetch strategy
//!
//! This module handles the first, cheap attempt at every site:
//! - Building an HTTP client with a browser-like user agent
//! - GET requests with explicit timeouts
//! - Following the landing page's relevant links, best effort
//! - Error classification

use crate::config::FetchConfig;
use crate::crawler::strategy::{Extractors, FetchStrategy};
use crate::extract::ScoreMapping;
use crate::FetchError;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// Certificate validation is off by default: small organization sites with
/// expired or mismatched certificates still publish real contact details.
///
/// # Example
///
/// ```no_run
/// use contact_sieve::config::FetchConfig;
/// use contact_sieve::crawler::build_http_client;
///
/// let client = build_http_client(&FetchConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page body
///
/// # Error Classification
///
/// | Condition | Result |
/// |-----------|--------|
/// | Timeout | `FetchError::Timeout` |
/// | Connection refused, TLS, DNS | `FetchError::Http` |
/// | Non-2xx status | `FetchError::Status` |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
/// * `timeout` - Overrides the client's default timeout when set
pub async fn fetch_body(
    client: &Client,
    url: &Url,
    timeout: Option<Duration>,
) -> Result<String, FetchError> {
    let mut request = client.get(url.clone());
    if let Some(timeout) = timeout {
        request = request.timeout(timeout);
    }

    let response = request
        .send()
        .await
        .map_err(|e| FetchError::from_reqwest(url.as_str(), e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response
        .text()
        .await
        .map_err(|e| FetchError::from_reqwest(url.as_str(), e))
}

/// The plain HTTP strategy: no script execution
pub struct DirectStrategy {
    client: Client,
    link_timeout: Duration,
    extractors: Arc<Extractors>,
}

impl DirectStrategy {
    pub fn new(config: &FetchConfig, extractors: Arc<Extractors>) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(
            build_http_client(config)?,
            Duration::from_secs(config.link_timeout_secs),
            extractors,
        ))
    }

    /// Uses a prebuilt client; the client's own timeout applies to the landing page
    pub fn with_client(
        client: Client,
        link_timeout: Duration,
        extractors: Arc<Extractors>,
    ) -> Self {
        Self {
            client,
            link_timeout,
            extractors,
        }
    }

    async fn fetch_linked_page(&self, link: &Url) -> Result<ScoreMapping, FetchError> {
        let body = fetch_body(&self.client, link, Some(self.link_timeout)).await?;
        Ok(self.extractors.linked_page(&body, link))
    }
}

#[async_trait]
impl FetchStrategy for DirectStrategy {
    fn name(&self) -> &'static str {
        "direct"
    }

    async fn fetch(&self, url: &Url) -> Result<ScoreMapping, FetchError> {
        let body = fetch_body(&self.client, url, None).await?;
        let landing = self.extractors.landing_page(&body, url);
        let mut emails = landing.emails;

        for link in &landing.links {
            match self.fetch_linked_page(link).await {
                Ok(found) => emails.merge(found),
                Err(e) => tracing::debug!("Skipping linked page: {}", e),
            }
        }

        Ok(emails)
    }
}
