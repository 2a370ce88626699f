//! Headless browser fallback strategy
//!
//! Some sites only put their contact details on the page from JavaScript. When
//! the plain fetch comes back empty or fails, this strategy launches a headless
//! Chromium, lets each page settle, and mines the rendered DOM the same way.

use crate::config::RenderConfig;
use crate::crawler::strategy::{Extractors, FetchStrategy};
use crate::extract::ScoreMapping;
use crate::FetchError;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures_util::stream::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use url::Url;

/// Command-line switches passed to Chromium
pub fn browser_args(user_agent: &str) -> Vec<String> {
    vec![
        "--disable-dev-shm-usage".to_string(),
        "--log-level=3".to_string(),
        format!("--user-agent={}", user_agent),
    ]
}

/// One running browser process
///
/// A session belongs to a single strategy invocation. Callers must await
/// [`RenderSession::close`] on every path once launch succeeded.
pub struct RenderSession {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl RenderSession {
    /// Launches a headless browser and starts its event loop
    pub async fn launch(config: &RenderConfig, user_agent: &str) -> Result<Self, String> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .args(browser_args(user_agent))
            .request_timeout(Duration::from_secs(config.navigation_timeout_secs));
        if let Some(path) = &config.executable_path {
            builder = builder.chrome_executable(path);
        }
        let browser_config = builder.build()?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| e.to_string())?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok(Self { browser, handler })
    }

    /// Opens a blank tab
    pub async fn new_tab(&self) -> Result<Page, String> {
        self.browser
            .new_page("about:blank")
            .await
            .map_err(|e| e.to_string())
    }

    /// Shuts the browser down and stops the event loop
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::warn!("Failed to close browser cleanly: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            tracing::debug!("Browser process did not exit cleanly: {}", e);
        }
        self.handler.abort();
    }
}

/// Navigates a tab, waits for scripts to settle, and returns the rendered HTML
async fn render(page: &Page, url: &Url, settle: Duration) -> Result<String, FetchError> {
    page.goto(url.as_str())
        .await
        .map_err(|e| FetchError::render(url.as_str(), e))?;
    tokio::time::sleep(settle).await;
    page.content()
        .await
        .map_err(|e| FetchError::render(url.as_str(), e))
}

/// The browser strategy: full rendering, used as a fallback
pub struct RenderedStrategy {
    config: RenderConfig,
    user_agent: String,
    extractors: Arc<Extractors>,
}

impl RenderedStrategy {
    pub fn new(config: RenderConfig, user_agent: String, extractors: Arc<Extractors>) -> Self {
        Self {
            config,
            user_agent,
            extractors,
        }
    }

    async fn harvest(
        &self,
        session: &RenderSession,
        url: &Url,
    ) -> Result<ScoreMapping, FetchError> {
        let page = session
            .new_tab()
            .await
            .map_err(|e| FetchError::render(url.as_str(), e))?;

        let body = render(&page, url, Duration::from_millis(self.config.settle_ms)).await?;
        let landing = self.extractors.landing_page(&body, url);
        let mut emails = landing.emails;

        let link_settle = Duration::from_millis(self.config.link_settle_ms);
        for link in &landing.links {
            match render(&page, link, link_settle).await {
                Ok(body) => emails.merge(self.extractors.linked_page(&body, link)),
                Err(e) => tracing::debug!("Skipping linked page: {}", e),
            }
        }

        Ok(emails)
    }
}

#[async_trait]
impl FetchStrategy for RenderedStrategy {
    fn name(&self) -> &'static str {
        "rendered"
    }

    /// Never returns `Err`: launch and navigation failures are logged and
    /// reported as an empty mapping.
    async fn fetch(&self, url: &Url) -> Result<ScoreMapping, FetchError> {
        let session = match RenderSession::launch(&self.config, &self.user_agent).await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Browser method failed for {}: {}", url, e);
                return Ok(ScoreMapping::new());
            }
        };

        let outcome = self.harvest(&session, url).await;
        session.close().await;

        match outcome {
            Ok(emails) => Ok(emails),
            Err(e) => {
                tracing::warn!("Browser method failed for {}: {}", url, e);
                Ok(ScoreMapping::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_args_carry_user_agent() {
        let args = browser_args("Mozilla/5.0");
        assert!(args.contains(&"--user-agent=Mozilla/5.0".to_string()));
        assert!(args.contains(&"--disable-dev-shm-usage".to_string()));
    }

    fn strategy(config: RenderConfig) -> RenderedStrategy {
        let extractors = Extractors::new(&crate::config::ScoringConfig::default()).unwrap();
        RenderedStrategy::new(config, "Mozilla/5.0".to_string(), Arc::new(extractors))
    }

    #[test]
    fn test_strategy_name() {
        assert_eq!(strategy(RenderConfig::default()).name(), "rendered");
    }

    #[tokio::test]
    async fn test_launch_failure_yields_empty_mapping() {
        let config = RenderConfig {
            executable_path: Some("/nonexistent/chromium".to_string()),
            ..RenderConfig::default()
        };
        let url = Url::parse("http://127.0.0.1:9/").unwrap();

        let emails = strategy(config).fetch(&url).await.unwrap();
        assert!(emails.is_empty());
    }
}
