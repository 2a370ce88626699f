//! Contact-Sieve: a polite contact email finder
//!
//! This crate visits a list of organization websites, scans each home page and its
//! same-site contact/about pages for email addresses, ranks the candidates by how
//! likely they are to be the organization's business contact, and records the best
//! two per site in a spreadsheet as it goes.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Contact-Sieve operations
#[derive(Debug, Error)]
pub enum SieveError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid email pattern: {0}")]
    InvalidPattern(String),

    #[error("Invalid domain in config: {0}")]
    InvalidDomain(String),

    #[error("URL list not found: {0}")]
    MissingInput(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Errors raised while retrieving a page
///
/// Every variant is recoverable at the site level: the coordinator moves on to
/// the next strategy, and sub-link fetches simply skip the page.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Render error for {url}: {message}")]
    Render { url: String, message: String },
}

impl FetchError {
    /// Classifies a reqwest error the way the fetcher reports it
    pub fn from_reqwest(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else {
            Self::Http {
                url: url.to_string(),
                source,
            }
        }
    }

    pub fn render(url: &str, message: impl std::fmt::Display) -> Self {
        Self::Render {
            url: url.to_string(),
            message: message.to_string(),
        }
    }
}

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, FetchStrategy};
pub use extract::{RelevanceScorer, ScoreMapping};
pub use output::{EmailSummary, ResultSink, SiteResult};
pub use url::{extract_domain, normalize_seed_url};
