use serde::Deserialize;

/// Default email shape: local part, `@`, domain, and a TLD of two or more letters
pub const DEFAULT_EMAIL_PATTERN: &str = r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}";

/// Main configuration structure for Contact-Sieve
///
/// Every section is optional in the TOML file; missing sections fall back to
/// the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub fetch: FetchConfig,
    pub render: RenderConfig,
    pub scoring: ScoringConfig,
    pub pacing: PacingConfig,
}

/// Where the list of sites comes from
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Path to the newline-delimited URL list
    #[serde(rename = "urls-path")]
    pub urls_path: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            urls_path: "urls.txt".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the results workbook
    #[serde(rename = "xlsx-path")]
    pub xlsx_path: String,

    /// Name of the results worksheet
    #[serde(rename = "sheet-name")]
    pub sheet_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            xlsx_path: "extracted_emails.xlsx".to_string(),
            sheet_name: "Email_Results".to_string(),
        }
    }
}

/// Plain HTTP fetch configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Timeout for the initial page request (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Timeout for each followed link (seconds)
    #[serde(rename = "link-timeout-secs")]
    pub link_timeout_secs: u64,

    /// Accept sites with broken or self-signed certificates
    #[serde(rename = "accept-invalid-certs")]
    pub accept_invalid_certs: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0".to_string(),
            timeout_secs: 10,
            link_timeout_secs: 8,
            accept_invalid_certs: true,
        }
    }
}

/// Headless browser fallback configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Whether the browser fallback runs at all
    pub enabled: bool,

    /// Delay after the initial navigation before reading the page (milliseconds)
    #[serde(rename = "settle-ms")]
    pub settle_ms: u64,

    /// Delay after each followed link before reading it (milliseconds)
    #[serde(rename = "link-settle-ms")]
    pub link_settle_ms: u64,

    /// Upper bound on any single browser command (seconds)
    #[serde(rename = "navigation-timeout-secs")]
    pub navigation_timeout_secs: u64,

    /// Chromium binary to launch; found on the system when unset
    #[serde(rename = "executable-path")]
    pub executable_path: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            settle_ms: 3000,
            link_settle_ms: 2000,
            navigation_timeout_secs: 30,
            executable_path: None,
        }
    }
}

/// Email matching and ranking configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Regular expression describing an email-shaped token
    #[serde(rename = "email-pattern")]
    pub email_pattern: String,

    /// Email domains that are never real contacts (trackers, CDNs)
    #[serde(rename = "blacklist-domains")]
    pub blacklist_domains: Vec<String>,

    /// Substrings that mark a link as worth following
    #[serde(rename = "link-keywords")]
    pub link_keywords: Vec<String>,

    /// Number of emails reported per site
    #[serde(rename = "top-n")]
    pub top_n: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            email_pattern: DEFAULT_EMAIL_PATTERN.to_string(),
            blacklist_domains: vec![
                "sentry.wixpress.com".to_string(),
                "cdn.ampproject.org".to_string(),
            ],
            link_keywords: ["contact", "about", "team", "support", "enquiry", "help", "info"]
                .iter()
                .map(|k| k.to_string())
                .collect(),
            top_n: 2,
        }
    }
}

/// Politeness configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Pause after each site before starting the next (milliseconds)
    #[serde(rename = "site-delay-ms")]
    pub site_delay_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            site_delay_ms: 1000,
        }
    }
}
