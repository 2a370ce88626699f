use crate::config::types::{Config, FetchConfig, OutputConfig, RenderConfig, ScoringConfig};
use crate::ConfigError;
use regex::Regex;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_paths(config)?;
    validate_fetch_config(&config.fetch)?;
    validate_render_config(&config.render)?;
    validate_scoring_config(&config.scoring)?;
    Ok(())
}

/// Validates input and output paths
fn validate_paths(config: &Config) -> Result<(), ConfigError> {
    if config.input.urls_path.is_empty() {
        return Err(ConfigError::Validation(
            "urls_path cannot be empty".to_string(),
        ));
    }

    validate_output_config(&config.output)
}

fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.xlsx_path.is_empty() {
        return Err(ConfigError::Validation(
            "xlsx_path cannot be empty".to_string(),
        ));
    }

    // Excel caps sheet names at 31 characters
    if config.sheet_name.is_empty() || config.sheet_name.chars().count() > 31 {
        return Err(ConfigError::Validation(format!(
            "sheet_name must be 1 to 31 characters, got '{}'",
            config.sheet_name
        )));
    }

    Ok(())
}

/// Validates HTTP fetch configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.link_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "link_timeout_secs must be >= 1, got {}",
            config.link_timeout_secs
        )));
    }

    Ok(())
}

/// Validates browser fallback configuration
fn validate_render_config(config: &RenderConfig) -> Result<(), ConfigError> {
    if !config.enabled {
        return Ok(());
    }

    if config.navigation_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "navigation_timeout_secs must be >= 1, got {}",
            config.navigation_timeout_secs
        )));
    }

    if config
        .executable_path
        .as_deref()
        .is_some_and(|path| path.trim().is_empty())
    {
        return Err(ConfigError::Validation(
            "executable_path cannot be empty when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates scoring configuration
fn validate_scoring_config(config: &ScoringConfig) -> Result<(), ConfigError> {
    Regex::new(&config.email_pattern)
        .map_err(|e| ConfigError::InvalidPattern(format!("{}: {}", config.email_pattern, e)))?;

    if config.top_n < 1 {
        return Err(ConfigError::Validation(
            "top_n must be at least 1".to_string(),
        ));
    }

    for domain in &config.blacklist_domains {
        validate_domain_string(domain)?;
    }

    if config.link_keywords.iter().any(|k| k.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "link_keywords cannot contain empty entries".to_string(),
        ));
    }

    Ok(())
}

/// Validates a blacklisted email domain
///
/// Entries are compared against the text after `@` in a lower-cased address,
/// so an entry holding `@` or whitespace could never match.
fn validate_domain_string(domain: &str) -> Result<(), ConfigError> {
    if domain.is_empty() || domain.contains('@') || domain.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidDomain(format!(
            "'{}' is not an email domain",
            domain
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::InvalidDomain(format!(
            "Domain '{}' must contain at least one dot (e.g., 'example.com')",
            domain
        )));
    }

    Ok(())
}
