//! URL handling module for Contact-Sieve
//!
//! This module provides URL list loading, seed normalization, link resolution,
//! and host comparison.

mod domain;
mod normalize;

use crate::ConfigError;
use std::path::Path;

// Re-export main functions
pub use domain::{extract_domain, same_host, site_domain};
pub use normalize::{normalize_seed_url, resolve_link, with_scheme};

/// Loads the newline-delimited list of sites to visit
///
/// Blank lines are skipped. Lines without a web scheme get `http://` prepended;
/// no other validation happens here, so a malformed line still gets a row in the
/// results.
///
/// # Returns
///
/// * `Ok(Vec<String>)` - The site URLs in file order
/// * `Err(ConfigError::MissingInput)` - The file does not exist
/// * `Err(ConfigError::Io)` - The file exists but could not be read
pub fn load_url_list(path: &Path) -> Result<Vec<String>, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::MissingInput(format!(
            "'{}' not found. Create it with one URL per line.",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path)?;
    Ok(parse_url_list(&content))
}

/// Parses URL list content; see [`load_url_list`]
pub fn parse_url_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let normalized = with_scheme(line);
            if normalized != line {
                tracing::info!("Normalizing URL: {}", normalized);
            }
            normalized
        })
        .collect()
}
