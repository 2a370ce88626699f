//! Configuration module for Contact-Sieve
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every setting has a default, so a run works with no file.
//!
//! # Example
//!
//! ```no_run
//! use contact_sieve::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sieve.toml")).unwrap();
//! println!("Reporting {} emails per site", config.scoring.top_n);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, FetchConfig, InputConfig, OutputConfig, PacingConfig, RenderConfig, ScoringConfig,
    DEFAULT_EMAIL_PATTERN,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
