//! Contact-Sieve main entry point
//!
//! This is the command-line interface for the Contact-Sieve email finder.

use clap::Parser;
use contact_sieve::config::{load_config_with_hash, validate, Config};
use contact_sieve::crawler::run_harvest;
use contact_sieve::output::print_statistics;
use contact_sieve::url::load_url_list;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Contact-Sieve: a polite contact email finder
///
/// Contact-Sieve visits each site in a URL list, looks for email addresses on
/// the home page and its contact/about pages, and saves the two most relevant
/// per site to a spreadsheet, one row at a time.
#[derive(Parser, Debug)]
#[command(name = "contact-sieve")]
#[command(version = "1.0.0")]
#[command(about = "A polite contact email finder", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (all settings have defaults)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Newline-delimited list of site URLs
    #[arg(short, long, value_name = "FILE")]
    input: Option<String>,

    /// Results workbook (.xlsx)
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Pause between sites in milliseconds
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Never fall back to the headless browser
    #[arg(long)]
    no_render: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show which sites would be visited without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match load_configuration(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    let urls = match load_url_list(Path::new(&config.input.urls_path)) {
        Ok(urls) => urls,
        Err(e) => {
            tracing::error!("{}", e);
            return Err(e.into());
        }
    };
    tracing::info!("Loaded {} URLs.", urls.len());

    if cli.dry_run {
        handle_dry_run(&config, &urls);
        return Ok(());
    }

    let output_path = config.output.xlsx_path.clone();
    match run_harvest(config, &urls).await {
        Ok(stats) => {
            print_statistics(&stats, &output_path);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Run failed: {}", e);
            Err(e.into())
        }
    }
}

/// Loads the config file if given, then applies command-line overrides
fn load_configuration(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(input) = &cli.input {
        config.input.urls_path = input.clone();
    }
    if let Some(output) = &cli.output {
        config.output.xlsx_path = output.clone();
    }
    if let Some(delay) = cli.delay_ms {
        config.pacing.site_delay_ms = delay;
    }
    if cli.no_render {
        config.render.enabled = false;
    }

    validate(&config)?;
    Ok(config)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("contact_sieve=info,warn"),
            1 => EnvFilter::new("contact_sieve=debug,info"),
            2 => EnvFilter::new("contact_sieve=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows configuration and the normalized site list
fn handle_dry_run(config: &Config, urls: &[String]) {
    println!("=== Contact-Sieve Dry Run ===\n");

    println!("Input: {}", config.input.urls_path);
    println!(
        "Output: {} (sheet '{}')",
        config.output.xlsx_path, config.output.sheet_name
    );

    println!("\nFetching:");
    println!("  User agent: {}", config.fetch.user_agent);
    println!(
        "  Timeouts: {}s page, {}s linked pages",
        config.fetch.timeout_secs, config.fetch.link_timeout_secs
    );
    println!("  Accept invalid certificates: {}", config.fetch.accept_invalid_certs);
    if config.render.enabled {
        println!(
            "  Browser fallback: on ({}ms settle, {}ms per link)",
            config.render.settle_ms, config.render.link_settle_ms
        );
        if let Some(path) = &config.render.executable_path {
            println!("  Browser executable: {}", path);
        }
    } else {
        println!("  Browser fallback: off");
    }
    println!("  Delay between sites: {}ms", config.pacing.site_delay_ms);

    println!("\nScoring:");
    println!("  Emails per site: {}", config.scoring.top_n);
    println!("  Link keywords: {}", config.scoring.link_keywords.join(", "));
    println!(
        "  Blacklisted domains ({}):",
        config.scoring.blacklist_domains.len()
    );
    for domain in &config.scoring.blacklist_domains {
        println!("  - {}", domain);
    }

    println!("\nSites ({}):", urls.len());
    for (i, url) in urls.iter().enumerate() {
        println!("  [{}] {}", i + 1, url);
    }

    println!("\n✓ Configuration is valid");
}
