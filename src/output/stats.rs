//! Run statistics
//!
//! Counters kept by the coordinator while it walks the URL list, printed once
//! the run is over.

use crate::output::traits::{EmailSummary, SiteResult};
use chrono::{DateTime, Utc};

/// Run statistics summary
#[derive(Debug, Clone)]
pub struct RunStatistics {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Sites that got a row (written or not)
    pub sites_processed: u64,

    /// Sites whose row lists at least one email
    pub sites_with_emails: u64,

    /// Total emails across all rows
    pub emails_reported: u64,

    /// Strategy attempts that ended in an error
    pub strategy_failures: u64,

    /// Times a later strategy had to be tried
    pub fallbacks: u64,

    /// Rows (or the final pass) the sink could not store
    pub sink_failures: u64,
}

impl Default for RunStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl RunStatistics {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            sites_processed: 0,
            sites_with_emails: 0,
            emails_reported: 0,
            strategy_failures: 0,
            fallbacks: 0,
            sink_failures: 0,
        }
    }

    /// Counts one finished site
    pub fn record(&mut self, row: &SiteResult) {
        self.sites_processed += 1;
        if let EmailSummary::Found(emails) = &row.summary {
            self.sites_with_emails += 1;
            self.emails_reported += emails.len() as u64;
        }
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
/// * `output_path` - Where the rows were written
pub fn print_statistics(stats: &RunStatistics, output_path: &str) {
    let elapsed = Utc::now() - stats.started_at;

    println!("\n=== Run Statistics ===\n");
    println!("  Started: {}", stats.started_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("  Duration: {} seconds", elapsed.num_seconds());
    println!("  Sites processed: {}", stats.sites_processed);
    println!("  Sites with emails: {}", stats.sites_with_emails);
    println!("  Fallbacks to browser: {}", stats.fallbacks);
    println!("  Failed fetch attempts: {}", stats.strategy_failures);
    if stats.sink_failures > 0 {
        println!("  Rows not saved: {}", stats.sink_failures);
    }
    println!();
    println!(
        "✅ {} emails found. Results saved continuously to → {}",
        stats.emails_reported, output_path
    );
}
