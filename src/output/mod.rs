//! Output module for recording results
//!
//! This module handles:
//! - The row type written for every site
//! - The append-only sink interface and its `.xlsx` implementation
//! - Run statistics

pub mod stats;
mod traits;
mod xlsx;

pub use stats::{print_statistics, RunStatistics};
pub use traits::{EmailSummary, OutputError, OutputResult, ResultSink, SiteResult};
pub use xlsx::{XlsxSink, HEADERS};
