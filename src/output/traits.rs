//! Result sink trait and row types
//!
//! This module defines the trait interface for result sinks and the row
//! written for every site.

use std::fmt;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("Workbook error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Failed to read existing workbook: {0}")]
    Read(#[from] calamine::XlsxError),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// What a site's row reports in its Emails column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailSummary {
    /// The best addresses, best first
    Found(Vec<String>),

    /// Candidates existed but none survived ranking
    NoValidEmails,

    /// Nothing email-shaped was found by any strategy
    NoEmailsFound,
}

impl EmailSummary {
    /// The reported addresses; empty for the marker variants
    pub fn emails(&self) -> &[String] {
        match self {
            Self::Found(emails) => emails,
            Self::NoValidEmails | Self::NoEmailsFound => &[],
        }
    }
}

impl fmt::Display for EmailSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found(emails) => write!(f, "{}", emails.join(", ")),
            Self::NoValidEmails => write!(f, "No valid company emails found"),
            Self::NoEmailsFound => write!(f, "No email found"),
        }
    }
}

impl From<&str> for EmailSummary {
    /// Reads back the text of an Emails cell
    fn from(cell: &str) -> Self {
        match cell {
            "No email found" => Self::NoEmailsFound,
            "No valid company emails found" => Self::NoValidEmails,
            _ => Self::Found(
                cell.split(", ")
                    .filter(|email| !email.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
        }
    }
}

/// One output row: a site and what was found for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteResult {
    /// 1-based position in the URL list
    pub index: usize,

    /// The site URL as listed (after scheme normalization)
    pub url: String,

    /// The Emails column
    pub summary: EmailSummary,
}

/// Append-only destination for site rows
///
/// Each `append` must leave the row durably stored before it returns, so an
/// interrupted run keeps everything written so far.
pub trait ResultSink: Send {
    /// Stores one row
    fn append(&mut self, row: &SiteResult) -> OutputResult<()>;

    /// Final pass after the last row (formatting, flushing)
    fn finish(&mut self) -> OutputResult<()> {
        Ok(())
    }
}
