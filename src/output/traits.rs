//! Output sink trait and error types

use crate::output::report::Report;
use crate::state::PageRecord;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to format output: {0}")]
    Format(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for the running crawl report
///
/// The crawl calls [`ReportSink::publish`] after every iteration with the
/// complete current snapshot. Implementations replace what they wrote
/// before; nothing is appended.
pub trait ReportSink {
    /// Persists the latest report and the pages visited so far
    fn publish(&mut self, report: &Report, pages: &[PageRecord]) -> OutputResult<()>;
}

impl<S: ReportSink + ?Sized> ReportSink for &mut S {
    fn publish(&mut self, report: &Report, pages: &[PageRecord]) -> OutputResult<()> {
        (**self).publish(report, pages)
    }
}
