//! Output module for crawl reports
//!
//! This module handles:
//! - Building the report snapshot from crawl state
//! - Formatting it as markdown
//! - Rewriting the report (and optional titles CSV) after every iteration

mod file;
mod report;
mod traits;

pub use file::{render_titles_csv, FileSink};
pub use report::{Report, ReportSection, INCOMPLETE_SECTION};
pub use traits::{OutputError, OutputResult, ReportSink};
