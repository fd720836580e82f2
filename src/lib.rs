//! Site-Census: a documentation site surveyor
//!
//! This crate crawls a documentation site from a single entrypoint, visits
//! every same-site page exactly once, sorts each page into a category using
//! DOM selector rules, and keeps a running report of what it found.

pub mod config;
pub mod crawler;
pub mod output;
pub mod render;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Site-Census operations
///
/// Only fatal conditions end up here. Per-page fetch, extraction and
/// selector failures are absorbed by the crawl loop.
#[derive(Debug, Error)]
pub enum CensusError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Render engine error: {0}")]
    Render(#[from] RenderError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid category rule: {0}")]
    InvalidCategory(String),
}

/// Errors raised by the page-rendering capability
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to start render engine: {0}")]
    Launch(String),

    #[error("Navigation to {url} timed out")]
    Timeout { url: String },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Expected HTML from {url}, got '{content_type}'")]
    NotHtml { url: String, content_type: String },

    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("Page is not queryable: {0}")]
    Detached(String),
}

impl RenderError {
    /// Returns true if this error means the target could not be fetched
    ///
    /// Fetch failures are recorded against the target; every other variant
    /// concerns the engine or a single DOM query.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. }
                | Self::Network { .. }
                | Self::Status { .. }
                | Self::NotHtml { .. }
        )
    }
}

/// Result type alias for Site-Census operations
pub type Result<T> = std::result::Result<T, CensusError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for render operations
pub type RenderResult<T> = std::result::Result<T, RenderError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Crawler, CrawlSummary};
pub use state::{Bucket, CategoryId, CrawlPhase, CrawlState};
pub use crate::url::{normalize_url, TargetId};
