//! Crawler module for site traversal
//!
//! This module contains the core crawling logic, including:
//! - Link extraction and scope filtering
//! - Selector-based page categorization
//! - Page title capture
//! - Overall crawl coordination

mod categorizer;
mod coordinator;
mod extractor;
mod title;

pub use categorizer::Categorizer;
pub use coordinator::{CrawlSummary, Crawler, StepOutcome};
pub use extractor::LinkExtractor;
pub use title::{clean_title, read_title, MISSING_TITLE};

use crate::config::Config;
use crate::output::FileSink;
use crate::render::{HttpRenderer, Renderer};
use crate::CensusError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Start the HTTP render engine
/// 2. Open the report (and titles) output files, closing the engine if they cannot be opened
/// 3. Traverse the site until the frontier is empty
/// 4. Shut the render engine down
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlSummary)` - Crawl completed successfully
/// * `Err(CensusError)` - The engine could not start or the report could not be written
pub async fn crawl(config: Config) -> Result<CrawlSummary, CensusError> {
    let renderer = HttpRenderer::new(&config.renderer)?;
    crawl_with(&config, renderer).await
}

/// Runs a crawl on an already started render engine
///
/// The engine is closed on every exit path, including output files that
/// cannot be opened.
pub async fn crawl_with<R: Renderer>(
    config: &Config,
    mut renderer: R,
) -> Result<CrawlSummary, CensusError> {
    let sink = match FileSink::from_config(&config.output) {
        Ok(sink) => sink,
        Err(e) => return abort(renderer, e.into()).await,
    };

    let error = match Crawler::new(config, &mut renderer, sink) {
        Ok(crawler) => return crawler.run().await,
        Err(e) => e,
    };
    abort(renderer, error).await
}

/// Shuts the engine down after a setup failure
async fn abort<R: Renderer>(
    mut renderer: R,
    error: CensusError,
) -> Result<CrawlSummary, CensusError> {
    tracing::error!("Crawl setup failed: {}", error);
    if let Err(close_err) = renderer.close().await {
        tracing::error!("Render engine shutdown failed: {}", close_err);
    }
    Err(error)
}
