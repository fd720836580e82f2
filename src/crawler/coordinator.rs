//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the traversal loop that ties together:
//! - Rendering one target at a time
//! - Categorizing the page and extracting its links
//! - Updating the frontier and visited set
//! - Rewriting the report after every iteration

use crate::config::Config;
use crate::crawler::categorizer::Categorizer;
use crate::crawler::extractor::LinkExtractor;
use crate::crawler::title::read_title;
use crate::output::{Report, ReportSink};
use crate::render::{Renderer, WaitPolicy};
use crate::state::{Bucket, CrawlPhase, CrawlState};
use crate::url::{normalize_url, ScopeFilter, TargetId};
use crate::{CensusError, RenderError};

/// What happened to a single popped target
#[derive(Debug)]
pub enum StepOutcome {
    /// The page rendered and was recorded
    Visited {
        target: TargetId,
        bucket: Bucket,
        /// Targets linked from the page, before deduplication against the frontier
        discovered: usize,
    },

    /// The page could not be fetched and joined the error list
    Failed { target: TargetId, error: RenderError },
}

/// Final tallies of a finished crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlSummary {
    pub visited: usize,
    pub errors: usize,
    /// Target count per bucket, in report order (errors excluded)
    pub buckets: Vec<(String, usize)>,
}

impl CrawlSummary {
    fn from_state(state: &CrawlState) -> Self {
        let buckets = state.buckets();
        Self {
            visited: state.visited().len(),
            errors: state.errors().len(),
            buckets: buckets
                .all()
                .into_iter()
                .filter(Bucket::is_visited)
                .map(|b| (buckets.name(b).to_string(), buckets.get(b).len()))
                .collect(),
        }
    }
}

/// Main crawler structure
///
/// Owns the crawl state, the render engine and the report sink for the
/// duration of one crawl. Targets are processed strictly one at a time.
pub struct Crawler<R: Renderer, S: ReportSink> {
    renderer: R,
    sink: S,
    state: CrawlState,
    extractor: LinkExtractor,
    categorizer: Categorizer,
    wait: WaitPolicy,
    title_suffix: Option<String>,
}

impl<R: Renderer, S: ReportSink> Crawler<R, S> {
    /// Creates a crawler from configuration
    ///
    /// # Arguments
    ///
    /// * `config` - Validated crawler configuration
    /// * `renderer` - An already started render engine
    /// * `sink` - Destination for the running report
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Crawler in the Idle phase, frontier seeded with the entrypoint
    /// * `Err(CensusError)` - The entrypoint is not a valid URL
    pub fn new(config: &Config, renderer: R, sink: S) -> Result<Self, CensusError> {
        let entrypoint = normalize_url(&config.entrypoint_url()?);
        let mut crawler = Self::with_parts(
            entrypoint,
            config.scope_filter(),
            Categorizer::new(config.categories.clone()),
            renderer,
            sink,
        );
        crawler.wait = config.wait_policy();
        crawler.title_suffix = config.renderer.title_suffix.clone();
        Ok(crawler)
    }

    /// Creates a crawler from its individual collaborators
    pub fn with_parts(
        entrypoint: TargetId,
        filter: ScopeFilter,
        categorizer: Categorizer,
        renderer: R,
        sink: S,
    ) -> Self {
        let state = CrawlState::new(entrypoint, categorizer.empty_buckets());
        Self {
            renderer,
            sink,
            state,
            extractor: LinkExtractor::new(filter),
            categorizer,
            wait: WaitPolicy::default(),
            title_suffix: None,
        }
    }

    /// Overrides the wait policy applied to every navigation
    pub fn with_wait_policy(mut self, wait: WaitPolicy) -> Self {
        self.wait = wait;
        self
    }

    pub fn state(&self) -> &CrawlState {
        &self.state
    }

    pub fn phase(&self) -> CrawlPhase {
        self.state.phase()
    }

    /// Builds the current report snapshot
    pub fn report(&self) -> Report {
        Report::build(self.state.buckets(), self.state.frontier())
    }

    /// Runs the crawl until the frontier is empty, then shuts the engine down
    ///
    /// The render engine is closed on every exit path. A fatal error from the
    /// loop takes precedence over a shutdown error.
    pub async fn run(mut self) -> Result<CrawlSummary, CensusError> {
        let result = self.drive().await;
        let closed = self.renderer.close().await;

        match (result, closed) {
            (Ok(summary), Ok(())) => Ok(summary),
            (Ok(_), Err(e)) => Err(e.into()),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(close_err)) => {
                tracing::error!("Render engine shutdown failed: {}", close_err);
                Err(e)
            }
        }
    }

    async fn drive(&mut self) -> Result<CrawlSummary, CensusError> {
        tracing::info!(
            "Starting crawl at {} (scope: {})",
            self.state.frontier().as_slice().last().map(TargetId::as_str).unwrap_or(""),
            self.extractor.filter().scope()
        );

        self.publish()?;

        while self.step().await?.is_some() {}

        let summary = CrawlSummary::from_state(&self.state);
        tracing::info!(
            "Frontier is empty, crawl complete: {} visited, {} errors",
            summary.visited,
            summary.errors
        );
        Ok(summary)
    }

    /// Runs one iteration of the crawl loop
    ///
    /// Returns `Ok(None)` once the frontier is empty. Fetch failures are
    /// recorded and reported as [`StepOutcome::Failed`]; only report
    /// persistence errors are returned as `Err`.
    pub async fn step(&mut self) -> Result<Option<StepOutcome>, CensusError> {
        let Some(target) = self.state.pop_next() else {
            return Ok(None);
        };

        let outcome = self.visit(target).await?;
        self.publish()?;

        match &outcome {
            StepOutcome::Visited {
                target,
                bucket,
                discovered,
            } => tracing::info!(
                "[{}] {} -> {} ({} links, {} remaining)",
                self.state.visited().len(),
                target,
                self.state.buckets().name(*bucket),
                discovered,
                self.state.frontier().len()
            ),
            StepOutcome::Failed { target, error } => tracing::warn!(
                "Failed {}: {} ({} remaining)",
                target,
                error,
                self.state.frontier().len()
            ),
        }

        Ok(Some(outcome))
    }

    /// Renders a target and folds the result into the crawl state
    async fn visit(&mut self, target: TargetId) -> Result<StepOutcome, CensusError> {
        let url = target.to_url()?;

        let page = match self.renderer.goto(&url, &self.wait).await {
            Ok(page) => page,
            Err(error) => {
                if !error.is_fetch_failure() {
                    tracing::error!("Render engine error on {}: {}", target, error);
                }
                self.state.record_failure(target.clone());
                return Ok(StepOutcome::Failed { target, error });
            }
        };

        let bucket = self.categorizer.categorize(&page).await;
        let title = read_title(&page, self.title_suffix.as_deref()).await;
        self.state.record_visit(target.clone(), title, bucket);

        let links = self.extractor.extract(&page).await;
        self.state.absorb(&links);

        Ok(StepOutcome::Visited {
            target,
            bucket,
            discovered: links.len(),
        })
    }

    fn publish(&mut self) -> Result<(), CensusError> {
        let report = self.report();
        self.sink.publish(&report, self.state.pages())?;
        Ok(())
    }
}
