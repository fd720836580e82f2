use crate::state::bucket::{Bucket, CategoryBuckets};
use crate::state::frontier::Frontier;
use crate::state::phase::CrawlPhase;
use crate::url::TargetId;
use std::collections::HashSet;

/// A successfully visited page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    pub target: TargetId,
    pub title: String,
    pub bucket: Bucket,
}

/// All mutable state of a single crawl
///
/// The crawl driver owns exactly one `CrawlState` and passes it through each
/// step. Every transition goes through a method here, which keeps the
/// following invariants:
///
/// - the frontier never holds a visited or failed target
/// - a target lands in exactly one bucket, at most once
/// - the visited set only grows
#[derive(Debug, Clone)]
pub struct CrawlState {
    frontier: Frontier,
    visited: HashSet<TargetId>,
    failed: HashSet<TargetId>,
    pages: Vec<PageRecord>,
    buckets: CategoryBuckets,
    started: bool,
}

impl CrawlState {
    /// Creates the state for a crawl seeded with `entrypoint`
    pub fn new(entrypoint: TargetId, buckets: CategoryBuckets) -> Self {
        Self {
            frontier: Frontier::seeded(entrypoint),
            visited: HashSet::new(),
            failed: HashSet::new(),
            pages: Vec::new(),
            buckets,
            started: false,
        }
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> CrawlPhase {
        if self.frontier.is_empty() {
            CrawlPhase::Done
        } else if self.started {
            CrawlPhase::Running
        } else {
            CrawlPhase::Idle
        }
    }

    /// Takes the next target off the frontier
    pub fn pop_next(&mut self) -> Option<TargetId> {
        self.started = true;
        self.frontier.pop_next()
    }

    /// Records a target whose fetch failed
    ///
    /// The target joins the error list and is never enqueued again. Returns
    /// false if the target had already been settled.
    pub fn record_failure(&mut self, target: TargetId) -> bool {
        if self.is_settled(&target) {
            tracing::debug!("Ignoring repeated outcome for {}", target);
            return false;
        }

        self.failed.insert(target.clone());
        self.buckets.push(Bucket::Errors, target);
        true
    }

    /// Records a successfully rendered target and its category
    ///
    /// Returns false if the target had already been settled. Passing
    /// [`Bucket::Errors`] records a failure instead.
    pub fn record_visit(&mut self, target: TargetId, title: String, bucket: Bucket) -> bool {
        if !bucket.is_visited() {
            return self.record_failure(target);
        }

        if self.is_settled(&target) {
            tracing::debug!("Ignoring repeated outcome for {}", target);
            return false;
        }

        self.visited.insert(target.clone());
        self.buckets.push(bucket, target.clone());
        self.pages.push(PageRecord {
            target,
            title,
            bucket,
        });
        true
    }

    /// Merges links discovered on a page into the frontier
    pub fn absorb(&mut self, candidates: &[TargetId]) {
        let visited = &self.visited;
        let failed = &self.failed;
        self.frontier
            .absorb(candidates, |t| visited.contains(t) || failed.contains(t));
    }

    /// Returns true if the target was already visited or failed
    pub fn is_settled(&self, target: &TargetId) -> bool {
        self.visited.contains(target) || self.failed.contains(target)
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn visited(&self) -> &HashSet<TargetId> {
        &self.visited
    }

    /// Failed targets in the order they failed
    pub fn errors(&self) -> &[TargetId] {
        self.buckets.get(Bucket::Errors)
    }

    pub fn buckets(&self) -> &CategoryBuckets {
        &self.buckets
    }

    /// Visited pages in visit order
    pub fn pages(&self) -> &[PageRecord] {
        &self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::url::normalize_url;
    use url::Url;

    fn t(path: &str) -> TargetId {
        normalize_url(&Url::parse(&format!("https://site.example{}", path)).unwrap())
    }

    fn state() -> CrawlState {
        CrawlState::new(t("/home"), CategoryBuckets::new(["api", "guide"]))
    }

    #[test]
    fn test_phases() {
        let mut state = state();
        assert_eq!(state.phase(), CrawlPhase::Idle);

        let home = state.pop_next().unwrap();
        assert_eq!(state.phase(), CrawlPhase::Done);

        state.record_visit(home, "Home".to_string(), Bucket::Unknown);
        state.absorb(&[t("/a")]);
        assert_eq!(state.phase(), CrawlPhase::Running);
    }

    #[test]
    fn test_visit_excludes_target_from_frontier() {
        let mut state = state();
        let home = state.pop_next().unwrap();
        state.record_visit(home.clone(), String::new(), Bucket::Unknown);
        state.absorb(&[home.clone(), t("/a")]);

        assert!(!state.frontier().contains(&home));
        assert!(state.frontier().contains(&t("/a")));
        assert!(state.visited().contains(&home));
    }

    #[test]
    fn test_failure_never_requeued() {
        let mut state = state();
        let home = state.pop_next().unwrap();
        assert!(state.record_failure(home.clone()));

        state.absorb(&[home.clone()]);
        assert!(state.frontier().is_empty());
        assert!(!state.visited().contains(&home));
        assert_eq!(state.errors(), &[home]);
    }

    #[test]
    fn test_target_lands_in_one_bucket_once() {
        let mut state = state();
        let api = state.buckets().find("api").unwrap();
        let guide = state.buckets().find("guide").unwrap();

        assert!(state.record_visit(t("/x"), String::new(), api));
        assert!(!state.record_visit(t("/x"), String::new(), guide));
        assert!(!state.record_failure(t("/x")));

        assert_eq!(state.buckets().get(api), &[t("/x")]);
        assert!(state.buckets().get(guide).is_empty());
        assert!(state.errors().is_empty());
        assert_eq!(state.pages().len(), 1);
    }

    #[test]
    fn test_visit_with_errors_bucket_records_failure() {
        let mut state = state();
        state.record_visit(t("/x"), String::new(), Bucket::Errors);
        assert_eq!(state.errors(), &[t("/x")]);
        assert!(state.visited().is_empty());
        assert!(state.pages().is_empty());
    }

    #[test]
    fn test_pages_in_visit_order() {
        let mut state = state();
        state.record_visit(t("/b"), "B".to_string(), Bucket::Unknown);
        state.record_visit(t("/a"), "A".to_string(), Bucket::Unknown);

        let titles: Vec<_> = state.pages().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A"]);
    }
}
