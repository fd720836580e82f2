//! Link extraction from rendered pages
//!
//! Every anchor on the page is resolved, filtered by scope and extension,
//! normalized, and deduplicated. Extraction never fails: a page that cannot
//! be inspected yields no links.

use crate::render::Page;
use crate::url::{target_for_href, ScopeFilter, TargetId};
use std::collections::HashSet;

/// Selector for every anchor element on a page
const ANCHOR_SELECTOR: &str = "a";

/// Finds in-scope targets linked from a page
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    filter: ScopeFilter,
}

impl LinkExtractor {
    pub fn new(filter: ScopeFilter) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> &ScopeFilter {
        &self.filter
    }

    /// Returns the distinct in-scope targets linked from `page`
    ///
    /// Targets appear in the order their first anchor appears in the
    /// document. If the page cannot be queried the failure is logged and an
    /// empty list is returned.
    pub async fn extract<P: Page>(&self, page: &P) -> Vec<TargetId> {
        let anchors = match page.query_all(ANCHOR_SELECTOR).await {
            Ok(anchors) => anchors,
            Err(e) => {
                tracing::warn!("Link extraction failed: {}", e);
                return Vec::new();
            }
        };

        let mut seen = HashSet::new();
        let mut targets = Vec::new();

        for anchor in &anchors {
            let Some(href) = anchor.href() else {
                continue;
            };

            match target_for_href(href, &self.filter) {
                Some(target) => {
                    if seen.insert(target.clone()) {
                        targets.push(target);
                    }
                }
                None => tracing::trace!("Skipping link {}", href),
            }
        }

        tracing::debug!(
            "Extracted {} targets from {} anchors",
            targets.len(),
            anchors.len()
        );

        targets
    }
}
