//! Page categorization by DOM selector rules

use crate::config::CategoryRule;
use crate::render::Page;
use crate::state::{Bucket, CategoryBuckets, CategoryId};

/// Assigns each page to the first category whose selector matches
#[derive(Debug, Clone, Default)]
pub struct Categorizer {
    rules: Vec<CategoryRule>,
}

impl Categorizer {
    /// Creates a categorizer; rule order is match priority
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// Creates empty buckets matching these rules
    pub fn empty_buckets(&self) -> CategoryBuckets {
        CategoryBuckets::new(self.rules.iter().map(|rule| rule.id.clone()))
    }

    /// Returns the bucket for `page`
    ///
    /// Rules are tried in order and evaluation stops at the first selector
    /// that matches at least one element. A selector that fails to evaluate
    /// counts as a non-match. With no match the page is `Unknown`.
    pub async fn categorize<P: Page>(&self, page: &P) -> Bucket {
        for (index, rule) in self.rules.iter().enumerate() {
            match page.query_single(&rule.selector).await {
                Ok(Some(_)) => {
                    tracing::debug!("Matched category '{}' ({})", rule.id, rule.selector);
                    return Bucket::Category(CategoryId::new(index));
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!("Selector for category '{}' failed: {}", rule.id, e);
                }
            }
        }

        Bucket::Unknown
    }
}
