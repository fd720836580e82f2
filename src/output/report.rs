//! Crawl report generation
//!
//! The report is a pure function of the crawl's buckets and frontier. It is
//! rebuilt from scratch after every iteration.

use crate::state::{Bucket, CategoryBuckets, Frontier};
use crate::url::TargetId;
use std::fmt;

/// Name of the pseudo-bucket listing the pending frontier
pub const INCOMPLETE_SECTION: &str = "incomplete";

/// One bucket's worth of targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSection {
    pub name: String,
    pub targets: Vec<TargetId>,
}

/// Snapshot of crawl progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Successfully visited targets across all categories and `unknown`
    pub crawled: usize,

    /// Targets whose fetch failed
    pub errors: usize,

    /// Targets still waiting in the frontier
    pub incomplete: usize,

    /// Bucket listings in report order
    pub sections: Vec<ReportSection>,
}

impl Report {
    /// Builds a report from the current buckets and frontier
    ///
    /// Sections follow the configured category order, then `unknown`,
    /// `errors`, and finally `incomplete` when the frontier is not empty.
    pub fn build(buckets: &CategoryBuckets, frontier: &Frontier) -> Self {
        let mut sections: Vec<ReportSection> = buckets
            .all()
            .into_iter()
            .map(|bucket| ReportSection {
                name: buckets.name(bucket).to_string(),
                targets: buckets.get(bucket).to_vec(),
            })
            .collect();

        if !frontier.is_empty() {
            sections.push(ReportSection {
                name: INCOMPLETE_SECTION.to_string(),
                targets: frontier.as_slice().to_vec(),
            });
        }

        Self {
            crawled: buckets.crawled_count(),
            errors: buckets.get(Bucket::Errors).len(),
            incomplete: frontier.len(),
            sections,
        }
    }

    /// Looks up a section by bucket name
    pub fn section(&self, name: &str) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Formats the report as markdown
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str("# Site Census Report\n\n");

        md.push_str(&format!("- **Crawled**: {}\n", self.crawled));
        md.push_str(&format!("- **Errors**: {}\n", self.errors));
        md.push_str(&format!("- **Incomplete**: {}\n", self.incomplete));

        for section in &self.sections {
            md.push_str(&format!(
                "\n## {} ({})\n\n",
                section.name,
                section.targets.len()
            ));

            let listing = section
                .targets
                .iter()
                .map(TargetId::as_str)
                .collect::<Vec<_>>()
                .join("\n");
            if !listing.is_empty() {
                md.push_str(&listing);
                md.push('\n');
            }
        }

        md
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_markdown())
    }
}
