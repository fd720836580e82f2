//! State module for tracking crawl progress
//!
//! This module owns everything the crawl mutates while it runs.
//!
//! # Components
//!
//! - `CrawlState`: frontier, visited set, error list and buckets of one crawl
//! - `Frontier`: LIFO stack of discovered targets and the `propose_targets` merge
//! - `CategoryBuckets`: per-category target lists fixed at configuration time
//! - `CrawlPhase`: Idle / Running / Done lifecycle of the driver

mod bucket;
mod crawl_state;
mod frontier;
mod phase;

// Re-export main types
pub use bucket::{Bucket, CategoryBuckets, CategoryId, RESERVED_BUCKET_NAMES};
pub use crawl_state::{CrawlState, PageRecord};
pub use frontier::{propose_targets, Frontier};
pub use phase::CrawlPhase;
