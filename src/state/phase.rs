/// Lifecycle phases of a crawl
///
/// This module defines the states the crawl driver moves through.
use std::fmt;

/// Represents where a crawl is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Frontier seeded, no target popped yet
    Idle,

    /// At least one target popped and the frontier is not empty
    Running,

    /// The frontier has been drained
    Done,
}

impl CrawlPhase {
    /// Returns true if no further iteration will run
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns true if the crawl has started and not yet finished
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Running)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
