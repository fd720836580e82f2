//! Crawl frontier: discovered targets awaiting a visit
//!
//! The frontier is a LIFO stack. New discoveries are pushed on top in the
//! order they appear on the page, so the most recently discovered link is
//! visited next and the crawl runs depth-first.

use crate::url::TargetId;
use std::collections::HashSet;

/// Computes the next frontier: `(current_frontier ∪ candidates) \ settled`
///
/// Surviving frontier entries keep their positions; candidates not already
/// present are appended in discovery order. Duplicates collapse to their
/// first occurrence. The function is pure, so re-applying it with the same
/// candidates and the same settled set changes nothing.
///
/// # Arguments
///
/// * `candidates` - Targets discovered on the page just visited
/// * `current_frontier` - The frontier before this visit
/// * `is_settled` - Returns true for targets that must never be enqueued again
///
/// # Example
///
/// ```
/// use site_census::state::propose_targets;
/// use site_census::url::normalize_url;
/// use std::collections::HashSet;
/// use url::Url;
///
/// let t = |p: &str| normalize_url(&Url::parse(&format!("https://site.example{}", p)).unwrap());
/// let visited: HashSet<_> = [t("/home")].into_iter().collect();
///
/// let next = propose_targets(&[t("/home"), t("/api")], &[t("/guide")], |x| visited.contains(x));
/// assert_eq!(next, vec![t("/guide"), t("/api")]);
/// ```
pub fn propose_targets<F>(
    candidates: &[TargetId],
    current_frontier: &[TargetId],
    is_settled: F,
) -> Vec<TargetId>
where
    F: Fn(&TargetId) -> bool,
{
    let mut seen: HashSet<&TargetId> = HashSet::new();
    let mut next = Vec::with_capacity(current_frontier.len() + candidates.len());

    for target in current_frontier.iter().chain(candidates.iter()) {
        if is_settled(target) || !seen.insert(target) {
            continue;
        }
        next.push(target.clone());
    }

    next
}

/// Stack of targets not yet visited
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontier {
    targets: Vec<TargetId>,
}

impl Frontier {
    /// Creates a frontier holding only the entrypoint
    pub fn seeded(entrypoint: TargetId) -> Self {
        Self {
            targets: vec![entrypoint],
        }
    }

    /// Removes and returns the most recently added target
    ///
    /// Returns `None` once the frontier is drained, which ends the crawl.
    pub fn pop_next(&mut self) -> Option<TargetId> {
        self.targets.pop()
    }

    /// Merges newly discovered targets, dropping anything already settled
    pub fn absorb<F>(&mut self, candidates: &[TargetId], is_settled: F)
    where
        F: Fn(&TargetId) -> bool,
    {
        self.targets = propose_targets(candidates, &self.targets, is_settled);
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn contains(&self, target: &TargetId) -> bool {
        self.targets.contains(target)
    }

    /// Pending targets, bottom of the stack first
    pub fn as_slice(&self) -> &[TargetId] {
        &self.targets
    }
}

impl From<Vec<TargetId>> for Frontier {
    fn from(targets: Vec<TargetId>) -> Self {
        Self { targets }
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

    fn set(targets: &[TargetId]) -> HashSet<TargetId> {
        targets.iter().cloned().collect()
    }

    #[test]
    fn test_union_minus_visited() {
        let visited = set(&[t("/home"), t("/b")]);
        let next = propose_targets(
            &[t("/a"), t("/b"), t("/c")],
            &[t("/x"), t("/a")],
            |x| visited.contains(x),
        );
        assert_eq!(next, vec![t("/x"), t("/a"), t("/c")]);
    }

    #[test]
    fn test_visited_removed_from_existing_frontier() {
        let visited = set(&[t("/x")]);
        let next = propose_targets(&[], &[t("/x"), t("/y")], |x| visited.contains(x));
        assert_eq!(next, vec![t("/y")]);
    }

    #[test]
    fn test_duplicate_candidates_collapse() {
        let next = propose_targets(&[t("/a"), t("/a"), t("/b")], &[], |_| false);
        assert_eq!(next, vec![t("/a"), t("/b")]);
    }

    #[test]
    fn test_idempotent() {
        let visited = set(&[t("/home")]);
        let candidates = [t("/a"), t("/home"), t("/b")];
        let frontier = [t("/c")];

        let once = propose_targets(&candidates, &frontier, |x| visited.contains(x));
        let again = propose_targets(&candidates, &frontier, |x| visited.contains(x));
        let reapplied = propose_targets(&candidates, &once, |x| visited.contains(x));

        assert_eq!(once, again);
        assert_eq!(once, reapplied);
    }

    #[test]
    fn test_result_disjoint_from_visited() {
        let visited = set(&[t("/a"), t("/c")]);
        let next = propose_targets(
            &[t("/a"), t("/b"), t("/c"), t("/d")],
            &[t("/c"), t("/e")],
            |x| visited.contains(x),
        );
        assert!(next.iter().all(|x| !visited.contains(x)));
    }

    #[test]
    fn test_pop_is_lifo() {
        let mut frontier = Frontier::seeded(t("/home"));
        frontier.absorb(&[t("/a"), t("/b")], |_| false);

        assert_eq!(frontier.pop_next(), Some(t("/b")));
        assert_eq!(frontier.pop_next(), Some(t("/a")));
        assert_eq!(frontier.pop_next(), Some(t("/home")));
        assert_eq!(frontier.pop_next(), None);
    }

    #[test]
    fn test_pop_empty() {
        let mut frontier = Frontier::default();
        assert!(frontier.is_empty());
        assert_eq!(frontier.pop_next(), None);
    }

    #[test]
    fn test_rediscovered_target_keeps_position() {
        let mut frontier = Frontier::from(vec![t("/a"), t("/b")]);
        frontier.absorb(&[t("/a"), t("/c")], |_| false);
        assert_eq!(frontier.as_slice(), &[t("/a"), t("/b"), t("/c")]);
        assert_eq!(frontier.len(), 3);
        assert!(frontier.contains(&t("/b")));
    }
}
