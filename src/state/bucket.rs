use crate::url::TargetId;
use std::fmt;

/// Names that configured categories may not use
pub const RESERVED_BUCKET_NAMES: &[&str] = &["unknown", "errors", "incomplete"];

/// Index of a configured category
///
/// Category ids are handed out by [`CategoryBuckets`] and the categorizer
/// from the same ordered rule list, so an id is only ever valid for the
/// configuration it was created from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(usize);

impl CategoryId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the category in the configured rule order
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Destination of a crawled target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// A configured category matched
    Category(CategoryId),
    /// The page rendered but no category matched
    Unknown,
    /// The page could not be fetched
    Errors,
}

impl Bucket {
    /// Returns true if the target behind this bucket was successfully visited
    pub fn is_visited(&self) -> bool {
        !matches!(self, Self::Errors)
    }
}

/// Ordered per-bucket lists of targets
///
/// The set of buckets is fixed at construction: one per configured category
/// plus `unknown` and `errors`. Each list keeps insertion order.
#[derive(Debug, Clone)]
pub struct CategoryBuckets {
    names: Vec<String>,
    categories: Vec<Vec<TargetId>>,
    unknown: Vec<TargetId>,
    errors: Vec<TargetId>,
}

impl CategoryBuckets {
    /// Creates empty buckets for the given category names, in rule order
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let categories = vec![Vec::new(); names.len()];
        Self {
            names,
            categories,
            unknown: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Returns every bucket in report order: categories, `unknown`, `errors`
    pub fn all(&self) -> Vec<Bucket> {
        let mut buckets: Vec<Bucket> = (0..self.names.len())
            .map(|i| Bucket::Category(CategoryId::new(i)))
            .collect();
        buckets.push(Bucket::Unknown);
        buckets.push(Bucket::Errors);
        buckets
    }

    /// Looks up a bucket by its report name
    pub fn find(&self, name: &str) -> Option<Bucket> {
        match name {
            "unknown" => Some(Bucket::Unknown),
            "errors" => Some(Bucket::Errors),
            _ => self
                .names
                .iter()
                .position(|n| n == name)
                .map(|i| Bucket::Category(CategoryId::new(i))),
        }
    }

    /// Report name of a bucket
    pub fn name(&self, bucket: Bucket) -> &str {
        match bucket {
            Bucket::Category(id) => self
                .names
                .get(id.index())
                .map(String::as_str)
                .unwrap_or("unknown"),
            Bucket::Unknown => "unknown",
            Bucket::Errors => "errors",
        }
    }

    /// Targets in a bucket, in insertion order
    pub fn get(&self, bucket: Bucket) -> &[TargetId] {
        match bucket {
            Bucket::Category(id) => self
                .categories
                .get(id.index())
                .map(Vec::as_slice)
                .unwrap_or(&[]),
            Bucket::Unknown => &self.unknown,
            Bucket::Errors => &self.errors,
        }
    }

    /// Appends a target to a bucket
    ///
    /// A category id that does not belong to these buckets falls back to
    /// `unknown`.
    pub fn push(&mut self, bucket: Bucket, target: TargetId) {
        match bucket {
            Bucket::Category(id) => match self.categories.get_mut(id.index()) {
                Some(list) => list.push(target),
                None => {
                    tracing::warn!("Category index {} out of range, using unknown", id.index());
                    self.unknown.push(target);
                }
            },
            Bucket::Unknown => self.unknown.push(target),
            Bucket::Errors => self.errors.push(target),
        }
    }

    /// Number of successfully visited targets (all buckets except `errors`)
    pub fn crawled_count(&self) -> usize {
        self.categories.iter().map(Vec::len).sum::<usize>() + self.unknown.len()
    }

    /// Returns the bucket holding `target`, if any
    pub fn bucket_of(&self, target: &TargetId) -> Option<Bucket> {
        self.all()
            .into_iter()
            .find(|bucket| self.get(*bucket).contains(target))
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category(id) => write!(f, "category #{}", id.index()),
            Self::Unknown => f.write_str("unknown"),
            Self::Errors => f.write_str("errors"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::url::normalize_url;
    use url::Url;

    fn target(path: &str) -> TargetId {
        normalize_url(&Url::parse(&format!("https://site.example{}", path)).unwrap())
    }

    #[test]
    fn test_all_buckets_in_report_order() {
        let buckets = CategoryBuckets::new(["api", "guide"]);
        let names: Vec<_> = buckets.all().into_iter().map(|b| buckets.name(b)).collect();
        assert_eq!(names, vec!["api", "guide", "unknown", "errors"]);
    }

    #[test]
    fn test_find_by_name() {
        let buckets = CategoryBuckets::new(["api", "guide"]);
        assert_eq!(
            buckets.find("guide"),
            Some(Bucket::Category(CategoryId::new(1)))
        );
        assert_eq!(buckets.find("unknown"), Some(Bucket::Unknown));
        assert_eq!(buckets.find("errors"), Some(Bucket::Errors));
        assert_eq!(buckets.find("blog"), None);
    }

    #[test]
    fn test_push_and_get_preserve_order() {
        let mut buckets = CategoryBuckets::new(["api"]);
        let api = buckets.find("api").unwrap();
        buckets.push(api, target("/api/b"));
        buckets.push(api, target("/api/a"));
        buckets.push(Bucket::Unknown, target("/misc"));
        buckets.push(Bucket::Errors, target("/broken"));

        assert_eq!(buckets.get(api), &[target("/api/b"), target("/api/a")]);
        assert_eq!(buckets.get(Bucket::Unknown), &[target("/misc")]);
        assert_eq!(buckets.get(Bucket::Errors), &[target("/broken")]);
    }

    #[test]
    fn test_crawled_count_excludes_errors() {
        let mut buckets = CategoryBuckets::new(["api"]);
        buckets.push(buckets.find("api").unwrap(), target("/api"));
        buckets.push(Bucket::Unknown, target("/misc"));
        buckets.push(Bucket::Errors, target("/broken"));
        assert_eq!(buckets.crawled_count(), 2);
    }

    #[test]
    fn test_foreign_category_falls_back_to_unknown() {
        let mut buckets = CategoryBuckets::new(["api"]);
        buckets.push(Bucket::Category(CategoryId::new(7)), target("/x"));
        assert_eq!(buckets.get(Bucket::Unknown), &[target("/x")]);
        assert!(buckets.get(Bucket::Category(CategoryId::new(7))).is_empty());
    }

    #[test]
    fn test_bucket_of() {
        let mut buckets = CategoryBuckets::new(["api"]);
        buckets.push(Bucket::Errors, target("/broken"));
        assert_eq!(buckets.bucket_of(&target("/broken")), Some(Bucket::Errors));
        assert_eq!(buckets.bucket_of(&target("/nowhere")), None);
    }

    #[test]
    fn test_is_visited() {
        assert!(Bucket::Unknown.is_visited());
        assert!(Bucket::Category(CategoryId::new(0)).is_visited());
        assert!(!Bucket::Errors.is_visited());
    }
}
