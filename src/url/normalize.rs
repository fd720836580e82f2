use std::fmt;
use url::Url;

/// Canonical identifier of a crawlable page
///
/// A `TargetId` is `scheme://host[:port]` followed by a normalized path.
/// Query strings and fragments never take part in it, so every raw URL that
/// points at the same document collapses onto one node of the crawl graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(String);

impl TargetId {
    /// Returns the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the identifier back into a URL suitable for navigation
    pub fn to_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.0)
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TargetId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalizes a URL into a [`TargetId`]
///
/// # Normalization Steps
///
/// 1. Keep the origin (scheme, lowercased host, non-default port)
/// 2. Drop the query string and fragment
/// 3. Rewrite the path until it stops changing:
///    - Strip a trailing `.html` suffix
///    - Strip a trailing slash (except for root /)
///    - Strip a trailing `index` segment
///
/// Running the rewrites to a fixed point keeps the function idempotent even
/// for odd paths such as `/a/index.html.html`.
///
/// # Examples
///
/// ```
/// use site_census::url::normalize_url;
/// use url::Url;
///
/// let a = normalize_url(&Url::parse("https://site.example/guide/index.html").unwrap());
/// let b = normalize_url(&Url::parse("https://site.example/guide").unwrap());
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "https://site.example/guide");
/// ```
pub fn normalize_url(url: &Url) -> TargetId {
    let origin = url.origin().ascii_serialization();
    let path = normalize_path(url.path());
    TargetId(format!("{}{}", origin, path))
}

/// Reduces a path to its canonical page form
fn normalize_path(path: &str) -> String {
    let mut current = if path.is_empty() {
        "/".to_string()
    } else {
        path.to_string()
    };

    loop {
        let next = rewrite_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Applies each path rewrite once
fn rewrite_once(path: &str) -> String {
    let mut path = path.strip_suffix(".html").unwrap_or(path);

    if path.len() > 1 {
        path = path.strip_suffix('/').unwrap_or(path);
    }

    // "/index" -> "/", "/guide/index" -> "/guide/"
    if let Some(parent) = path.strip_suffix("index") {
        if parent.ends_with('/') {
            path = parent;
        }
    }

    if path.is_empty() {
        "/".to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(raw: &str) -> String {
        normalize_url(&Url::parse(raw).unwrap()).to_string()
    }

    #[test]
    fn test_strip_html_suffix() {
        assert_eq!(
            normalize("https://site.example/guide/intro.html"),
            "https://site.example/guide/intro"
        );
    }

    #[test]
    fn test_strip_index_segment() {
        assert_eq!(
            normalize("https://site.example/guide/index"),
            "https://site.example/guide"
        );
        assert_eq!(
            normalize("https://site.example/guide/index.html"),
            "https://site.example/guide"
        );
    }

    #[test]
    fn test_trailing_slash_variants_collapse() {
        let expected = "https://site.example/guide";
        for raw in [
            "https://site.example/guide",
            "https://site.example/guide/",
            "https://site.example/guide.html",
            "https://site.example/guide/index",
            "https://site.example/guide/index.html",
        ] {
            assert_eq!(normalize(raw), expected, "Failed for {}", raw);
        }
    }

    #[test]
    fn test_root_index() {
        assert_eq!(normalize("https://site.example"), "https://site.example/");
        assert_eq!(normalize("https://site.example/"), "https://site.example/");
        assert_eq!(
            normalize("https://site.example/index.html"),
            "https://site.example/"
        );
        assert_eq!(
            normalize("https://site.example/index"),
            "https://site.example/"
        );
    }

    #[test]
    fn test_index_must_be_whole_segment() {
        assert_eq!(
            normalize("https://site.example/docs/myindex"),
            "https://site.example/docs/myindex"
        );
        assert_eq!(
            normalize("https://site.example/reindex.html"),
            "https://site.example/reindex"
        );
    }

    #[test]
    fn test_query_and_fragment_discarded() {
        assert_eq!(
            normalize("https://site.example/guide/index.html?lang=en#setup"),
            "https://site.example/guide"
        );
    }

    #[test]
    fn test_host_lowercased_and_port_kept() {
        assert_eq!(
            normalize("https://SITE.Example/Guide"),
            "https://site.example/Guide"
        );
        assert_eq!(
            normalize("http://127.0.0.1:8080/docs/index.html"),
            "http://127.0.0.1:8080/docs"
        );
    }

    #[test]
    fn test_idempotent() {
        for raw in [
            "https://site.example/a/index.html.html",
            "https://site.example/a/index/index/",
            "https://site.example/index.html/",
            "https://site.example/guide/",
            "https://site.example/",
        ] {
            let once = normalize(raw);
            let twice = normalize(&once);
            assert_eq!(once, twice, "Not idempotent for {}", raw);
        }
    }

    #[test]
    fn test_nested_rewrites_reach_fixed_point() {
        assert_eq!(
            normalize("https://site.example/a/index.html.html"),
            "https://site.example/a"
        );
        assert_eq!(
            normalize("https://site.example/a/index/index/"),
            "https://site.example/a"
        );
    }
}
