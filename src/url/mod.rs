//! URL handling module for Site-Census
//!
//! This module turns raw links into [`TargetId`]s and decides which links
//! stay inside the crawl's scope.

mod normalize;
mod scope;

// Re-export main types and functions
pub use normalize::{normalize_url, TargetId};
pub use scope::{ScopeFilter, DEFAULT_EXCLUDED_EXTENSIONS};

use url::Url;

/// Parses a resolved href and maps it to a [`TargetId`] if the filter admits it
///
/// Returns `None` for hrefs that are not absolute http(s) URLs, that fall
/// outside the scope, or that point at a denylisted file type.
///
/// # Examples
///
/// ```
/// use site_census::url::{target_for_href, ScopeFilter};
///
/// let filter = ScopeFilter::new("https://site.example", ["pdf"]);
/// let target = target_for_href("https://site.example/guide/index.html", &filter).unwrap();
/// assert_eq!(target.as_str(), "https://site.example/guide");
///
/// assert!(target_for_href("https://site.example/manual.pdf", &filter).is_none());
/// assert!(target_for_href("mailto:docs@site.example", &filter).is_none());
/// ```
pub fn target_for_href(href: &str, filter: &ScopeFilter) -> Option<TargetId> {
    let href = href.trim();
    if !filter.is_in_scope(href) {
        return None;
    }

    let url = match Url::parse(href) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!("Skipping unparseable href {}: {}", href, e);
            return None;
        }
    };

    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }

    if !filter.admits(&url) {
        return None;
    }

    // Normalizing can expose a denylisted extension, as in "/manual.pdf/"
    let target = normalize_url(&url);
    match target.to_url() {
        Ok(normalized) if !filter.has_excluded_extension(&normalized) => Some(target),
        _ => {
            tracing::debug!("Skipping {}: normalizes to {}", href, target);
            None
        }
    }
}
