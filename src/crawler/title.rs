//! Page title extraction

use crate::render::Page;

/// Placeholder recorded when a page has no readable title
pub const MISSING_TITLE: &str = "ERROR";

const TITLE_SELECTOR: &str = "head title";

/// Reads and cleans the `<title>` of a page
///
/// A missing title or a failed query yields [`MISSING_TITLE`].
pub async fn read_title<P: Page>(page: &P, suffix: Option<&str>) -> String {
    match page.query_single(TITLE_SELECTOR).await {
        Ok(Some(node)) => clean_title(node.text(), suffix),
        Ok(None) => {
            tracing::debug!("Page has no title");
            MISSING_TITLE.to_string()
        }
        Err(e) => {
            tracing::warn!("Title lookup failed: {}", e);
            MISSING_TITLE.to_string()
        }
    }
}

/// Strips the site suffix and collapses line breaks and runs of spaces
///
/// # Examples
///
/// ```
/// use site_census::crawler::clean_title;
///
/// assert_eq!(
///     clean_title("\n  Getting   started - Example Docs\r\n", Some(" - Example Docs")),
///     "Getting started"
/// );
/// ```
pub fn clean_title(raw: &str, suffix: Option<&str>) -> String {
    let without_suffix = match suffix.filter(|s| !s.is_empty()) {
        Some(suffix) => raw.replace(suffix, ""),
        None => raw.to_string(),
    };

    let flattened: String = without_suffix
        .chars()
        .filter(|c| *c != '\n' && *c != '\r')
        .collect();

    flattened
        .split(' ')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
