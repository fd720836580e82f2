use url::Url;

/// File extensions that never point at a documentation page
pub const DEFAULT_EXCLUDED_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "zip", "json", "js", "css", "pdf", "gif", "md", "ogg", "txt", "ai",
];

/// Decides which resolved links belong to the crawl
///
/// A link is admitted when its absolute URL contains the scope substring
/// and its path does not end in a denylisted file extension.
#[derive(Debug, Clone)]
pub struct ScopeFilter {
    scope: String,
    excluded_extensions: Vec<String>,
}

impl ScopeFilter {
    /// Creates a filter for the given scope substring and extension denylist
    ///
    /// Extensions are stored lowercased and without a leading dot.
    pub fn new<I, S>(scope: impl Into<String>, excluded_extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            scope: scope.into(),
            excluded_extensions: excluded_extensions
                .into_iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }

    /// Returns the scope substring
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Returns true if the URL string contains the scope substring
    ///
    /// # Examples
    ///
    /// ```
    /// use site_census::url::ScopeFilter;
    ///
    /// let filter = ScopeFilter::new("https://site.example", ["pdf"]);
    /// assert!(filter.is_in_scope("https://site.example/guide"));
    /// assert!(!filter.is_in_scope("https://other.example/guide"));
    /// ```
    pub fn is_in_scope(&self, url: &str) -> bool {
        url.contains(&self.scope)
    }

    /// Returns true if the URL path ends (case-insensitively) in a denylisted extension
    pub fn has_excluded_extension(&self, url: &Url) -> bool {
        let path = url.path().to_lowercase();
        self.excluded_extensions
            .iter()
            .any(|ext| path.ends_with(&format!(".{}", ext)))
    }

    /// Returns true if a resolved link should be followed
    pub fn admits(&self, url: &Url) -> bool {
        self.is_in_scope(url.as_str()) && !self.has_excluded_extension(url)
    }
}
