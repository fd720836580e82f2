use crate::render::WaitPolicy;
use crate::url::{ScopeFilter, DEFAULT_EXCLUDED_EXTENSIONS};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Main configuration structure for Site-Census
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// First page of the crawl
    pub entrypoint: String,

    /// Substring every followed link must contain (defaults to the entrypoint origin)
    #[serde(default)]
    pub scope: Option<String>,

    /// File extensions whose links are never followed
    #[serde(rename = "excluded-extensions", default = "default_excluded_extensions")]
    pub excluded_extensions: Vec<String>,

    #[serde(default)]
    pub renderer: RendererConfig,

    #[serde(default)]
    pub output: OutputConfig,

    /// Category rules, evaluated in file order
    #[serde(rename = "category", default)]
    pub categories: Vec<CategoryRule>,
}

/// Page rendering configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RendererConfig {
    /// Upper bound on a single navigation (milliseconds)
    #[serde(rename = "timeout-ms", default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default)]
    pub user_agent: Option<String>,

    /// Suffix stripped from page titles (e.g. " - Example Docs")
    #[serde(rename = "title-suffix", default)]
    pub title_suffix: Option<String>,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the markdown report, rewritten after every page
    #[serde(rename = "report-path", default = "default_report_path")]
    pub report_path: String,

    /// Optional path to a Title,URL CSV of visited pages
    #[serde(rename = "titles-path", default)]
    pub titles_path: Option<String>,
}

/// A single categorization rule
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryRule {
    /// Category name used in the report
    pub id: String,

    /// CSS selector that must match at least one element on the page
    pub selector: String,
}

impl Config {
    /// Parses the entrypoint into a URL
    pub fn entrypoint_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.entrypoint)
    }

    /// Returns the scope substring, falling back to the entrypoint origin
    pub fn scope_substring(&self) -> String {
        match &self.scope {
            Some(scope) => scope.clone(),
            None => self
                .entrypoint_url()
                .map(|url| url.origin().ascii_serialization())
                .unwrap_or_else(|_| self.entrypoint.clone()),
        }
    }

    /// Builds the link filter described by this configuration
    pub fn scope_filter(&self) -> ScopeFilter {
        ScopeFilter::new(self.scope_substring(), &self.excluded_extensions)
    }

    /// Returns the wait policy bounding every navigation
    pub fn wait_policy(&self) -> WaitPolicy {
        WaitPolicy::new(Duration::from_millis(self.renderer.timeout_ms))
    }
}

impl CategoryRule {
    pub fn new(id: impl Into<String>, selector: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            selector: selector.into(),
        }
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            user_agent: None,
            title_suffix: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_path: default_report_path(),
            titles_path: None,
        }
    }
}

fn default_excluded_extensions() -> Vec<String> {
    DEFAULT_EXCLUDED_EXTENSIONS
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_report_path() -> String {
    "report.md".to_string()
}
