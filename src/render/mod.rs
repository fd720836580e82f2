//! Page rendering capability
//!
//! The crawl never talks to the network directly. It asks a [`Renderer`] to
//! navigate to a target and then inspects the returned [`Page`] through
//! selector queries. The crate ships an HTTP-backed engine; tests plug in
//! in-memory ones.

mod http;

pub use http::{HtmlPage, HttpRenderer};

use crate::RenderResult;
use std::time::Duration;
use url::Url;

/// Bound applied to a single navigation
///
/// A navigation that does not settle within the policy is reported as a
/// [`RenderError::Timeout`](crate::RenderError::Timeout), which the crawl
/// treats like any other fetch failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    timeout: Duration,
}

impl WaitPolicy {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Maximum time a navigation may take
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

/// Snapshot of a DOM element returned by a query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    href: Option<String>,
    text: String,
}

impl Element {
    /// Creates an element snapshot
    ///
    /// `href` must already be resolved to an absolute URL.
    pub fn new(href: Option<String>, text: impl Into<String>) -> Self {
        Self {
            href,
            text: text.into(),
        }
    }

    /// Resolved absolute `href`, if the element carries one
    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    /// Text content of the element and its descendants
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A rendered page that can be queried with CSS selectors
// Pages hold non-Send DOM trees and the crawl runs on a single task, so the
// returned futures carry no Send bound.
#[allow(async_fn_in_trait)]
pub trait Page {
    /// Returns every element matching `selector`, in document order
    async fn query_all(&self, selector: &str) -> RenderResult<Vec<Element>>;

    /// Returns the first element matching `selector`
    async fn query_single(&self, selector: &str) -> RenderResult<Option<Element>>;
}

/// A page-rendering engine
///
/// Exactly one navigation is outstanding at a time: the crawl awaits each
/// `goto` before issuing the next.
#[allow(async_fn_in_trait)]
pub trait Renderer {
    type Page: Page;

    /// Navigates to `url` and returns the rendered page
    async fn goto(&mut self, url: &Url, wait: &WaitPolicy) -> RenderResult<Self::Page>;

    /// Releases the engine
    async fn close(&mut self) -> RenderResult<()>;
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    type Page = R::Page;

    async fn goto(&mut self, url: &Url, wait: &WaitPolicy) -> RenderResult<Self::Page> {
        (**self).goto(url, wait).await
    }

    async fn close(&mut self) -> RenderResult<()> {
        (**self).close().await
    }
}
