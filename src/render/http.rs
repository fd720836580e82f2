//! HTTP-backed render engine
//!
//! This engine fetches a page with a plain GET request and parses the body
//! into a DOM tree. It covers server-rendered documentation sites; pages that
//! build their content in the browser need a browser-backed [`Renderer`].

use crate::config::RendererConfig;
use crate::render::{Element, Page, Renderer, WaitPolicy};
use crate::{RenderError, RenderResult};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use url::Url;

/// Default User-Agent when the configuration does not set one
const DEFAULT_USER_AGENT: &str = concat!("site-census/", env!("CARGO_PKG_VERSION"));

/// Content types accepted as renderable documents
const HTML_CONTENT_TYPES: &[&str] = &["text/html", "application/xhtml+xml"];

/// Render engine that fetches pages over HTTP
#[derive(Debug, Clone)]
pub struct HttpRenderer {
    client: Client,
}

impl HttpRenderer {
    /// Builds the HTTP client backing this engine
    ///
    /// # Arguments
    ///
    /// * `config` - The renderer configuration
    ///
    /// # Returns
    ///
    /// * `Ok(HttpRenderer)` - Engine ready for navigation
    /// * `Err(RenderError::Launch)` - The HTTP client could not be built
    pub fn new(config: &RendererConfig) -> RenderResult<Self> {
        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let client = Client::builder()
            .user_agent(user_agent)
            .connect_timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(|e| RenderError::Launch(e.to_string()))?;

        Ok(Self { client })
    }
}

impl Renderer for HttpRenderer {
    type Page = HtmlPage;

    /// Fetches `url` and parses it into an [`HtmlPage`]
    ///
    /// # Failure Mapping
    ///
    /// | Condition | Error |
    /// |-----------|-------|
    /// | Wait policy exceeded | `Timeout` |
    /// | Connection, DNS, TLS, body read | `Network` |
    /// | Non-2xx status after redirects | `Status` |
    /// | Content-Type is not HTML | `NotHtml` |
    async fn goto(&mut self, url: &Url, wait: &WaitPolicy) -> RenderResult<HtmlPage> {
        let response = self
            .client
            .get(url.clone())
            .timeout(wait.timeout())
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RenderError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_lowercase();

        if !HTML_CONTENT_TYPES.iter().any(|t| content_type.contains(t)) {
            return Err(RenderError::NotHtml {
                url: url.to_string(),
                content_type,
            });
        }

        let final_url = response.url().clone();
        if final_url != *url {
            tracing::debug!("{} redirected to {}", url, final_url);
        }

        let body = response.text().await.map_err(|e| classify_error(url, e))?;

        Ok(HtmlPage::parse(&body, final_url))
    }

    async fn close(&mut self) -> RenderResult<()> {
        tracing::debug!("Closing HTTP render engine");
        Ok(())
    }
}

/// Maps a reqwest failure onto a render error
fn classify_error(url: &Url, error: reqwest::Error) -> RenderError {
    if error.is_timeout() {
        RenderError::Timeout {
            url: url.to_string(),
        }
    } else {
        RenderError::Network {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}

/// A parsed HTML document
///
/// Anchor `href`s are resolved the way a browser exposes the `href`
/// property: against the document's `<base href>` if it has one, otherwise
/// against the final URL.
#[derive(Debug, Clone)]
pub struct HtmlPage {
    document: Html,
    base_url: Url,
    link_base: Url,
}

impl HtmlPage {
    /// Parses `html` as a document served from `base_url`
    ///
    /// # Example
    ///
    /// ```
    /// use site_census::render::HtmlPage;
    /// use url::Url;
    ///
    /// let html = r#"<html><body><a href="/guide">Guide</a></body></html>"#;
    /// let page = HtmlPage::parse(html, Url::parse("https://site.example/home").unwrap());
    /// assert_eq!(page.base_url().as_str(), "https://site.example/home");
    /// ```
    pub fn parse(html: &str, base_url: Url) -> Self {
        let document = Html::parse_document(html);
        let link_base = declared_base(&document, &base_url).unwrap_or_else(|| base_url.clone());
        Self {
            document,
            base_url,
            link_base,
        }
    }

    /// URL the document was served from
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL relative links resolve against
    pub fn link_base(&self) -> &Url {
        &self.link_base
    }

    fn compile(selector: &str) -> RenderResult<Selector> {
        Selector::parse(selector).map_err(|e| RenderError::Selector {
            selector: selector.to_string(),
            message: e.to_string(),
        })
    }

    fn snapshot(&self, element: ElementRef<'_>) -> Element {
        // An empty href resolves to the base itself
        let href = element
            .value()
            .attr("href")
            .map(str::trim)
            .and_then(|href| self.link_base.join(href).ok())
            .map(String::from);

        Element::new(href, element.text().collect::<String>())
    }
}

/// Reads the first `<base href>`, resolved against the document URL
fn declared_base(document: &Html, document_url: &Url) -> Option<Url> {
    let selector = Selector::parse("base[href]").ok()?;
    let href = document.select(&selector).next()?.value().attr("href")?;
    match document_url.join(href.trim()) {
        Ok(base) => Some(base),
        Err(e) => {
            tracing::debug!("Ignoring invalid <base href=\"{}\">: {}", href, e);
            None
        }
    }
}

impl Page for HtmlPage {
    async fn query_all(&self, selector: &str) -> RenderResult<Vec<Element>> {
        let selector = Self::compile(selector)?;
        Ok(self
            .document
            .select(&selector)
            .map(|element| self.snapshot(element))
            .collect())
    }

    async fn query_single(&self, selector: &str) -> RenderResult<Option<Element>> {
        let selector = Self::compile(selector)?;
        Ok(self
            .document
            .select(&selector)
            .next()
            .map(|element| self.snapshot(element)))
    }
}
