//! Document sources: turn a URL into a page snapshot the parsers can query.
//!
//! [`HttpSource`] serves static HTML through the fetch client. With the `render`
//! feature, [`HeadlessSource`] drives a headless browser for pages that need
//! script execution before their tables exist.

#[cfg(feature = "render")]
mod headless;

#[cfg(feature = "render")]
pub use headless::{HeadlessOptions, HeadlessSource};

use crate::fetch::FetchClient;
use dexcrawl_core::Error;
use std::sync::Arc;
use thiserror::Error;
use url::Url;

/// Errors raised while producing a page snapshot.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Failed to launch or connect to browser.
    #[error("browser launch failed: {0}")]
    BrowserLaunch(String),

    /// Failed to navigate to URL.
    #[error("navigation failed: {0}")]
    Navigation(String),

    /// Failed to get page content.
    #[error("content retrieval failed: {0}")]
    ContentRetrieval(String),

    /// Navigation did not finish in time.
    #[error("navigation timeout after {0}ms")]
    Timeout(u64),

    /// Browser closed unexpectedly.
    #[error("browser closed unexpectedly")]
    BrowserClosed,

    /// The HTTP fetch pipeline refused or failed the request.
    #[error(transparent)]
    Fetch(#[from] Error),
}

impl From<SourceError> for Error {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Fetch(inner) => inner,
            SourceError::BrowserLaunch(msg) => Error::RenderFailed(msg),
            other => Error::NavigationFailed(other.to_string()),
        }
    }
}

/// A page as delivered by a source, before parsing.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// Page HTML.
    pub html: String,

    /// Final URL after redirects. Relative links resolve against this.
    pub final_url: Url,

    /// Time taken to produce the page in milliseconds.
    pub render_time_ms: u64,
}

/// Produces page snapshots for the crawl controller.
#[async_trait::async_trait]
pub trait DocumentSource: Send + Sync {
    /// Navigate to `url` and return its HTML.
    async fn navigate(&self, url: &Url) -> Result<RenderedPage, SourceError>;
}

/// Static HTML source backed by [`FetchClient`].
pub struct HttpSource {
    client: Arc<FetchClient>,
}

impl HttpSource {
    pub fn new(client: Arc<FetchClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl DocumentSource for HttpSource {
    async fn navigate(&self, url: &Url) -> Result<RenderedPage, SourceError> {
        let response = self.client.fetch_page(url.as_str()).await?;

        if let Some(content_type) = &response.content_type
            && !content_type.contains("html")
        {
            tracing::warn!(page = %url, content_type = %content_type, "page is not html");
        }

        let html = response.text();
        Ok(RenderedPage { html, final_url: response.final_url, render_time_ms: response.fetch_ms })
    }
}
