//! Headless Chrome/Chromium source using chromiumoxide.

use super::{DocumentSource, RenderedPage, SourceError};
use std::time::{Duration, Instant};
use url::Url;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Options for headless navigation.
#[derive(Debug, Clone)]
pub struct HeadlessOptions {
    /// Navigation timeout in milliseconds (default: 20000).
    pub timeout_ms: u64,

    /// Bound on the `wait_for` poll in milliseconds (default: 1000).
    pub query_timeout_ms: u64,

    /// Optional CSS selector to wait for before taking the snapshot.
    pub wait_for: Option<String>,
}

impl Default for HeadlessOptions {
    fn default() -> Self {
        Self { timeout_ms: 20000, query_timeout_ms: 1000, wait_for: Some("#content main".to_string()) }
    }
}

impl From<&dexcrawl_core::AppConfig> for HeadlessOptions {
    fn from(config: &dexcrawl_core::AppConfig) -> Self {
        Self { timeout_ms: config.timeout_ms, query_timeout_ms: config.query_timeout_ms, ..Default::default() }
    }
}

/// Document source that renders each page in a headless browser.
pub struct HeadlessSource {
    browser: chromiumoxide::Browser,
    opts: HeadlessOptions,
}

impl HeadlessSource {
    /// Launch a headless browser instance.
    ///
    /// The browser uses a background task to handle Chrome DevTools Protocol events.
    pub async fn launch(opts: HeadlessOptions) -> Result<Self, SourceError> {
        use chromiumoxide::browser::{Browser, BrowserConfig};
        use futures_util::StreamExt;

        let config = BrowserConfig::builder()
            .no_sandbox()
            .arg("--disable-dev-shm-usage")
            .arg("--disable-gpu")
            .build()
            .map_err(SourceError::BrowserLaunch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| SourceError::BrowserLaunch(e.to_string()))?;

        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("browser handler event error: {e}");
                    break;
                }
            }
        });

        Ok(Self { browser, opts })
    }

    /// Poll for `selector` until it appears or the query bound elapses.
    ///
    /// Absence is not an error: parsers decide what a missing section means.
    async fn settle(&self, page: &chromiumoxide::Page, selector: &str) -> bool {
        let bound = Duration::from_millis(self.opts.query_timeout_ms);
        let found = tokio::time::timeout(bound, async {
            loop {
                if page.find_element(selector).await.is_ok() {
                    return;
                }
                tokio::time::sleep(POLL_INTERVAL).await;
            }
        })
        .await
        .is_ok();

        if !found {
            tracing::debug!(selector, bound_ms = self.opts.query_timeout_ms, "wait_for selector not present");
        }
        found
    }
}

#[async_trait::async_trait]
impl DocumentSource for HeadlessSource {
    async fn navigate(&self, url: &Url) -> Result<RenderedPage, SourceError> {
        let start = Instant::now();

        let deadline = Duration::from_millis(self.opts.timeout_ms);
        let page = tokio::time::timeout(deadline, self.browser.new_page(url.as_str()))
            .await
            .map_err(|_| SourceError::Timeout(self.opts.timeout_ms))?
            .map_err(|e| {
                let msg = e.to_string();
                if msg.contains("closed") { SourceError::BrowserClosed } else { SourceError::Navigation(msg) }
            })?;

        if let Some(selector) = &self.opts.wait_for {
            self.settle(&page, selector).await;
        }

        let html = page
            .content()
            .await
            .map_err(|e| SourceError::ContentRetrieval(e.to_string()))?;

        let page_url = page
            .url()
            .await
            .map_err(|e| SourceError::ContentRetrieval(e.to_string()))?;

        let final_url = Url::parse(page_url.as_deref().unwrap_or(url.as_str()))
            .map_err(|e| SourceError::Navigation(e.to_string()))?;

        let render_time_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(page = %final_url, render_time_ms, "rendered");

        page.close().await.ok();
        Ok(RenderedPage { html, final_url, render_time_ms })
    }
}
