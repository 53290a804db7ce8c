//! Page-to-page traversal.
//!
//! The controller is a small state machine. It loads a page (`Advancing`),
//! decodes and commits it (`AtPage`), then follows the page's next link. A
//! page without one, or whose next link points at a page already visited,
//! ends the run in `Done`. A navigation failure ends it in
//! `Failed` and the error is returned. Pages are visited strictly one at a
//! time and records are committed in visit order.

pub mod assemble;
pub mod assets;
pub mod catalog;
pub mod sink;

#[cfg(test)]
pub(crate) mod testing;

pub use assemble::{Assembler, assemble};
pub use assets::{DrainReport, SpriteDownloader, sprite_file_name};
pub use catalog::crawl_catalog;
pub use sink::{AssetFetcher, MoveSink, RecordSink};

use crate::dom::DexPage;
use crate::extract::extract_page;
use crate::source::{DocumentSource, RenderedPage};
use dexcrawl_core::Error;
use dexcrawl_core::record::EntityRecord;
use std::collections::HashSet;
use std::sync::Arc;
use url::Url;

/// Controller states.
#[derive(Debug)]
pub enum CrawlState {
    /// A page is loaded and waiting to be decoded.
    AtPage(RenderedPage),
    /// Navigating to the next page.
    Advancing(Url),
    /// End of the chain.
    Done,
    /// Navigation failed; the run aborts with this error.
    Failed(Error),
}

/// Position in the page chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalCursor {
    pub url: Url,
    pub visits: usize,
    pub terminal: bool,
    /// Requested and final URLs of every page loaded so far.
    seen: HashSet<Url>,
}

impl TraversalCursor {
    fn new(url: Url) -> Self {
        Self { url, visits: 0, terminal: false, seen: HashSet::new() }
    }

    fn arrive(&mut self, requested: Url, url: Url) {
        self.seen.insert(requested);
        self.seen.insert(url.clone());
        self.url = url;
        self.visits += 1;
    }

    /// Whether `url` was already loaded in this run.
    pub fn has_seen(&self, url: &Url) -> bool {
        self.seen.contains(url)
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    /// Pages loaded.
    pub pages: usize,
    /// Records the sink accepted.
    pub saved: usize,
    /// Saved records missing base-form types or abilities.
    pub incomplete: usize,
    /// Pages that produced no record.
    pub skipped: usize,
    /// Records the sink rejected.
    pub save_failures: usize,
    pub sprites: DrainReport,
    /// Last page visited.
    pub last_url: Option<String>,
}

pub struct Crawler {
    source: Arc<dyn DocumentSource>,
    assembler: Assembler,
    max_pages: Option<usize>,
}

impl Crawler {
    pub fn new(source: Arc<dyn DocumentSource>, assembler: Assembler) -> Self {
        Self { source, assembler, max_pages: None }
    }

    /// Stop after this many pages.
    pub fn with_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Follow the chain from `start` until it ends.
    pub async fn run(&mut self, start: Url) -> Result<CrawlReport, Error> {
        let mut report = CrawlReport::default();
        let mut cursor = TraversalCursor::new(start.clone());
        let mut state = CrawlState::Advancing(start);

        let outcome = loop {
            state = match state {
                CrawlState::Advancing(url) => match self.source.navigate(&url).await {
                    Ok(page) => {
                        cursor.arrive(url, page.final_url.clone());
                        CrawlState::AtPage(page)
                    }
                    Err(e) => CrawlState::Failed(Error::from(e)),
                },
                CrawlState::AtPage(page) => {
                    report.pages += 1;
                    report.last_url = Some(cursor.url.to_string());

                    let (record, next) = decode(&page);
                    match record {
                        Some(record) => self.commit(&record, &mut report).await,
                        None => {
                            tracing::warn!(page = %cursor.url, "page has no identity, skipping");
                            report.skipped += 1;
                        }
                    }

                    self.advance(&cursor, next)
                }
                CrawlState::Done => break Ok(()),
                CrawlState::Failed(e) => {
                    tracing::error!(page = %cursor.url, visits = cursor.visits, error = %e, "crawl failed");
                    break Err(e);
                }
            };
        };

        cursor.terminal = true;
        report.sprites = self.assembler.finish().await;
        tracing::debug!(page = %cursor.url, visits = cursor.visits, terminal = cursor.terminal, "cursor released");

        outcome.map(|()| {
            tracing::info!(
                pages = report.pages,
                saved = report.saved,
                skipped = report.skipped,
                save_failures = report.save_failures,
                "crawl done"
            );
            report
        })
    }

    async fn commit(&mut self, record: &EntityRecord, report: &mut CrawlReport) {
        match self.assembler.commit(record).await {
            Some(_) => {
                report.saved += 1;
                if !record.is_complete() {
                    report.incomplete += 1;
                }
            }
            None => report.save_failures += 1,
        }
    }

    fn advance(&self, cursor: &TraversalCursor, next: Option<Url>) -> CrawlState {
        match next {
            None => {
                tracing::info!(page = %cursor.url, visits = cursor.visits, "no next link, end of chain");
                CrawlState::Done
            }
            Some(url) if cursor.has_seen(&url) => {
                tracing::info!(
                    page = %cursor.url,
                    next = %url,
                    visits = cursor.visits,
                    "next link already visited, end of chain"
                );
                CrawlState::Done
            }
            Some(_) if self.max_pages.is_some_and(|max| cursor.visits >= max) => {
                tracing::info!(visits = cursor.visits, "page limit reached");
                CrawlState::Done
            }
            Some(url) => {
                tracing::debug!(from = %cursor.url, to = %url, "advancing");
                CrawlState::Advancing(url)
            }
        }
    }
}

/// Decode a loaded page into its record and next link.
fn decode(page: &RenderedPage) -> (Option<EntityRecord>, Option<Url>) {
    let dom = DexPage::from_rendered(page);
    let mut extract = extract_page(&dom);
    let next = extract.next.take();
    (assemble(dom.url(), &page.html, extract), next)
}
