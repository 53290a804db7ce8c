//! Client code for dexcrawl.
//!
//! This crate provides the document sources, page query layer, section
//! parsers and the crawl controller that ties them to a record sink.

pub mod crawl;
pub mod dom;
pub mod extract;
pub mod fetch;
pub mod source;

pub use crawl::{Assembler, CrawlReport, CrawlState, Crawler, SpriteDownloader, crawl_catalog};
pub use dom::{DexPage, Locator, TableDecoder};
pub use extract::{PageExtract, ParseError, extract_page};
pub use fetch::{FetchClient, FetchConfig, FetchResponse};
pub use source::{DocumentSource, HttpSource, RenderedPage, SourceError};

#[cfg(feature = "render")]
pub use source::{HeadlessOptions, HeadlessSource};
