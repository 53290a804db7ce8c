//! Seams between the crawl controller and its side effects.

use crate::fetch::FetchClient;
use bytes::Bytes;
use dexcrawl_core::record::{EntityRecord, MoveRecord};
use dexcrawl_core::{DexDb, Error};
use url::Url;

/// Receives each assembled entity record, in traversal order.
///
/// No idempotency is assumed: saving the same record twice stores it twice.
#[async_trait::async_trait]
pub trait RecordSink: Send + Sync {
    async fn save(&self, record: &EntityRecord) -> Result<i64, Error>;
}

/// Receives one generation of the move catalog at a time.
#[async_trait::async_trait]
pub trait MoveSink: Send + Sync {
    async fn save_moves(&self, generation: &str, moves: &[MoveRecord]) -> Result<usize, Error>;
}

/// Downloads binary assets such as sprites.
#[async_trait::async_trait]
pub trait AssetFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<Bytes, Error>;
}

#[async_trait::async_trait]
impl RecordSink for DexDb {
    async fn save(&self, record: &EntityRecord) -> Result<i64, Error> {
        self.insert_entity(record).await
    }
}

#[async_trait::async_trait]
impl MoveSink for DexDb {
    async fn save_moves(&self, generation: &str, moves: &[MoveRecord]) -> Result<usize, Error> {
        self.insert_moves(generation, moves).await
    }
}

#[async_trait::async_trait]
impl AssetFetcher for FetchClient {
    async fn fetch(&self, url: &Url) -> Result<Bytes, Error> {
        self.fetch_asset(url.as_str()).await.map(|response| response.bytes)
    }
}
