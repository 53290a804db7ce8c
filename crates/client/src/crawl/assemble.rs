//! Record assembly and hand-off.

use super::assets::SpriteDownloader;
use super::sink::RecordSink;
use crate::extract::PageExtract;
use dexcrawl_core::record::EntityRecord;
use dexcrawl_core::store::page_digest;
use std::sync::Arc;
use url::Url;

/// Compose one page's sections into a record.
///
/// A page without an identity yields no record.
pub fn assemble(page_url: &Url, html: &str, extract: PageExtract) -> Option<EntityRecord> {
    let identity = extract.identity?;
    Some(EntityRecord {
        identity,
        source_url: page_url.to_string(),
        page_hash: page_digest(page_url.as_str(), html),
        types: extract.types,
        abilities: extract.abilities,
        weaknesses: extract.weaknesses,
        classification: extract.classification,
        movesets: extract.movesets,
        sprite_url: extract.sprite.map(|url| url.to_string()),
    })
}

/// Forwards records to the sink and queues their sprites.
pub struct Assembler {
    sink: Arc<dyn RecordSink>,
    sprites: Option<SpriteDownloader>,
}

impl Assembler {
    pub fn new(sink: Arc<dyn RecordSink>) -> Self {
        Self { sink, sprites: None }
    }

    pub fn with_sprites(mut self, downloader: SpriteDownloader) -> Self {
        self.sprites = Some(downloader);
        self
    }

    /// Save `record` and queue its sprite.
    ///
    /// Returns the row id, or `None` when the save failed. A failed save is
    /// logged and does not stop the crawl.
    pub async fn commit(&mut self, record: &EntityRecord) -> Option<i64> {
        let saved = match self.sink.save(record).await {
            Ok(id) => {
                tracing::info!(
                    dex_no = %record.identity.dex_no,
                    name = %record.identity.name,
                    id,
                    complete = record.is_complete(),
                    "entity saved"
                );
                Some(id)
            }
            Err(e) => {
                tracing::error!(page = %record.source_url, error = %e, "entity save failed");
                None
            }
        };

        if let (Some(sprites), Some(sprite)) = (self.sprites.as_mut(), record.sprite_url.as_deref()) {
            match Url::parse(sprite) {
                Ok(url) => sprites.spawn(url),
                Err(e) => tracing::warn!(page = %record.source_url, sprite, "invalid sprite URL: {e}"),
            }
        }

        saved
    }

    /// Wait for outstanding sprite downloads.
    pub async fn finish(&mut self) -> super::assets::DrainReport {
        match self.sprites.as_mut() {
            Some(sprites) => {
                tracing::debug!(pending = sprites.pending(), "draining sprite downloads");
                sprites.drain().await
            }
            None => Default::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dexcrawl_core::record::{Identity, NORMAL_VARIANT, VariantTypes};
    use dexcrawl_core::{DexDb, Error};

    fn url() -> Url {
        Url::parse("https://www.serebii.net/pokedex-swsh/bulbasaur/").unwrap()
    }

    fn extract() -> PageExtract {
        PageExtract {
            identity: Some(Identity { dex_no: "001".into(), name: "Bulbasaur".into() }),
            types: Some(vec![VariantTypes::new(NORMAL_VARIANT, "Grass", Some("Poison".into()))]),
            sprite: Some(Url::parse("https://www.serebii.net/swordshield/pokemon/001.png").unwrap()),
            ..Default::default()
        }
    }

    struct BrokenSink;

    #[async_trait::async_trait]
    impl RecordSink for BrokenSink {
        async fn save(&self, _record: &EntityRecord) -> Result<i64, Error> {
            Err(Error::Encode("record rejected".into()))
        }
    }

    #[test]
    fn test_assemble_composes_record() {
        let record = assemble(&url(), "<html></html>", extract()).unwrap();
        assert_eq!(record.identity.name, "Bulbasaur");
        assert_eq!(record.source_url, "https://www.serebii.net/pokedex-swsh/bulbasaur/");
        assert_eq!(record.page_hash.len(), 64);
        assert_eq!(record.sprite_url.as_deref(), Some("https://www.serebii.net/swordshield/pokemon/001.png"));
        assert!(record.abilities.is_none());
        assert!(!record.is_complete());
    }

    #[test]
    fn test_assemble_without_identity() {
        let extract = PageExtract { identity: None, ..extract() };
        assert!(assemble(&url(), "", extract).is_none());
    }

    #[tokio::test]
    async fn test_commit_saves_record() {
        let db = Arc::new(DexDb::open_in_memory().await.unwrap());
        let mut assembler = Assembler::new(db.clone());
        let record = assemble(&url(), "<html></html>", extract()).unwrap();

        assert!(assembler.commit(&record).await.is_some());
        assert_eq!(db.count_entities().await.unwrap(), 1);
        assert_eq!(assembler.finish().await, Default::default());
    }

    #[tokio::test]
    async fn test_commit_survives_sink_failure() {
        let mut assembler = Assembler::new(Arc::new(BrokenSink));
        let record = assemble(&url(), "<html></html>", extract()).unwrap();
        assert_eq!(assembler.commit(&record).await, None);
    }
}
