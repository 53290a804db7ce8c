//! dexcrawl entry point.
//!
//! Loads configuration, opens the record store, optionally crawls the move
//! catalog, then walks the entity chain from the configured start page.
//! Logs go to stderr as JSON; filter with `RUST_LOG`.

use anyhow::{Context, Result};
use dexcrawl_client::crawl::sink::{AssetFetcher, MoveSink, RecordSink};
use dexcrawl_client::{Assembler, Crawler, DocumentSource, FetchClient, FetchConfig, HttpSource, SpriteDownloader};
use dexcrawl_core::{AppConfig, DexDb, Error};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use url::Url;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load().context("loading configuration")?;
    tracing::info!(start_url = %config.start_url, db_path = %config.db_path.display(), "starting dexcrawl");

    let db = Arc::new(DexDb::open(&config.db_path).await.context("opening record store")?);
    let fetch = Arc::new(FetchClient::new(FetchConfig::from(&config))?);
    let source = document_source(&config, &fetch).await?;

    if config.catalog_enabled {
        let moves: &dyn MoveSink = db.as_ref();
        let catalog =
            dexcrawl_client::crawl_catalog(source.as_ref(), moves, &config.catalog_base_url, config.generations).await?;
        let total: usize = catalog.values().map(Vec::len).sum();
        tracing::info!(generations = catalog.len(), moves = total, "move catalog stored");
    }

    let start = Url::parse(&config.start_url).context("parsing start_url")?;
    let records: Arc<dyn RecordSink> = db;
    let assets: Arc<dyn AssetFetcher> = fetch;
    let sprites = SpriteDownloader::new(assets, &config.asset_dir, &config.asset_prefix);
    let assembler = Assembler::new(records).with_sprites(sprites);

    let report = Crawler::new(source, assembler)
        .with_max_pages(config.max_pages)
        .run(start)
        .await?;

    tracing::info!(
        pages = report.pages,
        saved = report.saved,
        incomplete = report.incomplete,
        skipped = report.skipped,
        save_failures = report.save_failures,
        sprites_written = report.sprites.written,
        sprites_failed = report.sprites.failed,
        "run complete"
    );

    Ok(())
}

#[cfg(feature = "render")]
async fn document_source(config: &AppConfig, fetch: &Arc<FetchClient>) -> Result<Arc<dyn DocumentSource>> {
    use dexcrawl_client::{HeadlessOptions, HeadlessSource};

    if config.render_enabled {
        let source = HeadlessSource::launch(HeadlessOptions::from(config))
            .await
            .map_err(Error::from)?;
        tracing::info!("using headless browser source");
        return Ok(Arc::new(source));
    }
    Ok(Arc::new(HttpSource::new(Arc::clone(fetch))))
}

#[cfg(not(feature = "render"))]
async fn document_source(config: &AppConfig, fetch: &Arc<FetchClient>) -> Result<Arc<dyn DocumentSource>> {
    if config.render_enabled {
        return Err(Error::RenderDisabled.into());
    }
    Ok(Arc::new(HttpSource::new(Arc::clone(fetch))))
}
