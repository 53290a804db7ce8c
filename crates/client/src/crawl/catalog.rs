//! Generation-indexed move catalog crawl.

use super::sink::MoveSink;
use crate::dom::DexPage;
use crate::extract::decode_catalog;
use crate::fetch::canonicalize;
use crate::source::DocumentSource;
use dexcrawl_core::Error;
use dexcrawl_core::record::{MoveCatalog, MoveRecord, generation_label};

/// Visit `<base_url><n>` for each generation `1..=generations`.
///
/// Each generation is handed to `sink` as soon as it is decoded. A sink
/// failure is logged and the generation is still returned; a navigation
/// failure aborts the crawl.
pub async fn crawl_catalog(
    source: &dyn DocumentSource, sink: &dyn MoveSink, base_url: &str, generations: u8,
) -> Result<MoveCatalog, Error> {
    let mut catalog = MoveCatalog::new();

    for generation in 1..=generations {
        let url = canonicalize(&format!("{base_url}{generation}")).map_err(|e| Error::InvalidUrl(e.to_string()))?;
        let page = source.navigate(&url).await?;
        let moves: Vec<MoveRecord> = decode_catalog(&DexPage::from_rendered(&page), generation);

        let label = generation_label(generation);
        if let Err(e) = sink.save_moves(&label, &moves).await {
            tracing::error!(generation = %label, error = %e, "catalog save failed");
        }

        tracing::info!(generation = %label, moves = moves.len(), "catalog generation done");
        catalog.insert(label, moves);
    }

    Ok(catalog)
}
