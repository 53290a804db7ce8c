//! Sprite downloads.
//!
//! Downloads run as spawned tasks so a slow image never holds up the next
//! page. The crawl drains them before it returns.

use super::sink::AssetFetcher;
use dexcrawl_core::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;
use url::Url;

/// Outcome counts from [`SpriteDownloader::drain`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainReport {
    pub written: usize,
    pub failed: usize,
}

pub struct SpriteDownloader {
    fetcher: Arc<dyn AssetFetcher>,
    dir: PathBuf,
    prefix: String,
    tasks: JoinSet<bool>,
}

impl SpriteDownloader {
    pub fn new(fetcher: Arc<dyn AssetFetcher>, dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self { fetcher, dir: dir.into(), prefix: prefix.into(), tasks: JoinSet::new() }
    }

    /// Start downloading `url` in the background.
    pub fn spawn(&mut self, url: Url) {
        let Some(file_name) = sprite_file_name(&url, &self.prefix) else {
            tracing::warn!(sprite = %url, "sprite URL has no file name");
            return;
        };
        let path = self.dir.join(file_name);
        let fetcher = Arc::clone(&self.fetcher);

        self.tasks.spawn(async move {
            match download(fetcher.as_ref(), &url, &path).await {
                Ok(()) => {
                    tracing::debug!(sprite = %url, path = %path.display(), "sprite written");
                    true
                }
                Err(e) => {
                    tracing::warn!(sprite = %url, error = %e, "sprite download failed");
                    false
                }
            }
        });
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Wait for every outstanding download.
    pub async fn drain(&mut self) -> DrainReport {
        let mut report = DrainReport::default();
        while let Some(joined) = self.tasks.join_next().await {
            match joined {
                Ok(true) => report.written += 1,
                Ok(false) => report.failed += 1,
                Err(e) => {
                    tracing::warn!("sprite task panicked: {e}");
                    report.failed += 1;
                }
            }
        }
        report
    }
}

async fn download(fetcher: &dyn AssetFetcher, url: &Url, path: &Path) -> Result<(), Error> {
    let bytes = fetcher.fetch(url).await?;
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::AssetFailed(format!("{}: {e}", parent.display())))?;
    }
    tokio::fs::write(path, &bytes)
        .await
        .map_err(|e| Error::AssetFailed(format!("{}: {e}", path.display())))
}

/// File name for a sprite: the URL with `prefix` removed, or its last path segment.
pub fn sprite_file_name(url: &Url, prefix: &str) -> Option<String> {
    if !prefix.is_empty()
        && let Some(rest) = url.as_str().strip_prefix(prefix)
        && !rest.is_empty()
        && !rest.contains('/')
    {
        return Some(rest.to_string());
    }

    url.path_segments()?
        .next_back()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}
