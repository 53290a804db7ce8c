//! In-memory doubles for crawl tests.

use crate::source::{DocumentSource, RenderedPage, SourceError};
use dexcrawl_core::Error;
use dexcrawl_core::record::EntityRecord;
use std::collections::HashMap;
use std::sync::Mutex;
use url::Url;

use super::sink::RecordSink;

/// Serves fixed HTML per URL. Unknown URLs fail navigation.
#[derive(Default)]
pub struct StaticSource {
    pages: HashMap<String, String>,
    visited: Mutex<Vec<String>>,
}

impl StaticSource {
    pub fn with_page(mut self, url: &str, html: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), html.into());
        self
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl DocumentSource for StaticSource {
    async fn navigate(&self, url: &Url) -> Result<RenderedPage, SourceError> {
        self.visited.lock().unwrap().push(url.to_string());
        match self.pages.get(url.as_str()) {
            Some(html) => Ok(RenderedPage { html: html.clone(), final_url: url.clone(), render_time_ms: 0 }),
            None => Err(SourceError::Navigation(format!("net::ERR_NAME_NOT_RESOLVED at {url}"))),
        }
    }
}

/// Keeps saved records in memory.
#[derive(Default)]
pub struct MemorySink {
    pub records: Mutex<Vec<EntityRecord>>,
}

#[async_trait::async_trait]
impl RecordSink for MemorySink {
    async fn save(&self, record: &EntityRecord) -> Result<i64, Error> {
        let mut records = self.records.lock().unwrap();
        records.push(record.clone());
        Ok(records.len() as i64)
    }
}

/// Minimal entity page: title, one type, one ability, optional next link.
pub fn entity_page(dex_no: u32, name: &str, next: Option<&str>) -> String {
    let next = next
        .map(|href| {
            format!(
                r#"<div id="rbar"><table class="tooltab"><tbody><tr><td></td><td></td><td></td></tr>
                <tr><td></td><td></td><td><a href="{href}">next</a></td></tr></tbody></table></div>"#
            )
        })
        .unwrap_or_default();

    format!(
        r#"<html><body><div id="content"><main>
        <div><h1>#{dex_no:03} {name}</h1></div>
        <div>
          <table class="dextable"><tbody>
            <tr><td>Name</td><td>Other Names</td><td>No.</td><td>Gender</td><td>Type</td></tr>
            <tr><td>{name}</td><td>-</td><td>#{dex_no:03}</td><td>50%</td><td><a href="/t"><img alt="Normal-type"></a></td></tr>
          </tbody></table>
          <table class="dextable"><tbody><tr><td>Abilities</td></tr><tr><td>Run Away</td></tr></tbody></table>
        </div>
        </main></div>{next}</body></html>"#
    )
}
