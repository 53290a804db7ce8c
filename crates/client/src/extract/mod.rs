//! Section parsers for entity and move catalog pages.
//!
//! Each parser reads one section of a [`DexPage`] and reports one of three
//! outcomes: the decoded value, `Ok(None)` when the page has no such section,
//! or a [`ParseError`] when the section exists but has the wrong shape. A
//! failure in one section never affects the others.

pub mod abilities;
pub mod catalog;
pub mod moveset;
pub mod profile;
pub mod types;
pub mod variants;
pub mod weakness;

pub use abilities::parse_abilities;
pub use catalog::decode_catalog;
pub use moveset::{MOVESET_LABELS, MoveColumn, decode_moveset, parse_moveset};
pub use profile::{parse_classification, parse_identity, parse_next_link, parse_sprite};
pub use types::parse_types;
pub use variants::{Split, split};
pub use weakness::parse_weakness;

use crate::dom::DexPage;
use dexcrawl_core::record::{AbilitySet, Identity, MovesetGroup, VariantTypes, WeaknessVector};
use thiserror::Error;
use url::Url;

/// Anchor shared by the entity page's data tables.
pub(crate) const DEXTABLE: &str = "table.dextable > tbody";

/// A located section did not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("{section}: {reason}")]
    Structural { section: &'static str, reason: String },

    #[error("decode mismatch: {0}")]
    DecodeMismatch(String),
}

impl ParseError {
    pub(crate) fn structural(section: &'static str, reason: impl Into<String>) -> Self {
        ParseError::Structural { section, reason: reason.into() }
    }
}

/// Everything decoded from one entity page.
#[derive(Debug, Clone, Default)]
pub struct PageExtract {
    pub identity: Option<Identity>,
    pub types: Option<Vec<VariantTypes>>,
    pub abilities: Option<Vec<AbilitySet>>,
    pub weaknesses: Option<WeaknessVector>,
    pub classification: Option<String>,
    pub movesets: Vec<MovesetGroup>,
    pub sprite: Option<Url>,
    pub next: Option<Url>,
}

/// Run every section parser over `page`.
pub fn extract_page(page: &DexPage) -> PageExtract {
    let movesets = MOVESET_LABELS
        .iter()
        .filter_map(|label| optional(page, "moveset", parse_moveset(page, label)))
        .collect();

    PageExtract {
        identity: required(page, "identity", parse_identity(page)),
        types: required(page, "types", parse_types(page)),
        abilities: required(page, "abilities", parse_abilities(page)),
        weaknesses: optional(page, "weakness", parse_weakness(page)),
        classification: parse_classification(page),
        movesets,
        sprite: optional(page, "sprite", parse_sprite(page)),
        next: optional(page, "next", parse_next_link(page)),
    }
}

/// Settle a section every complete record needs. Absence is worth a warning.
fn required<T>(page: &DexPage, section: &'static str, result: Result<Option<T>, ParseError>) -> Option<T> {
    match result {
        Ok(Some(value)) => Some(value),
        Ok(None) => {
            tracing::warn!(page = %page.url(), section, "section not found");
            None
        }
        Err(e) => {
            tracing::warn!(page = %page.url(), section, error = %e, "section failed to parse");
            None
        }
    }
}

fn optional<T>(page: &DexPage, section: &'static str, result: Result<Option<T>, ParseError>) -> Option<T> {
    match result {
        Ok(value) => {
            if value.is_none() {
                tracing::debug!(page = %page.url(), section, "section absent");
            }
            value
        }
        Err(e) => {
            tracing::warn!(page = %page.url(), section, error = %e, "section failed to parse");
            None
        }
    }
}

/// Strip the `-type` suffix the source appends to type icon text.
pub(crate) fn strip_type_suffix(raw: &str) -> &str {
    let raw = raw.trim();
    raw.strip_suffix("-type").unwrap_or(raw).trim()
}
