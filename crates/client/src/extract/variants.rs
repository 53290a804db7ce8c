//! Splits an ability blob into per-variant groups and a base group.
//!
//! Marker lines look like `Galarian Form Abilities: Thick Fat` or
//! `Therian Forme Ability:`. A variant chunk runs from its marker up to the
//! next marker, closing early right after its first `Hidden Ability:` line.
//! Whatever is left between chunks belongs to the base form. Variant groups
//! are emitted from the last marker on the page back to the first.

use dexcrawl_core::record::{AbilitySet, NORMAL_VARIANT};
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// Prefix of the line naming a group's hidden ability.
pub const HIDDEN_MARKER: &str = "Hidden Ability:";

const MARKER_PATTERN: &str = r"^(?P<label>.+? Forme?) Abilit(?:y|ies):\s*(?P<rest>.*)$";

static MARKER: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(MARKER_PATTERN).ok());

/// A contiguous slice of the input lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Variant label, or `None` for base-form lines.
    pub variant: Option<String>,
    pub span: Range<usize>,
}

/// Result of splitting one ability blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    /// Segments in input order. Together they cover every line exactly once.
    pub segments: Vec<Segment>,
    /// Variant groups, last marker first.
    pub variants: Vec<AbilitySet>,
    pub base: AbilitySet,
}

impl Split {
    /// Variant groups first, then the base group.
    pub fn into_sets(self) -> Vec<AbilitySet> {
        let mut sets = self.variants;
        sets.push(self.base);
        sets
    }
}

struct Marker {
    index: usize,
    label: String,
    rest: String,
}

fn find_markers(lines: &[String]) -> Vec<Marker> {
    let Some(re) = MARKER.as_ref() else {
        tracing::error!(pattern = MARKER_PATTERN, "variant marker pattern failed to compile");
        return Vec::new();
    };
    lines
        .iter()
        .enumerate()
        .filter_map(|(index, line)| {
            let caps = re.captures(line.trim())?;
            Some(Marker { index, label: caps["label"].trim().to_string(), rest: caps["rest"].trim().to_string() })
        })
        .collect()
}

/// Partition `lines` into variant groups and a base group.
pub fn split(lines: &[String]) -> Split {
    let markers = find_markers(lines);
    let mut segments = Vec::with_capacity(markers.len() * 2 + 1);
    let mut variants = Vec::with_capacity(markers.len());
    let mut cursor = 0;

    for (i, marker) in markers.iter().enumerate() {
        if cursor < marker.index {
            segments.push(Segment { variant: None, span: cursor..marker.index });
        }

        let limit = markers.get(i + 1).map_or(lines.len(), |next| next.index);
        let end = (marker.index + 1..limit)
            .find(|&j| lines[j].contains(HIDDEN_MARKER))
            .map_or(limit, |j| j + 1);

        let mut group = Vec::with_capacity(end - marker.index);
        if !marker.rest.is_empty() {
            group.push(marker.rest.clone());
        }
        group.extend(lines[marker.index + 1..end].iter().cloned());
        variants.push(ability_set(&marker.label, group));

        segments.push(Segment { variant: Some(marker.label.clone()), span: marker.index..end });
        cursor = end;
    }

    variants.reverse();

    if cursor < lines.len() {
        segments.push(Segment { variant: None, span: cursor..lines.len() });
    }

    let base_lines = segments
        .iter()
        .filter(|s| s.variant.is_none())
        .flat_map(|s| lines[s.span.clone()].iter().cloned())
        .collect();
    let base = ability_set(NORMAL_VARIANT, base_lines);

    Split { segments, variants, base }
}

/// Build a group, moving a trailing hidden-ability line into `hidden`.
fn ability_set(variant: &str, mut abilities: Vec<String>) -> AbilitySet {
    let hidden = match abilities.last() {
        Some(last) if last.contains(HIDDEN_MARKER) => abilities
            .pop()
            .and_then(|line| line.split_once(HIDDEN_MARKER).map(|(_, name)| name.trim().to_string())),
        _ => None,
    };
    AbilitySet { variant: variant.to_string(), abilities, hidden }
}
