use serde::{Deserialize, Serialize};

use super::{MovesetGroup, WeaknessVector};

/// Variant label used for the base form of an entity.
pub const NORMAL_VARIANT: &str = "Normal";

/// Ordinal index and display name of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// National index as printed by the source, zero padding kept (e.g. "001").
    pub dex_no: String,
    pub name: String,
}

/// Type assignment for a single variant.
///
/// An entity has one or two types; the shape makes any other count unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantTypes {
    pub variant: String,
    pub primary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
}

/// Returned when a type list does not hold one or two entries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected 1 or 2 types for {variant}, found {found}")]
pub struct TypeCountError {
    pub variant: String,
    pub found: usize,
}

impl VariantTypes {
    pub fn new(variant: impl Into<String>, primary: impl Into<String>, secondary: Option<String>) -> Self {
        Self { variant: variant.into(), primary: primary.into(), secondary }
    }

    /// Build from an ordered type list, rejecting empty and over-long lists.
    pub fn from_list(variant: impl Into<String>, types: Vec<String>) -> Result<Self, TypeCountError> {
        let variant = variant.into();
        let found = types.len();
        let mut iter = types.into_iter();
        match (iter.next(), iter.next(), iter.next()) {
            (Some(primary), secondary, None) => Ok(Self { variant, primary, secondary }),
            _ => Err(TypeCountError { variant, found }),
        }
    }

    /// Types in display order.
    pub fn types(&self) -> Vec<&str> {
        std::iter::once(self.primary.as_str()).chain(self.secondary.as_deref()).collect()
    }
}

/// Abilities available to one variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilitySet {
    pub variant: String,
    pub abilities: Vec<String>,
    pub hidden: Option<String>,
}

/// One entity's normalized record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub identity: Identity,
    pub source_url: String,
    /// SHA-256 of the page the record was decoded from.
    pub page_hash: String,
    pub types: Option<Vec<VariantTypes>>,
    pub abilities: Option<Vec<AbilitySet>>,
    pub weaknesses: Option<WeaknessVector>,
    pub classification: Option<String>,
    #[serde(default)]
    pub movesets: Vec<MovesetGroup>,
    pub sprite_url: Option<String>,
}

impl EntityRecord {
    /// A record is complete when base-form types and abilities were decoded.
    pub fn is_complete(&self) -> bool {
        let has_types = self.types.as_ref().is_some_and(|t| !t.is_empty());
        let has_base_abilities = self
            .abilities
            .as_ref()
            .is_some_and(|sets| sets.iter().any(|s| s.variant == NORMAL_VARIANT));
        has_types && has_base_abilities
    }
}
