//! Normalized records produced by the extraction engine.
//!
//! Records are plain values: built once per page visit, handed to a sink and
//! dropped. Optional fields model "section absent on the source page".

mod entity;
mod moves;
mod weakness;

pub use entity::{AbilitySet, EntityRecord, Identity, NORMAL_VARIANT, TypeCountError, VariantTypes};
pub use moves::{MoveCatalog, MoveEntry, MoveRecord, MovesetGroup, generation_label};
pub use weakness::{CellCountMismatch, Element, WeaknessVector};
