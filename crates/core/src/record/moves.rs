use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One learnable move as listed on an entity page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEntry {
    /// Level, TM/TR number or tutor marker.
    pub acquisition: String,
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: String,
    /// Physical, Special or Status.
    pub category: String,
    pub power: String,
    pub accuracy: String,
    pub power_points: String,
    pub effect_chance: String,
    pub description: String,
}

/// Moves sharing one acquisition source, e.g. "Standard Level Up".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovesetGroup {
    pub source: String,
    pub moves: Vec<MoveEntry>,
}

/// One move from the generation-indexed move catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: String,
    pub category: String,
    pub power: String,
    pub accuracy: String,
    pub power_points: String,
    pub effect: String,
    pub intro_gen: u8,
}

/// Catalog moves keyed by generation label ("gen1", "gen2", ...).
pub type MoveCatalog = BTreeMap<String, Vec<MoveRecord>>;

/// Catalog key for a generation number.
pub fn generation_label(generation: u8) -> String {
    format!("gen{generation}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_label() {
        assert_eq!(generation_label(1), "gen1");
        assert_eq!(generation_label(8), "gen8");
    }

    #[test]
    fn test_move_type_serializes_as_type() {
        let entry = MoveEntry {
            acquisition: "—".into(),
            name: "Tackle".into(),
            move_type: "Normal".into(),
            category: "Physical".into(),
            power: "40".into(),
            accuracy: "100".into(),
            power_points: "35".into(),
            effect_chance: "--".into(),
            description: "A physical attack in which the user charges and slams into the target.".into(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "Normal");
        assert!(json.get("move_type").is_none());
    }

    #[test]
    fn test_catalog_orders_generations() {
        let mut catalog = MoveCatalog::new();
        catalog.insert(generation_label(3), Vec::new());
        catalog.insert(generation_label(1), Vec::new());
        let keys: Vec<&String> = catalog.keys().collect();
        assert_eq!(keys, vec!["gen1", "gen3"]);
    }
}
