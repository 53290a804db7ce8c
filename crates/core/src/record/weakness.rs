use serde::{Deserialize, Serialize};

/// Elemental categories in the order the source lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl Element {
    /// Canonical order. Weakness rows are decoded positionally against it.
    pub const ALL: [Element; 18] = [
        Element::Normal,
        Element::Fire,
        Element::Water,
        Element::Electric,
        Element::Grass,
        Element::Ice,
        Element::Fighting,
        Element::Poison,
        Element::Ground,
        Element::Flying,
        Element::Psychic,
        Element::Bug,
        Element::Rock,
        Element::Ghost,
        Element::Dragon,
        Element::Dark,
        Element::Steel,
        Element::Fairy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Element::Normal => "normal",
            Element::Fire => "fire",
            Element::Water => "water",
            Element::Electric => "electric",
            Element::Grass => "grass",
            Element::Ice => "ice",
            Element::Fighting => "fighting",
            Element::Poison => "poison",
            Element::Ground => "ground",
            Element::Flying => "flying",
            Element::Psychic => "psychic",
            Element::Bug => "bug",
            Element::Rock => "rock",
            Element::Ghost => "ghost",
            Element::Dragon => "dragon",
            Element::Dark => "dark",
            Element::Steel => "steel",
            Element::Fairy => "fairy",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected} weakness cells, found {found}")]
pub struct CellCountMismatch {
    pub expected: usize,
    pub found: usize,
}

/// Damage multipliers taken per element.
///
/// Values are kept as the source prints them ("2", "0.5", "0.25", "0").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaknessVector {
    pub normal: String,
    pub fire: String,
    pub water: String,
    pub electric: String,
    pub grass: String,
    pub ice: String,
    pub fighting: String,
    pub poison: String,
    pub ground: String,
    pub flying: String,
    pub psychic: String,
    pub bug: String,
    pub rock: String,
    pub ghost: String,
    pub dragon: String,
    pub dark: String,
    pub steel: String,
    pub fairy: String,
}

impl WeaknessVector {
    /// Assign cells positionally to [`Element::ALL`].
    ///
    /// The cell count must be exactly 18: a shifted row would silently move
    /// every multiplier onto the wrong element. The `*` the source prints in
    /// front of each multiplier is dropped.
    pub fn from_cells<S: AsRef<str>>(cells: &[S]) -> Result<Self, CellCountMismatch> {
        if cells.len() != Element::ALL.len() {
            return Err(CellCountMismatch { expected: Element::ALL.len(), found: cells.len() });
        }
        let at = |e: Element| cells[e as usize].as_ref().trim().trim_start_matches('*').trim().to_string();

        Ok(Self {
            normal: at(Element::Normal),
            fire: at(Element::Fire),
            water: at(Element::Water),
            electric: at(Element::Electric),
            grass: at(Element::Grass),
            ice: at(Element::Ice),
            fighting: at(Element::Fighting),
            poison: at(Element::Poison),
            ground: at(Element::Ground),
            flying: at(Element::Flying),
            psychic: at(Element::Psychic),
            bug: at(Element::Bug),
            rock: at(Element::Rock),
            ghost: at(Element::Ghost),
            dragon: at(Element::Dragon),
            dark: at(Element::Dark),
            steel: at(Element::Steel),
            fairy: at(Element::Fairy),
        })
    }

    pub fn get(&self, element: Element) -> &str {
        match element {
            Element::Normal => &self.normal,
            Element::Fire => &self.fire,
            Element::Water => &self.water,
            Element::Electric => &self.electric,
            Element::Grass => &self.grass,
            Element::Ice => &self.ice,
            Element::Fighting => &self.fighting,
            Element::Poison => &self.poison,
            Element::Ground => &self.ground,
            Element::Flying => &self.flying,
            Element::Psychic => &self.psychic,
            Element::Bug => &self.bug,
            Element::Rock => &self.rock,
            Element::Ghost => &self.ghost,
            Element::Dragon => &self.dragon,
            Element::Dark => &self.dark,
            Element::Steel => &self.steel,
            Element::Fairy => &self.fairy,
        }
    }

    /// Multipliers in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Element, &str)> {
        Element::ALL.into_iter().map(move |e| (e, self.get(e)))
    }
}
