//! Level-up movesets.
//!
//! A moveset table flattens to the group label followed by rows of nine
//! cells, read through [`MoveColumn`].

use super::{DEXTABLE, ParseError, strip_type_suffix};
use crate::dom::{DexPage, Locator, TableDecoder};
use dexcrawl_core::record::{MoveEntry, MovesetGroup};

/// Moveset groups looked for on every entity page, in output order.
pub const MOVESET_LABELS: [&str; 3] = ["Standard Level Up", "Galarian Form Level Up", "Alola Form Level Up"];

/// Cells per move row.
pub const ROW_WIDTH: usize = MoveColumn::ALL.len();

/// Columns of one move row, in source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveColumn {
    Acquisition,
    Name,
    Type,
    Category,
    Power,
    Accuracy,
    PowerPoints,
    EffectChance,
    Description,
}

impl MoveColumn {
    pub const ALL: [MoveColumn; 9] = [
        MoveColumn::Acquisition,
        MoveColumn::Name,
        MoveColumn::Type,
        MoveColumn::Category,
        MoveColumn::Power,
        MoveColumn::Accuracy,
        MoveColumn::PowerPoints,
        MoveColumn::EffectChance,
        MoveColumn::Description,
    ];
}

/// One validated row of [`ROW_WIDTH`] cells.
struct MoveRow<'a>(&'a [String]);

impl MoveRow<'_> {
    fn get(&self, column: MoveColumn) -> &str {
        &self.0[column as usize]
    }

    fn into_entry(self) -> MoveEntry {
        let name = self.get(MoveColumn::Name);
        MoveEntry {
            acquisition: self.get(MoveColumn::Acquisition).to_string(),
            name: name.to_string(),
            move_type: normalize_type(name, self.get(MoveColumn::Type)),
            category: normalize_category(name, self.get(MoveColumn::Category)),
            power: self.get(MoveColumn::Power).to_string(),
            accuracy: self.get(MoveColumn::Accuracy).to_string(),
            power_points: self.get(MoveColumn::PowerPoints).to_string(),
            effect_chance: self.get(MoveColumn::EffectChance).to_string(),
            description: self.get(MoveColumn::Description).to_string(),
        }
    }
}

pub fn parse_moveset(page: &DexPage, label: &'static str) -> Result<Option<MovesetGroup>, ParseError> {
    let Some(table) = page.query_one(&Locator::new(DEXTABLE).containing(label)) else {
        return Ok(None);
    };
    let cells = TableDecoder::default().decode(table)?;
    decode_moveset(&cells).map(Some)
}

/// Decode a flattened moveset table.
pub fn decode_moveset(cells: &[String]) -> Result<MovesetGroup, ParseError> {
    let Some((source, rest)) = cells.split_first() else {
        return Err(ParseError::structural("moveset", "table has no cells"));
    };

    if rest.len() % ROW_WIDTH != 0 {
        return Err(ParseError::structural(
            "moveset",
            format!("{source}: {} cells after the label is not a multiple of {ROW_WIDTH}", rest.len()),
        ));
    }

    let moves = rest.chunks_exact(ROW_WIDTH).map(|row| MoveRow(row).into_entry()).collect();
    Ok(MovesetGroup { source: source.clone(), moves })
}

/// `"Vine Whip - Grass-type"` becomes `"Grass"`.
pub fn normalize_type(name: &str, raw: &str) -> String {
    let raw = raw.trim();
    let raw = raw.strip_prefix(&format!("{name} - ")).unwrap_or(raw);
    strip_type_suffix(raw).to_string()
}

/// `"Growl: Other Move"` becomes `"Status"`.
pub fn normalize_category(name: &str, raw: &str) -> String {
    let raw = raw.trim();
    let raw = raw.strip_prefix(&format!("{name}: ")).unwrap_or(raw);
    let category = raw.strip_suffix(" Move").unwrap_or(raw).trim();
    if category == "Other" { "Status".to_string() } else { category.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(rows: &[[&str; 9]]) -> Vec<String> {
        let mut cells = vec!["Standard Level Up".to_string()];
        cells.extend(rows.iter().flatten().map(|s| s.to_string()));
        cells
    }

    const TACKLE: [&str; 9] = [
        "—",
        "Tackle",
        "Tackle - Normal-type",
        "Tackle: Physical Move",
        "40",
        "100",
        "35",
        "--",
        "A physical attack in which the user charges and slams into the target.",
    ];
    const GROWL: [&str; 9] =
        ["3", "Growl", "Growl - Normal-type", "Growl: Other Move", "--", "100", "40", "--", "Lowers Attack."];

    #[test]
    fn test_decode_rows_by_column() {
        let group = decode_moveset(&cells(&[TACKLE, GROWL])).unwrap();
        assert_eq!(group.source, "Standard Level Up");
        assert_eq!(group.moves.len(), 2);

        let tackle = &group.moves[0];
        assert_eq!(tackle.acquisition, "—");
        assert_eq!(tackle.move_type, "Normal");
        assert_eq!(tackle.category, "Physical");
        assert_eq!(tackle.power_points, "35");

        assert_eq!(group.moves[1].category, "Status");
        assert_eq!(group.moves[1].description, "Lowers Attack.");
    }

    #[test]
    fn test_decode_is_idempotent() {
        let input = cells(&[TACKLE, GROWL, TACKLE]);
        assert_eq!(decode_moveset(&input).unwrap(), decode_moveset(&input).unwrap());
    }

    #[test]
    fn test_ragged_rows_are_structural() {
        let mut input = cells(&[TACKLE]);
        input.push("7".into());
        let err = decode_moveset(&input).unwrap_err();
        assert!(matches!(err, ParseError::Structural { section: "moveset", ref reason } if reason.contains("10 cells")));
    }

    #[test]
    fn test_label_only_table_has_no_moves() {
        let group = decode_moveset(&cells(&[])).unwrap();
        assert!(group.moves.is_empty());
        assert!(decode_moveset(&[]).is_err());
    }

    #[test]
    fn test_category_normalization() {
        assert_eq!(normalize_category("Growl", "Other"), "Status");
        assert_eq!(normalize_category("Growl", "Growl: Other Move"), "Status");
        assert_eq!(normalize_category("Ember", "Ember: Special Move"), "Special");
        assert_eq!(normalize_category("Ember", "Physical"), "Physical");
    }

    #[test]
    fn test_type_normalization() {
        assert_eq!(normalize_type("Vine Whip", "Vine Whip - Grass-type"), "Grass");
        assert_eq!(normalize_type("Vine Whip", "Grass"), "Grass");
    }
}
