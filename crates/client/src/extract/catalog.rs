//! Move catalog pages: one table row per move introduced in a generation.

use crate::dom::{DexPage, TableDecoder};
use dexcrawl_core::record::MoveRecord;

/// Rows of the catalog table.
pub const CATALOG_ROWS: &str = "#moves tbody > tr";

/// Cells per catalog row: name, type, category, power, accuracy, pp, effect.
pub const CATALOG_WIDTH: usize = 7;

/// Decode every well-formed catalog row. Rows of the wrong width are skipped.
pub fn decode_catalog(page: &DexPage, generation: u8) -> Vec<MoveRecord> {
    let decoder = TableDecoder::with_image_attr("title");
    let mut moves = Vec::new();

    for (index, row) in page.select(CATALOG_ROWS).into_iter().enumerate() {
        let cells = match decoder.decode(row) {
            Ok(cells) => cells,
            Err(e) => {
                tracing::warn!(page = %page.url(), row = index + 1, error = %e, "catalog row not decodable");
                continue;
            }
        };

        let columns: Result<[String; CATALOG_WIDTH], _> = cells.try_into();
        let Ok([name, move_type, category, power, accuracy, power_points, effect]) = columns else {
            tracing::warn!(page = %page.url(), row = index + 1, "catalog row has wrong column count");
            continue;
        };

        moves.push(MoveRecord {
            name,
            move_type: capitalize(&move_type),
            category: if category.is_empty() { "-".to_string() } else { category },
            power,
            accuracy,
            power_points,
            effect,
            intro_gen: generation,
        });
    }

    moves
}

/// Upper-case the first character and lower-case the rest.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
