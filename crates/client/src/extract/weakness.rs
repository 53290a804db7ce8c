//! Damage multipliers from the weakness row.

use super::{DEXTABLE, ParseError};
use crate::dom::{DexPage, Locator, Step, TableDecoder};
use dexcrawl_core::record::WeaknessVector;

const WEAKNESS_ROW: Locator = Locator::new(DEXTABLE).containing("Weakness").at(&[Step::new("tr", 3)]);

pub fn parse_weakness(page: &DexPage) -> Result<Option<WeaknessVector>, ParseError> {
    let Some(row) = page.query_one(&WEAKNESS_ROW) else {
        return Ok(None);
    };

    let cells = TableDecoder::default().decode(row)?;
    WeaknessVector::from_cells(&cells)
        .map(Some)
        .map_err(|e| ParseError::structural("weakness", e.to_string()))
}
