//! Ability assignment from the abilities blob.

use super::{DEXTABLE, ParseError, variants};
use crate::dom::{DexPage, Locator, Step, text_lines};
use dexcrawl_core::record::AbilitySet;

const ABILITY_CELL: Locator = Locator::new(DEXTABLE)
    .containing("Abilities")
    .at(&[Step::new("tr", 2), Step::new("td", 1)]);

/// Variant groups, last marker on the page first, then the base `"Normal"` group.
pub fn parse_abilities(page: &DexPage) -> Result<Option<Vec<AbilitySet>>, ParseError> {
    let Some(cell) = page.query_one(&ABILITY_CELL) else {
        return Ok(None);
    };

    let lines = text_lines(cell);
    if lines.is_empty() {
        return Err(ParseError::structural("abilities", "ability cell is empty"));
    }

    Ok(Some(variants::split(&lines).into_sets()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn page(cell: &str) -> DexPage {
        let html = format!(
            r#"<table class="dextable"><tbody><tr><td>Abilities</td></tr><tr>{cell}</tr></tbody></table>"#
        );
        DexPage::parse(Url::parse("https://www.serebii.net/pokedex-swsh/test/").unwrap(), &html)
    }

    #[test]
    fn test_variant_then_normal() {
        let page = page("<td>Galarian Form Abilities: Thick Fat<br>Hidden Ability: Water Absorb<br>Sand Veil</td>");
        let sets = parse_abilities(&page).unwrap().unwrap();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].variant, "Galarian Form");
        assert_eq!(sets[0].hidden.as_deref(), Some("Water Absorb"));
        assert_eq!(sets[1].variant, "Normal");
        assert_eq!(sets[1].abilities, vec!["Sand Veil"]);
        assert_eq!(sets[1].hidden, None);
    }

    #[test]
    fn test_empty_cell_is_structural() {
        let page = page("<td>  </td>");
        assert!(parse_abilities(&page).is_err());
    }

    #[test]
    fn test_absent_section() {
        let page = DexPage::parse(Url::parse("https://www.serebii.net/").unwrap(), "<p>Abilities</p>");
        assert_eq!(parse_abilities(&page).unwrap(), None);
    }
}
