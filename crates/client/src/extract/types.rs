//! Type assignment from the entity header table.
//!
//! The type cell is empty of text for single-form entities and holds only type
//! icons. Entities with regional forms put a small layout table in the same
//! cell, one row per form: form name, then that form's type icons.

use super::{DEXTABLE, ParseError, strip_type_suffix};
use crate::dom::{DexPage, Locator, Step, collapse_whitespace, image_attr, text_content, walk};
use dexcrawl_core::record::{NORMAL_VARIANT, VariantTypes};
use scraper::ElementRef;

const SECTION: &str = "types";

const TYPE_CELL: Locator = Locator::new(DEXTABLE)
    .containing("Other Names")
    .at(&[Step::new("tr", 2), Step::new("td", 5)]);

const FIRST_TYPE: &[Step] = &[Step::new("a", 1), Step::new("img", 1)];
const SECOND_TYPE: &[Step] = &[Step::new("a", 2), Step::new("img", 1)];

pub fn parse_types(page: &DexPage) -> Result<Option<Vec<VariantTypes>>, ParseError> {
    let Some(cell) = page.query_one(&TYPE_CELL) else {
        return Ok(None);
    };

    if collapse_whitespace(&text_content(cell)).is_empty() {
        single_form(cell).map(|types| Some(vec![types]))
    } else {
        regional_forms(cell).map(Some)
    }
}

fn single_form(cell: ElementRef<'_>) -> Result<VariantTypes, ParseError> {
    let primary = walk(cell, FIRST_TYPE)
        .and_then(|img| img.value().attr("alt"))
        .map(strip_type_suffix)
        .ok_or_else(|| ParseError::structural(SECTION, "type cell has no type icon"))?;

    // A missing second icon means the entity is single-typed.
    let secondary = walk(cell, SECOND_TYPE)
        .and_then(|img| img.value().attr("alt"))
        .map(|alt| strip_type_suffix(alt).to_string());

    Ok(VariantTypes::new(NORMAL_VARIANT, primary, secondary))
}

fn regional_forms(cell: ElementRef<'_>) -> Result<Vec<VariantTypes>, ParseError> {
    let mut forms = Vec::new();

    for row in cell.descendants().filter_map(ElementRef::wrap).filter(|e| e.value().name() == "tr") {
        let mut tds = row.children().filter_map(ElementRef::wrap).filter(|e| e.value().name() == "td");
        let (Some(label), Some(icons)) = (tds.next(), tds.next()) else {
            continue;
        };

        let variant = collapse_whitespace(&text_content(label));
        let types: Vec<String> = icons
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|e| e.value().name() == "a")
            .filter_map(|a| image_attr(a, "alt"))
            .map(|alt| strip_type_suffix(&alt).to_string())
            .collect();

        let form = VariantTypes::from_list(variant, types).map_err(|e| ParseError::structural(SECTION, e.to_string()))?;
        forms.push(form);
    }

    if forms.is_empty() {
        return Err(ParseError::structural(SECTION, "type cell has text but no form rows"));
    }
    Ok(forms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn page(type_cell: &str) -> DexPage {
        let html = format!(
            r#"<table class="dextable"><tbody>
                <tr><td>Name</td><td>Other Names</td><td>No.</td><td>Gender</td><td>Type</td></tr>
                <tr><td>x</td><td>y</td><td>z</td><td>w</td>{type_cell}</tr>
            </tbody></table>"#
        );
        DexPage::parse(Url::parse("https://www.serebii.net/pokedex-swsh/test/").unwrap(), &html)
    }

    #[test]
    fn test_single_type_without_second_icon() {
        let page = page(r#"<td class="cen"><a href="/grass"><img alt="Grass-type"></a></td>"#);
        let types = parse_types(&page).unwrap().unwrap();
        assert_eq!(types, vec![VariantTypes::new("Normal", "Grass", None)]);
    }

    #[test]
    fn test_dual_type() {
        let page = page(r#"<td class="cen"><a href="/grass"><img alt="Grass-type"></a> <a href="/poison"><img alt="Poison-type"></a></td>"#);
        let types = parse_types(&page).unwrap().unwrap();
        assert_eq!(types[0].types(), vec!["Grass", "Poison"]);
    }

    #[test]
    fn test_regional_forms_zip_rows() {
        let page = page(
            r#"<td class="cen"><table><tbody>
                <tr><td>Normal</td><td><a href="/psychic"><img alt="Psychic-type"></a></td></tr>
                <tr><td>Galarian Form</td><td><a href="/fighting"><img alt="Fighting-type"></a><a href="/psychic"><img alt="Psychic-type"></a></td></tr>
            </tbody></table></td>"#,
        );
        let types = parse_types(&page).unwrap().unwrap();
        assert_eq!(types.len(), 2);
        assert_eq!(types[0], VariantTypes::new("Normal", "Psychic", None));
        assert_eq!(types[1].variant, "Galarian Form");
        assert_eq!(types[1].types(), vec!["Fighting", "Psychic"]);
    }

    #[test]
    fn test_anchor_absent_is_none() {
        let page = DexPage::parse(Url::parse("https://www.serebii.net/").unwrap(), "<table class=\"dextable\"></table>");
        assert_eq!(parse_types(&page).unwrap(), None);
    }

    #[test]
    fn test_empty_cell_without_icons_is_structural() {
        let page = page("<td></td>");
        assert!(matches!(parse_types(&page), Err(ParseError::Structural { section: "types", .. })));
    }

    #[test]
    fn test_form_with_three_types_is_structural() {
        let page = page(
            r#"<td><table><tr><td>Odd Form</td><td><a><img alt="Fire-type"></a><a><img alt="Water-type"></a><a><img alt="Ice-type"></a></td></tr></table></td>"#,
        );
        assert!(parse_types(&page).is_err());
    }
}
