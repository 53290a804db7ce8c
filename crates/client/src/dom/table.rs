//! Flattens table markup into an ordered list of cell values.

use super::{collapse_whitespace, image_attr, text_content};
use crate::extract::ParseError;
use scraper::ElementRef;

const TABLE_TAGS: &[&str] = &["table", "thead", "tbody", "tr"];

/// Decodes every `td` under a table handle, in document order.
///
/// A cell with no text stands for an icon: its value is the image attribute
/// (`alt` by default). A cell with neither yields `""`.
#[derive(Debug, Clone, Copy)]
pub struct TableDecoder {
    image_attr: &'static str,
}

impl Default for TableDecoder {
    fn default() -> Self {
        Self { image_attr: "alt" }
    }
}

impl TableDecoder {
    pub fn with_image_attr(image_attr: &'static str) -> Self {
        Self { image_attr }
    }

    pub fn decode(&self, handle: ElementRef<'_>) -> Result<Vec<String>, ParseError> {
        check_table(handle)?;
        Ok(handle
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().name() == "td")
            .map(|td| self.cell_value(td))
            .collect())
    }

    pub fn cell_value(&self, td: ElementRef<'_>) -> String {
        let text = collapse_whitespace(&text_content(td));
        if !text.is_empty() {
            return text;
        }
        image_attr(td, self.image_attr).unwrap_or_default()
    }
}

fn check_table(handle: ElementRef<'_>) -> Result<(), ParseError> {
    let name = handle.value().name();
    if TABLE_TAGS.contains(&name) {
        Ok(())
    } else {
        Err(ParseError::DecodeMismatch(format!("<{name}> is not a table element")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::DexPage;
    use url::Url;

    fn page(html: &str) -> DexPage {
        DexPage::parse(Url::parse("https://www.serebii.net/pokedex-swsh/bulbasaur/").unwrap(), html)
    }

    #[test]
    fn test_decode_length_matches_cell_count() {
        let page = page(
            r#"<table><tbody>
                <tr><td colspan="2">Standard Level Up</td></tr>
                <tr><td>—</td><td>Tackle</td></tr>
                <tr><td>3</td><td>Growl</td></tr>
            </tbody></table>"#,
        );
        let table = page.select("table")[0];
        let cells = TableDecoder::default().decode(table).unwrap();
        assert_eq!(cells, vec!["Standard Level Up", "—", "Tackle", "3", "Growl"]);
    }

    #[test]
    fn test_empty_cell_falls_back_to_image() {
        let page = page(
            r#"<table><tr>
                <td><img src="/type/grass.gif" alt="Vine Whip - Grass-type" title="Grass"></td>
                <td>  </td>
                <td>  45 </td>
            </tr></table>"#,
        );
        let row = page.select("tr")[0];
        let cells = TableDecoder::default().decode(row).unwrap();
        assert_eq!(cells, vec!["Vine Whip - Grass-type", "", "45"]);

        let cells = TableDecoder::with_image_attr("title").decode(row).unwrap();
        assert_eq!(cells[0], "Grass");
    }

    #[test]
    fn test_decode_rejects_non_table_handle() {
        let page = page("<table><tr><td><span>x</span></td></tr></table>");
        let span = page.select("span")[0];
        let err = TableDecoder::default().decode(span).unwrap_err();
        assert!(matches!(err, ParseError::DecodeMismatch(_)));
    }
}
