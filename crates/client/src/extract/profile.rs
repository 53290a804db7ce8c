//! Identity, classification, sprite and next-entity link.

use super::{DEXTABLE, ParseError};
use crate::dom::{DexPage, Locator, Step, collapse_whitespace, text_content};
use crate::fetch::resolve;
use dexcrawl_core::record::Identity;
use url::Url;

const TITLE: Locator = Locator::new("#content main h1");

const CLASSIFICATION_CELL: Locator = Locator::new(DEXTABLE)
    .containing("Classification")
    .at(&[Step::new("tr", 4), Step::new("td", 1)]);

const SPRITE_IMG: Locator = Locator::new("#content main table").containing("Picture").at(&[
    Step::new("tbody", 1),
    Step::new("tr", 2),
    Step::new("td", 1),
    Step::new("table", 1),
    Step::new("tbody", 1),
    Step::new("tr", 1),
    Step::new("td", 1),
    Step::new("img", 1),
]);

const NEXT_LINK: Locator = Locator::new("#rbar > table.tooltab > tbody").at(&[
    Step::new("tr", 2),
    Step::new("td", 3),
    Step::new("a", 1),
]);

/// Parse the page title, e.g. `#001 Bulbasaur`.
pub fn parse_identity(page: &DexPage) -> Result<Option<Identity>, ParseError> {
    let Some(h1) = page.query_one(&TITLE) else {
        return Ok(None);
    };
    parse_title(&collapse_whitespace(&text_content(h1))).map(Some)
}

fn parse_title(title: &str) -> Result<Identity, ParseError> {
    let malformed = || ParseError::structural("identity", format!("unexpected title {title:?}"));

    let (number, name) = title.split_once(' ').ok_or_else(malformed)?;
    let dex_no = number.trim_start_matches('#');
    if dex_no.is_empty() || !dex_no.chars().all(|c| c.is_ascii_digit()) || name.trim().is_empty() {
        return Err(malformed());
    }

    Ok(Identity { dex_no: dex_no.to_string(), name: name.trim().to_string() })
}

pub fn parse_classification(page: &DexPage) -> Option<String> {
    let cell = page.query_one(&CLASSIFICATION_CELL)?;
    let text = collapse_whitespace(&text_content(cell));
    (!text.is_empty()).then_some(text)
}

pub fn parse_sprite(page: &DexPage) -> Result<Option<Url>, ParseError> {
    link(page, &SPRITE_IMG, "src", "sprite")
}

/// Next entity in the chain. `None` marks the end.
pub fn parse_next_link(page: &DexPage) -> Result<Option<Url>, ParseError> {
    link(page, &NEXT_LINK, "href", "next")
}

fn link(page: &DexPage, locator: &Locator, attr: &str, section: &'static str) -> Result<Option<Url>, ParseError> {
    let Some(el) = page.query_one(locator) else {
        return Ok(None);
    };
    let Some(value) = el.value().attr(attr) else {
        return Ok(None);
    };
    resolve(page.url(), value)
        .map(Some)
        .map_err(|e| ParseError::structural(section, format!("{value:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
    <div id="content"><main>
      <div><table><tr><td><table><tr><td>img</td><td><h1>#122 Mr. Mime</h1></td></tr></table></td></tr></table></div>
      <div>
        <table class="dextable"><tbody>
          <tr><td>Picture</td><td>Name</td></tr>
          <tr><td><table><tbody><tr>
            <td><img src="/swordshield/pokemon/122.png"></td>
            <td><img src="/swordshield/pokemon/shiny/122.png"></td>
          </tr></tbody></table></td></tr>
          <tr><td>Classification</td></tr>
          <tr><td>  Barrier Pokémon </td></tr>
        </tbody></table>
      </div>
    </main></div>
    <div id="rbar"><table class="tooltab"><tbody>
      <tr><td>Prev</td><td></td><td>Next</td></tr>
      <tr><td><a href="/pokedex-swsh/jynx/">#124</a></td><td></td><td><a href="/pokedex-swsh/mimejr/">#439</a></td></tr>
    </tbody></table></div>
    </body></html>"#;

    fn page(html: &str) -> DexPage {
        DexPage::parse(Url::parse("https://www.serebii.net/pokedex-swsh/mr.mime/").unwrap(), html)
    }

    #[test]
    fn test_identity_keeps_multi_word_names() {
        let identity = parse_identity(&page(PAGE)).unwrap().unwrap();
        assert_eq!(identity, Identity { dex_no: "122".into(), name: "Mr. Mime".into() });
    }

    #[test]
    fn test_identity_malformed_title() {
        assert!(parse_title("Bulbasaur").is_err());
        assert!(parse_title("#abc Bulbasaur").is_err());
        assert!(parse_title("#001 ").is_err());
        assert_eq!(parse_title("#001 Bulbasaur").unwrap().dex_no, "001");
    }

    #[test]
    fn test_classification_trimmed() {
        assert_eq!(parse_classification(&page(PAGE)).as_deref(), Some("Barrier Pokémon"));
    }

    #[test]
    fn test_sprite_resolved_against_page() {
        let sprite = parse_sprite(&page(PAGE)).unwrap().unwrap();
        assert_eq!(sprite.as_str(), "https://www.serebii.net/swordshield/pokemon/122.png");
    }

    #[test]
    fn test_next_link_resolved() {
        let next = parse_next_link(&page(PAGE)).unwrap().unwrap();
        assert_eq!(next.as_str(), "https://www.serebii.net/pokedex-swsh/mimejr/");
    }

    #[test]
    fn test_missing_sections() {
        let page = page("<html><body><div id=\"rbar\"></div></body></html>");
        assert_eq!(parse_identity(&page).unwrap(), None);
        assert_eq!(parse_classification(&page), None);
        assert_eq!(parse_sprite(&page).unwrap(), None);
        assert_eq!(parse_next_link(&page).unwrap(), None);
    }
}
