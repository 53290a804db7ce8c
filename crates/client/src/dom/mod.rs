//! Query layer over a parsed page snapshot.
//!
//! Sections are found by a CSS anchor plus an optional text marker, then a short
//! positional path of child elements (`tr[2]/td[5]`). Every query returns
//! `Option`; a missing section is a normal outcome and never an error.

pub mod table;

pub use table::TableDecoder;

use crate::source::RenderedPage;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Elements that break a text blob into separate lines.
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "table", "tbody", "tr", "td", "th", "li", "ul", "ol", "h1", "h2", "h3", "h4",
];

/// One positional step: the `nth` (1-based) child element named `tag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub tag: &'static str,
    pub nth: usize,
}

impl Step {
    pub const fn new(tag: &'static str, nth: usize) -> Self {
        Self { tag, nth }
    }
}

/// A fixed structural location on an entity page.
#[derive(Debug, Clone, Copy)]
pub struct Locator {
    /// CSS selector for candidate anchor elements.
    pub anchor: &'static str,

    /// Text the anchor's content must contain.
    pub contains: Option<&'static str>,

    /// Child-element path walked from the anchor.
    pub path: &'static [Step],
}

impl Locator {
    pub const fn new(anchor: &'static str) -> Self {
        Self { anchor, contains: None, path: &[] }
    }

    pub const fn containing(mut self, marker: &'static str) -> Self {
        self.contains = Some(marker);
        self
    }

    pub const fn at(mut self, path: &'static [Step]) -> Self {
        self.path = path;
        self
    }

    /// Walk the path from `root`. `None` as soon as a step has no match.
    pub fn walk<'a>(&self, root: ElementRef<'a>) -> Option<ElementRef<'a>> {
        walk(root, self.path)
    }
}

/// Follow a child-element path from `root`.
pub fn walk<'a>(root: ElementRef<'a>, path: &[Step]) -> Option<ElementRef<'a>> {
    path.iter().try_fold(root, |el, step| nth_child(el, step.tag, step.nth))
}

fn nth_child<'a>(el: ElementRef<'a>, tag: &str, nth: usize) -> Option<ElementRef<'a>> {
    let index = nth.checked_sub(1)?;
    el.children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == tag)
        .nth(index)
}

/// A parsed page and the URL it was served from.
pub struct DexPage {
    url: Url,
    html: Html,
}

impl DexPage {
    pub fn parse(url: Url, html: &str) -> Self {
        Self { url, html: Html::parse_document(html) }
    }

    pub fn from_rendered(page: &RenderedPage) -> Self {
        Self::parse(page.final_url.clone(), &page.html)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// First anchor, in document order, whose text contains the marker and
    /// from which the whole path resolves.
    pub fn query_one(&self, locator: &Locator) -> Option<ElementRef<'_>> {
        let selector = parse_selector(locator.anchor)?;
        self.html
            .select(&selector)
            .filter(|anchor| match locator.contains {
                Some(marker) => text_content(*anchor).contains(marker),
                None => true,
            })
            .find_map(|anchor| locator.walk(anchor))
    }

    /// Every element matching `selector`, in document order.
    pub fn query_all(&self, selector: &Selector) -> Vec<ElementRef<'_>> {
        self.html.select(selector).collect()
    }

    /// [`Self::query_all`] for a CSS string. An invalid selector matches nothing.
    pub fn select(&self, css: &str) -> Vec<ElementRef<'_>> {
        parse_selector(css).map(|s| self.query_all(&s)).unwrap_or_default()
    }
}

fn parse_selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::warn!(selector = css, "invalid selector: {e}");
            None
        }
    }
}

/// Concatenated text of an element and its descendants.
pub fn text_content(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Collapse runs of whitespace into single spaces and trim.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text of an element split into lines at `<br>` and block boundaries.
///
/// Whitespace within a line is collapsed and empty lines are dropped.
pub fn text_lines(el: ElementRef<'_>) -> Vec<String> {
    let mut buf = String::new();
    push_text(el, &mut buf);
    buf.split('\n')
        .map(collapse_whitespace)
        .filter(|line| !line.is_empty())
        .collect()
}

fn push_text(el: ElementRef<'_>, buf: &mut String) {
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            buf.push_str(text);
        } else if let Some(child) = ElementRef::wrap(child) {
            let name = child.value().name();
            if name == "br" {
                buf.push('\n');
                continue;
            }
            let block = BLOCK_TAGS.contains(&name);
            if block {
                buf.push('\n');
            }
            push_text(child, buf);
            if block {
                buf.push('\n');
            }
        }
    }
}

/// Attribute of the first `img` at or below `el`.
pub fn image_attr(el: ElementRef<'_>, attr: &str) -> Option<String> {
    el.descendants()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "img")
        .and_then(|img| img.value().attr(attr))
        .map(|v| v.trim().to_string())
}
