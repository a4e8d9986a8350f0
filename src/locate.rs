//! Fail-fast tag locator
//!
//! Thin query layer over `scraper`. Every lookup assumes the page shape is
//! stable: absence of a match is a structural mismatch, returned as an error
//! the routine propagates as fatal, never a silently ignored `None`.

use crate::error::ScrapeError;
use regex::Regex;
use scraper::{ElementRef, Selector};

fn parse_selector(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector).map_err(|_| ScrapeError::BadSelector {
        selector: selector.to_string(),
    })
}

/// First descendant of `scope` matching a CSS selector.
pub fn find_tag<'a>(scope: ElementRef<'a>, selector: &str) -> Result<ElementRef<'a>, ScrapeError> {
    let parsed = parse_selector(selector)?;
    scope
        .select(&parsed)
        .next()
        .ok_or_else(|| ScrapeError::TagNotFound {
            selector: selector.to_string(),
        })
}

/// All descendants of `scope` matching a CSS selector. An empty result is
/// legitimate here; listing routines decide what emptiness means.
pub fn select_all<'a>(
    scope: ElementRef<'a>,
    selector: &str,
) -> Result<Vec<ElementRef<'a>>, ScrapeError> {
    let parsed = parse_selector(selector)?;
    Ok(scope.select(&parsed).collect())
}

/// First descendant with the given tag whose normalized text equals
/// `needle`. Locates labeled fields by their own text, e.g. the `Status`
/// label in a PEP header block.
pub fn find_tag_with_text<'a>(
    scope: ElementRef<'a>,
    tag: &str,
    needle: &str,
) -> Result<ElementRef<'a>, ScrapeError> {
    let parsed = parse_selector(tag)?;
    scope
        .select(&parsed)
        .find(|el| text_of(*el) == needle)
        .ok_or_else(|| ScrapeError::TagNotFound {
            selector: format!("{}[text={}]", tag, needle),
        })
}

/// First anchor under `scope` whose `href` matches `pattern`.
pub fn find_tag_by_href<'a>(
    scope: ElementRef<'a>,
    pattern: &Regex,
) -> Result<ElementRef<'a>, ScrapeError> {
    let parsed = parse_selector("a")?;
    scope
        .select(&parsed)
        .find(|el| {
            el.value()
                .attr("href")
                .is_some_and(|href| pattern.is_match(href))
        })
        .ok_or_else(|| ScrapeError::TagNotFound {
            selector: format!("a[href~{}]", pattern.as_str()),
        })
}

/// Required attribute of a located element.
pub fn attr<'a>(el: ElementRef<'a>, name: &str) -> Result<&'a str, ScrapeError> {
    el.value().attr(name).ok_or_else(|| ScrapeError::AttrNotFound {
        selector: el.value().name().to_string(),
        attr: name.to_string(),
    })
}

/// Next sibling that is an element, skipping text and comment nodes.
pub fn next_element_sibling(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.next_siblings().find_map(ElementRef::wrap)
}

/// Text content of an element with runs of whitespace collapsed.
pub fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().split_whitespace().collect::<Vec<_>>().join(" ")
}
