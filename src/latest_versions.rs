//! latest-versions mode: per-version documentation links and support status
//!
//! The version list lives in the sidebar under an `All versions` marker.
//! Anchor texts come in two shapes, parsed as a tagged result: a
//! `Python X.Y (status)` match, or anything else kept verbatim as the
//! version with an empty status.

use crate::error::ScrapeError;
use crate::locate::{attr, find_tag, select_all, text_of};
use crate::output::Listing;
use crate::transport::Session;
use anyhow::{Context, Result};
use regex::Regex;
use scraper::Html;

const HEADER: &[&str] = &["Documentation link", "Version", "Status"];
const ALL_VERSIONS_MARKER: &str = "All versions";
const VERSION_PATTERN: &str = r"Python (?P<version>\d\.\d+) \((?P<status>.*)\)";

/// Parse result for a version anchor's text.
#[derive(Debug, PartialEq, Eq)]
pub enum AnchorText {
    /// Matched `Python X.Y (status)`.
    Versioned { version: String, status: String },
    /// Anything else; the raw text stands in for the version.
    Raw(String),
}

/// Classify one anchor text against the version pattern.
pub fn parse_anchor_text(pattern: &Regex, text: &str) -> AnchorText {
    match pattern.captures(text) {
        Some(captures) => AnchorText::Versioned {
            version: captures["version"].to_string(),
            status: captures["status"].to_string(),
        },
        None => AnchorText::Raw(text.to_string()),
    }
}

/// Crawl the version/status listing off the documentation front page.
pub fn run(session: &mut Session, base_url: &str) -> Result<Option<Listing>> {
    let Some(body) = session.fetch(base_url) else {
        return Ok(None);
    };

    let doc = Html::parse_document(&body);
    let sidebar = find_tag(doc.root_element(), "div.sphinxsidebarwrapper")
        .with_context(|| format!("while scanning {}", base_url))?;

    // The marker must appear in some sidebar list; if every list lacks it
    // the navigation structure we rely on is gone.
    let version_list = select_all(sidebar, "ul")?
        .into_iter()
        .find(|ul| text_of(*ul).contains(ALL_VERSIONS_MARKER))
        .ok_or(ScrapeError::AllVersionsMissing)
        .with_context(|| format!("while scanning {}", base_url))?;

    let pattern = Regex::new(VERSION_PATTERN).unwrap();
    let mut rows = Vec::new();
    for anchor in select_all(version_list, "a")? {
        let link = attr(anchor, "href")
            .with_context(|| format!("while scanning {}", base_url))?
            .to_string();
        let row = match parse_anchor_text(&pattern, &text_of(anchor)) {
            AnchorText::Versioned { version, status } => vec![link, version, status],
            AnchorText::Raw(text) => vec![link, text, String::new()],
        };
        rows.push(row);
    }

    Ok(Some(Listing { header: HEADER, rows }))
}
