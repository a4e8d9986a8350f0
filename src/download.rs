//! download mode: fetch the PDF documentation archive
//!
//! Produces no rows; the observable effect is the file written under the
//! downloads directory plus a confirmation log line.

use crate::locate::{attr, find_tag, find_tag_by_href};
use crate::output::Listing;
use crate::transport::Session;
use anyhow::{Context, Result};
use regex::Regex;
use scraper::Html;
use std::fs;
use std::path::Path;
use url::Url;

const ARCHIVE_PATTERN: &str = r".+pdf-a4\.zip$";

/// Locate the A4 PDF archive on the download page and save it under
/// `downloads_dir`, named by the final URL path segment. The archive request
/// itself bypasses the response cache.
pub fn run(
    session: &mut Session,
    base_url: &str,
    downloads_dir: &Path,
) -> Result<Option<Listing>> {
    let seed = Url::parse(base_url)?.join("download.html")?;
    let Some(body) = session.fetch(seed.as_str()) else {
        return Ok(None);
    };

    let doc = Html::parse_document(&body);
    let table = find_tag(doc.root_element(), "table.docutils")
        .with_context(|| format!("while scanning {}", seed))?;
    let pattern = Regex::new(ARCHIVE_PATTERN).unwrap();
    let anchor =
        find_tag_by_href(table, &pattern).with_context(|| format!("while scanning {}", seed))?;
    let href = attr(anchor, "href").with_context(|| format!("while scanning {}", seed))?;

    let archive_url = seed.join(href)?;
    let file_name = archive_url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty())
        .with_context(|| format!("{} has no file name segment", archive_url))?
        .to_string();

    let payload = session
        .fetch_bytes(archive_url.as_str())
        .with_context(|| format!("while downloading {}", archive_url))?;

    fs::create_dir_all(downloads_dir)
        .with_context(|| format!("Failed to create {}", downloads_dir.display()))?;
    let target = downloads_dir.join(file_name);
    fs::write(&target, payload)
        .with_context(|| format!("Failed to write {}", target.display()))?;

    log::info!("Archive saved to {}", target.display());
    Ok(None)
}
