//! whats-new mode: release-notes articles per Python version
//!
//! Walks the toctree on the what's-new index, follows every per-version
//! link, and emits one row per article that could be fetched.

use crate::locate::{attr, find_tag, select_all, text_of};
use crate::output::Listing;
use crate::progress::Progress;
use crate::transport::Session;
use anyhow::{Context, Result};
use scraper::Html;
use url::Url;

const HEADER: &[&str] = &["Article link", "Title", "Editor, author"];

/// Crawl the release-notes listing. `None` means the seed page itself could
/// not be fetched; per-article fetch failures only shorten the listing.
pub fn run(session: &mut Session, base_url: &str) -> Result<Option<Listing>> {
    let seed = Url::parse(base_url)?.join("whatsnew/")?;
    let Some(body) = session.fetch(seed.as_str()) else {
        return Ok(None);
    };

    let doc = Html::parse_document(&body);
    let section = find_tag(doc.root_element(), "section#what-s-new-in-python")
        .with_context(|| format!("while scanning {}", seed))?;
    let toctree = find_tag(section, "div.toctree-wrapper")
        .with_context(|| format!("while scanning {}", seed))?;
    let items = select_all(toctree, "li.toctree-l1")?;

    let mut rows = Vec::new();
    let mut progress = Progress::new(items.len());
    for item in items {
        progress.tick();
        let anchor = find_tag(item, "a").with_context(|| format!("while scanning {}", seed))?;
        let href = attr(anchor, "href").with_context(|| format!("while scanning {}", seed))?;
        let link = seed.join(href)?;

        let Some(article) = session.fetch(link.as_str()) else {
            continue;
        };
        let article_doc = Html::parse_document(&article);
        let title = find_tag(article_doc.root_element(), "h1")
            .with_context(|| format!("while parsing {}", link))?;
        let credits = find_tag(article_doc.root_element(), "dl")
            .with_context(|| format!("while parsing {}", link))?;

        rows.push(vec![link.to_string(), text_of(title), text_of(credits)]);
    }
    progress.finish();

    Ok(Some(Listing { header: HEADER, rows }))
}
