//! pep mode: reconcile index status codes against document pages
//!
//! The numerical index lists every PEP with a short status code; each
//! document page declares its full status in the header block. This routine
//! cross-references the two, tallies documents by observed status, and logs
//! every code/status discrepancy. Discrepancies are informational only - the
//! document is still tallied under whatever status it declares.

use crate::constants::EXPECTED_STATUS;
use crate::error::ScrapeError;
use crate::locate::{attr, find_tag, find_tag_with_text, next_element_sibling, select_all, text_of};
use crate::output::Listing;
use crate::progress::Progress;
use crate::transport::Session;
use anyhow::{Context, Result};
use scraper::Html;
use std::collections::HashMap;
use url::Url;

const HEADER: &[&str] = &["Status", "Count"];
const STATUS_LABEL: &str = "Status";

/// Accepted full statuses per short status code. Built once at startup and
/// passed into [`run`] so the reconciliation stays testable with injected
/// tables.
pub struct ExpectationTable {
    accepted: HashMap<String, Vec<String>>,
}

impl ExpectationTable {
    pub fn from_pairs(pairs: &[(&str, &[&str])]) -> Self {
        Self {
            accepted: pairs
                .iter()
                .map(|(code, statuses)| {
                    let statuses = statuses.iter().map(|s| s.to_string()).collect();
                    (code.to_string(), statuses)
                })
                .collect(),
        }
    }

    /// Accepted statuses for a short code, or `None` for an unknown code.
    pub fn accepted(&self, code: &str) -> Option<&[String]> {
        self.accepted.get(code).map(Vec::as_slice)
    }
}

impl Default for ExpectationTable {
    fn default() -> Self {
        Self::from_pairs(EXPECTED_STATUS)
    }
}

/// Document counts keyed by observed full status, in first-seen order.
#[derive(Debug, Default)]
pub struct StatusTally {
    entries: Vec<(String, usize)>,
}

impl StatusTally {
    /// Count one document under its observed status.
    pub fn record(&mut self, status: &str) {
        match self.entries.iter_mut().find(|(seen, _)| seen == status) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((status.to_string(), 1)),
        }
    }

    /// Number of documents tallied so far.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// One row per status plus the trailing total row.
    pub fn into_rows(self) -> Vec<Vec<String>> {
        let total = self.total();
        let mut rows: Vec<Vec<String>> = self
            .entries
            .into_iter()
            .map(|(status, count)| vec![status, count.to_string()])
            .collect();
        rows.push(vec!["Total".to_string(), total.to_string()]);
        rows
    }
}

/// Crawl the numerical index and reconcile each document's declared status
/// against the expectation table. Documents whose page cannot be fetched are
/// skipped and excluded from the tally.
pub fn run(
    session: &mut Session,
    index_url: &str,
    expected: &ExpectationTable,
) -> Result<Option<Listing>> {
    let Some(body) = session.fetch(index_url) else {
        return Ok(None);
    };

    let doc = Html::parse_document(&body);
    let section = find_tag(doc.root_element(), "section#numerical-index")
        .with_context(|| format!("while scanning {}", index_url))?;
    let table_body = find_tag(section, "tbody")
        .with_context(|| format!("while scanning {}", index_url))?;
    let rows = select_all(table_body, "tr")?;

    let mut tally = StatusTally::default();
    let mut progress = Progress::new(rows.len());
    for row in rows {
        progress.tick();

        // First cell: type character followed by the short status code.
        let cell = find_tag(row, "td").with_context(|| format!("while scanning {}", index_url))?;
        let code: String = text_of(cell).chars().skip(1).collect();
        let accepted = expected
            .accepted(&code)
            .ok_or_else(|| ScrapeError::UnknownStatusCode { code: code.clone() })?;

        let anchor = find_tag(row, "a").with_context(|| format!("while scanning {}", index_url))?;
        let href = attr(anchor, "href").with_context(|| format!("while scanning {}", index_url))?;
        let link = Url::parse(index_url)?.join(href)?;

        let Some(page) = session.fetch(link.as_str()) else {
            continue;
        };
        let observed = declared_status(&page).with_context(|| format!("while parsing {}", link))?;

        tally.record(&observed);
        if !accepted.contains(&observed) {
            log::info!(
                "Status mismatch:\n{}\nStatus on page: {}\nExpected statuses: {:?}",
                link,
                observed,
                accepted
            );
        }
    }
    progress.finish();

    Ok(Some(Listing {
        header: HEADER,
        rows: tally.into_rows(),
    }))
}

/// Full status string a document page declares: the text of the value
/// element right after the `Status` label in the header block.
fn declared_status(page: &str) -> Result<String> {
    let doc = Html::parse_document(page);
    let content = find_tag(doc.root_element(), "section#pep-content")?;
    let fields = find_tag(content, "dl")?;
    let label = find_tag_with_text(fields, "dt", STATUS_LABEL)?;
    let value = next_element_sibling(label).ok_or(ScrapeError::SiblingNotFound {
        label: STATUS_LABEL.to_string(),
    })?;
    Ok(text_of(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::fake::StaticBackend;

    const INDEX: &str = "https://peps.test/";

    fn index_page(rows: &[(&str, &str)]) -> String {
        let body: String = rows
            .iter()
            .map(|(code, href)| {
                format!(
                    "<tr><td><abbr>{code}</abbr></td><td><a href=\"{href}\">PEP</a></td></tr>"
                )
            })
            .collect();
        format!(
            r#"<section id="numerical-index"><table><tbody>{body}</tbody></table></section>"#
        )
    }

    fn pep_page(status: &str) -> String {
        format!(
            r#"<section id="pep-content">
                 <dl>
                   <dt>Author</dt><dd>Someone</dd>
                   <dt>Status</dt><dd><abbr>{status}</abbr></dd>
                 </dl>
               </section>"#
        )
    }

    #[test]
    fn test_tally_first_seen_order_and_total() {
        let mut tally = StatusTally::default();
        tally.record("Final");
        tally.record("Active");
        tally.record("Final");

        assert_eq!(tally.total(), 3);
        assert_eq!(
            tally.into_rows(),
            vec![
                vec!["Final".to_string(), "2".to_string()],
                vec!["Active".to_string(), "1".to_string()],
                vec!["Total".to_string(), "3".to_string()],
            ]
        );
    }

    #[test]
    fn test_total_counts_only_fetched_documents() {
        let index = index_page(&[
            ("IA", "pep-0001/"),
            ("SF", "pep-0002/"),
            ("SF", "pep-0003/"),
        ]);
        let active = pep_page("Active");
        let done = pep_page("Final");
        let backend = StaticBackend::new(&[
            (INDEX, index.as_str()),
            ("https://peps.test/pep-0001/", active.as_str()),
            ("https://peps.test/pep-0002/", done.as_str()),
            // pep-0003 unreachable
        ]);
        let mut session = Session::with_backend(Box::new(backend));

        let listing = run(&mut session, INDEX, &ExpectationTable::default())
            .unwrap()
            .unwrap();
        for row in &listing.rows {
            assert_eq!(row.len(), listing.header.len());
        }
        assert_eq!(
            listing.rows,
            vec![
                vec!["Active".to_string(), "1".to_string()],
                vec!["Final".to_string(), "1".to_string()],
                vec!["Total".to_string(), "2".to_string()],
            ]
        );
    }

    #[test]
    fn test_mismatched_status_still_tallied() {
        let index = index_page(&[("IF", "pep-0001/")]);
        let joke = pep_page("April Fool!");
        let backend = StaticBackend::new(&[
            (INDEX, index.as_str()),
            // Index says Final, page says April Fool!
            ("https://peps.test/pep-0001/", joke.as_str()),
        ]);
        let mut session = Session::with_backend(Box::new(backend));

        let listing = run(&mut session, INDEX, &ExpectationTable::default())
            .unwrap()
            .unwrap();
        assert_eq!(
            listing.rows,
            vec![
                vec!["April Fool!".to_string(), "1".to_string()],
                vec!["Total".to_string(), "1".to_string()],
            ]
        );
    }

    #[test]
    fn test_empty_code_uses_draft_expectations() {
        let index = index_page(&[("I", "pep-0001/")]);
        let draft = pep_page("Draft");
        let backend = StaticBackend::new(&[
            (INDEX, index.as_str()),
            ("https://peps.test/pep-0001/", draft.as_str()),
        ]);
        let mut session = Session::with_backend(Box::new(backend));

        let listing = run(&mut session, INDEX, &ExpectationTable::default())
            .unwrap()
            .unwrap();
        assert_eq!(listing.rows[0], vec!["Draft".to_string(), "1".to_string()]);
    }

    #[test]
    fn test_unknown_code_is_fatal() {
        let index = index_page(&[("IX", "pep-0001/")]);
        let done = pep_page("Final");
        let backend = StaticBackend::new(&[
            (INDEX, index.as_str()),
            ("https://peps.test/pep-0001/", done.as_str()),
        ]);
        let mut session = Session::with_backend(Box::new(backend));

        let err = run(&mut session, INDEX, &ExpectationTable::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScrapeError>(),
            Some(ScrapeError::UnknownStatusCode { code }) if code == "X"
        ));
    }

    #[test]
    fn test_injected_table_overrides_defaults() {
        let index = index_page(&[("IQ", "pep-0001/")]);
        let held = pep_page("Quarantined");
        let backend = StaticBackend::new(&[
            (INDEX, index.as_str()),
            ("https://peps.test/pep-0001/", held.as_str()),
        ]);
        let mut session = Session::with_backend(Box::new(backend));
        let table = ExpectationTable::from_pairs(&[("Q", &["Quarantined"])]);

        let listing = run(&mut session, INDEX, &table).unwrap().unwrap();
        assert_eq!(
            listing.rows,
            vec![
                vec!["Quarantined".to_string(), "1".to_string()],
                vec!["Total".to_string(), "1".to_string()],
            ]
        );
    }

    #[test]
    fn test_failed_index_fetch_yields_no_result() {
        let backend = StaticBackend::new(&[]);
        let mut session = Session::with_backend(Box::new(backend));
        assert!(run(&mut session, INDEX, &ExpectationTable::default())
            .unwrap()
            .is_none());
    }
}
