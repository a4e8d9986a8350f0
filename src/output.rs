//! Result delivery: console table or persisted CSV
//!
//! Routines hand over a [`Listing`]; the header literals live with the
//! routines because they are the contract for what each column means.

use anyhow::{Context, Result};
use chrono::Local;
use clap::ValueEnum;
use std::fs;
use std::path::{Path, PathBuf};

/// A header row plus data rows. Every data row has the header's arity.
#[derive(Debug)]
pub struct Listing {
    pub header: &'static [&'static str],
    pub rows: Vec<Vec<String>>,
}

/// Where a listing goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned table on stdout.
    Table,
    /// CSV file under the results directory.
    File,
}

/// Hand a routine's listing to the selected destination.
pub fn deliver(
    listing: &Listing,
    format: OutputFormat,
    mode_slug: &str,
    results_dir: &Path,
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            print!("{}", render_table(listing));
            Ok(())
        }
        OutputFormat::File => {
            let path = write_csv(listing, mode_slug, results_dir)?;
            log::info!("Results saved to {}", path.display());
            Ok(())
        }
    }
}

fn render_table(listing: &Listing) -> String {
    let mut widths: Vec<usize> = listing.header.iter().map(|h| h.chars().count()).collect();
    for row in &listing.rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let mut out = String::new();
    let header: Vec<String> = listing.header.iter().map(|h| h.to_string()).collect();
    push_row(&mut out, &header, &widths);

    let rule: String = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("-+-");
    out.push_str(&rule);
    out.push('\n');

    for row in &listing.rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, row: &[String], widths: &[usize]) {
    let cells: Vec<String> = row
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{:<width$}", cell, width = w))
        .collect();
    out.push_str(cells.join(" | ").trim_end());
    out.push('\n');
}

fn write_csv(listing: &Listing, mode_slug: &str, results_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(results_dir)
        .with_context(|| format!("Failed to create {}", results_dir.display()))?;

    let stamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let path = results_dir.join(format!("{}_{}.csv", mode_slug, stamp));

    let mut contents = String::new();
    let header: Vec<String> = listing.header.iter().map(|h| h.to_string()).collect();
    contents.push_str(&csv_line(&header));
    for row in &listing.rows {
        contents.push_str(&csv_line(row));
    }

    fs::write(&path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

fn csv_line(row: &[String]) -> String {
    let mut line = row
        .iter()
        .map(|cell| csv_field(cell))
        .collect::<Vec<_>>()
        .join(",");
    line.push('\n');
    line
}

fn csv_field(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> Listing {
        Listing {
            header: &["Status", "Count"],
            rows: vec![
                vec!["Final".to_string(), "12".to_string()],
                vec!["Total".to_string(), "12".to_string()],
            ],
        }
    }

    #[test]
    fn test_table_aligns_columns() {
        let rendered = render_table(&sample());
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Status | Count");
        assert_eq!(lines[1], "-------+------");
        assert_eq!(lines[2], "Final  | 12");
        assert_eq!(lines[3], "Total  | 12");
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_write_csv_creates_file() {
        let dir = tempdir().unwrap();
        let path = write_csv(&sample(), "pep", dir.path()).unwrap();

        assert!(path.file_name().unwrap().to_str().unwrap().starts_with("pep_"));
        let contents = fs::read_to_string(path).unwrap();
        assert_eq!(contents, "Status,Count\nFinal,12\nTotal,12\n");
    }
}
