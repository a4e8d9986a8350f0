//! docscout CLI
//!
//! Crawls a fixed set of Python documentation pages and emits the extracted
//! rows as a console table or a CSV file under `results/`.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

use docscout::constants::{CACHE_FILE, DOWNLOADS_DIR, LOG_DIR, MAIN_DOC_URL, PEP_DOC_URL, RESULTS_DIR};
use docscout::output::{self, OutputFormat};
use docscout::pep::ExpectationTable;
use docscout::transport::Session;
use docscout::{download, latest_versions, logging, pep, whats_new};

#[derive(Parser, Debug)]
#[command(name = "docscout")]
#[command(version)]
#[command(about = "Structured snapshots of the Python documentation and PEP index")]
struct Cli {
    /// Crawl mode
    #[arg(value_enum)]
    mode: Mode,

    /// Where the resulting rows go
    #[arg(short, long, value_enum, default_value = "table")]
    output: OutputFormat,

    /// Drop the persisted response cache before crawling
    #[arg(short, long)]
    clear_cache: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Release-notes articles per version
    WhatsNew,
    /// Documentation links with support status
    LatestVersions,
    /// Fetch the A4 PDF archive
    Download,
    /// Reconcile index status codes against document pages
    Pep,
}

impl Mode {
    fn slug(self) -> &'static str {
        match self {
            Mode::WhatsNew => "whats-new",
            Mode::LatestVersions => "latest-versions",
            Mode::Download => "download",
            Mode::Pep => "pep",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(Path::new(LOG_DIR));
    log::info!("Crawler started");
    log::info!("Command line arguments: {:?}", cli);

    let mut session = Session::open(PathBuf::from(CACHE_FILE))?;
    if cli.clear_cache {
        session.clear_cache()?;
    }

    let listing = match cli.mode {
        Mode::WhatsNew => whats_new::run(&mut session, MAIN_DOC_URL)?,
        Mode::LatestVersions => latest_versions::run(&mut session, MAIN_DOC_URL)?,
        Mode::Download => download::run(&mut session, MAIN_DOC_URL, Path::new(DOWNLOADS_DIR))?,
        Mode::Pep => pep::run(&mut session, PEP_DOC_URL, &ExpectationTable::default())?,
    };

    if let Some(listing) = listing {
        output::deliver(&listing, cli.output, cli.mode.slug(), Path::new(RESULTS_DIR))?;
    }

    log::info!("Crawler finished");
    Ok(())
}
