//! docscout: structured snapshots of the Python documentation and PEP index
//!
//! Modes:
//! - whats-new: release-notes articles per version
//! - latest-versions: documentation links with support status
//! - download: fetch the A4 PDF archive
//! - pep: reconcile index status codes against document pages

pub mod constants;
pub mod download;
pub mod error;
pub mod latest_versions;
pub mod locate;
pub mod logging;
pub mod output;
pub mod pep;
pub mod progress;
pub mod transport;
pub mod whats_new;

pub use error::ScrapeError;
pub use output::{Listing, OutputFormat};
pub use transport::{Backend, HttpBackend, Session};
