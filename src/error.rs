//! Error taxonomy for the crawl
//!
//! Structural mismatches are fatal: the source pages are assumed stable, so
//! a missing element means the site changed shape and partial rows would be
//! garbage. Transient fetch failures never appear here - the transport
//! reports those as an absent result instead.

use thiserror::Error;

/// Fatal extraction errors. Any of these aborts the current run.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// An element the routine assumes is always present was not found.
    #[error("no element matching `{selector}` found")]
    TagNotFound { selector: String },

    /// A located element lacks a required attribute.
    #[error("element `{selector}` has no `{attr}` attribute")]
    AttrNotFound { selector: String, attr: String },

    /// A labeled field has no value element following it.
    #[error("`{label}` label has no following value element")]
    SiblingNotFound { label: String },

    /// No sidebar list contains the "All versions" marker.
    #[error("no sidebar list contains the `All versions` marker")]
    AllVersionsMissing,

    /// The numerical index carries a status code the expectation table
    /// does not know about.
    #[error("unknown status code `{code}` in the numerical index")]
    UnknownStatusCode { code: String },

    /// A selector literal failed to parse. Programmer error surfaced as a
    /// normal error so callers stay panic-free.
    #[error("invalid selector `{selector}`")]
    BadSelector { selector: String },
}
