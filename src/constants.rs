//! Fixed configuration: seed URLs, directory names, expectation table

/// Entry point of the versioned Python documentation.
pub const MAIN_DOC_URL: &str = "https://docs.python.org/3/";

/// Entry point of the PEP index.
pub const PEP_DOC_URL: &str = "https://peps.python.org/";

/// Directory the archive download is saved under, relative to the cwd.
pub const DOWNLOADS_DIR: &str = "downloads";

/// Directory CSV result files are saved under, relative to the cwd.
pub const RESULTS_DIR: &str = "results";

/// Directory the run log is written to, relative to the cwd.
pub const LOG_DIR: &str = "logs";

/// Persisted response cache, relative to the cwd.
pub const CACHE_FILE: &str = ".docscout-cache.json";

/// Accepted full statuses per short status code from the numerical index.
/// The empty code covers index rows with no status character.
pub const EXPECTED_STATUS: &[(&str, &[&str])] = &[
    ("A", &["Active", "Accepted"]),
    ("D", &["Deferred"]),
    ("F", &["Final"]),
    ("P", &["Provisional"]),
    ("R", &["Rejected"]),
    ("S", &["Superseded"]),
    ("W", &["Withdrawn"]),
    ("", &["Draft", "Active"]),
];
