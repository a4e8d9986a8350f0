//! Failure-tolerant cached transport
//!
//! All page fetches go through a [`Session`]: a URL-keyed response cache in
//! front of a pluggable HTTP backend. Network failures never escape
//! [`Session::fetch`] - they are logged and collapsed into `None` so the
//! calling routine decides whether to skip the item or abort.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

const USER_AGENT: &str = concat!("docscout/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Raw HTTP layer under the cache. Implemented by [`HttpBackend`] in
/// production and by a canned-page fake in tests.
pub trait Backend {
    /// Perform a GET and return the response body. Any transport or HTTP
    /// status failure is an error.
    fn get(&self, url: &str) -> Result<Vec<u8>>;
}

/// Blocking reqwest backend. One client for the whole run; requests are
/// strictly sequential.
pub struct HttpBackend {
    client: reqwest::blocking::Client,
}

impl HttpBackend {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl Backend for HttpBackend {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("GET {} failed", url))?
            .error_for_status()
            .with_context(|| format!("GET {} returned an error status", url))?;
        let body = response
            .bytes()
            .with_context(|| format!("Failed to read body of {}", url))?;
        Ok(body.to_vec())
    }
}

/// Body cache persisted between runs.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Cache {
    entries: HashMap<String, String>,
}

/// A crawl session: cached text fetches plus uncached binary downloads.
pub struct Session {
    backend: Box<dyn Backend>,
    cache: Cache,
    cache_path: Option<PathBuf>,
}

impl Session {
    /// Open a session backed by real HTTP, loading any cache persisted by a
    /// previous run from `cache_path`.
    pub fn open(cache_path: PathBuf) -> Result<Self> {
        let cache = match fs::read_to_string(&cache_path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                log::warn!("Ignoring unreadable cache {}: {}", cache_path.display(), err);
                Cache::default()
            }),
            Err(_) => Cache::default(),
        };
        Ok(Self {
            backend: Box::new(HttpBackend::new()?),
            cache,
            cache_path: Some(cache_path),
        })
    }

    /// Session with an injected backend and a memory-only cache.
    pub fn with_backend(backend: Box<dyn Backend>) -> Self {
        Self {
            backend,
            cache: Cache::default(),
            cache_path: None,
        }
    }

    /// Fetch a page as text through the cache. A repeated URL is served from
    /// the cache without touching the network. On any fetch failure the
    /// error is logged and `None` is returned; the caller chooses between
    /// skipping the item and producing no result.
    pub fn fetch(&mut self, url: &str) -> Option<String> {
        if let Some(body) = self.cache.entries.get(url) {
            return Some(body.clone());
        }
        match self.backend.get(url) {
            Ok(bytes) => {
                let body = String::from_utf8_lossy(&bytes).into_owned();
                self.cache.entries.insert(url.to_string(), body.clone());
                Some(body)
            }
            Err(err) => {
                log::error!("Page fetch failed for {}: {:#}", url, err);
                None
            }
        }
    }

    /// Uncached GET for binary payloads (the archive download). Failures
    /// propagate - there is no item to skip.
    pub fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        self.backend.get(url)
    }

    /// Drop every cached response, in memory and on disk. Only invoked as an
    /// explicit operator action.
    pub fn clear_cache(&mut self) -> Result<()> {
        self.cache.entries.clear();
        if let Some(path) = &self.cache_path {
            if path.exists() {
                fs::remove_file(path)
                    .with_context(|| format!("Failed to remove cache {}", path.display()))?;
            }
        }
        log::info!("Response cache cleared");
        Ok(())
    }

    fn persist(&self) {
        let Some(path) = &self.cache_path else {
            return;
        };
        match serde_json::to_string(&self.cache) {
            Ok(raw) => {
                if let Err(err) = fs::write(path, raw) {
                    log::warn!("Could not persist cache to {}: {}", path.display(), err);
                }
            }
            Err(err) => log::warn!("Could not serialize cache: {}", err),
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.persist();
    }
}
