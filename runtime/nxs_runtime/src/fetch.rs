//! Source fetching.
//!
//! The runtime never reads sources directly; it goes through a [`Fetcher`]
//! so hosts control where `.nxs` programs come from. Two implementations
//! are provided: a filesystem fetcher rooted at a directory, and an
//! in-memory map for embedded hosts and tests. The fetch is the one
//! blocking boundary of the pipeline; everything after it is synchronous.

use std::cell::RefCell;
use std::path::PathBuf;
use thiserror::Error;

/// Why a fetch failed.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("source not found: {path}")]
    NotFound { path: String },
    #[error("io error reading source: {0}")]
    Io(#[from] std::io::Error),
}

/// Resolves a program path to its source text.
pub trait Fetcher {
    fn fetch(&self, path: &str) -> Result<String, FetchError>;
}

/// Fetches sources from the filesystem, relative to a root directory.
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsFetcher { root: root.into() }
    }
}

impl Fetcher for FsFetcher {
    fn fetch(&self, path: &str) -> Result<String, FetchError> {
        let full = self.root.join(path);
        match std::fs::read_to_string(&full) {
            Ok(source) => Ok(source),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(FetchError::NotFound {
                path: full.display().to_string(),
            }),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory path→source map. Records every fetch, so tests can assert
/// how often a path was loaded.
#[derive(Default)]
pub struct MapFetcher {
    sources: rustc_hash::FxHashMap<String, String>,
    log: RefCell<Vec<String>>,
}

impl MapFetcher {
    pub fn new() -> Self {
        MapFetcher::default()
    }

    pub fn insert(&mut self, path: &str, source: &str) {
        self.sources.insert(path.to_string(), source.to_string());
    }

    /// Every path fetched so far, in order, including repeats.
    pub fn fetch_log(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

impl Fetcher for MapFetcher {
    fn fetch(&self, path: &str) -> Result<String, FetchError> {
        self.log.borrow_mut().push(path.to_string());
        self.sources
            .get(path)
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                path: path.to_string(),
            })
    }
}
