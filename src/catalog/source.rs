//! Where catalog files come from.
//!
//! Paths are site-relative (`metadata/<id>.json`, `data/landmarks.json`).
//! `FsSource` resolves them against a directory on disk; `MemorySource`
//! serves a fixed set of files.

use super::error::{CatalogError, CatalogResult};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Fetches the text of a site-relative path. Implementations are shared
/// across loader threads.
pub trait MetadataSource: Send + Sync {
    fn fetch(&self, path: &str) -> CatalogResult<String>;
}

/// Reads files below a root directory.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl MetadataSource for FsSource {
    fn fetch(&self, path: &str) -> CatalogResult<String> {
        // Reject anything that tries to leave the root
        if path.split('/').any(|part| part == "..") {
            return Err(CatalogError::NotFound(path.to_string()));
        }
        let full = self.root.join(path);
        std::fs::read_to_string(&full).map_err(|e| match e.kind() {
            ErrorKind::NotFound => CatalogError::NotFound(path.to_string()),
            _ => CatalogError::Io(e),
        })
    }
}

/// In-memory files, keyed by site-relative path.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<String>, contents: impl Into<String>) -> Self {
        self.insert(path, contents);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, contents: impl Into<String>) {
        self.files.insert(path.into(), contents.into());
    }
}

impl MetadataSource for MemorySource {
    fn fetch(&self, path: &str) -> CatalogResult<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(path.to_string()))
    }
}

/// Site-relative path of an item's metadata file
pub fn metadata_path(id: &str) -> String {
    format!("metadata/{id}.json")
}
