//! Metadata loading.
//!
//! Every id is fetched on its own scoped thread. A failed fetch or parse
//! drops that item and is logged exactly once; the rest of the collection
//! still loads, in the order the ids were given.

use super::error::{CatalogError, CatalogResult};
use super::model::Engraving;
use super::source::{metadata_path, MetadataSource};
use std::thread;
use tracing::{debug, error, info};

/// An id that could not be loaded, and why.
#[derive(Debug)]
pub struct LoadFailure {
    pub id: String,
    pub error: CatalogError,
}

/// Outcome of loading a set of ids.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub items: Vec<Engraving>,
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    pub fn requested(&self) -> usize {
        self.items.len() + self.failures.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Fetch, parse and validate a single item
pub fn load_one(source: &dyn MetadataSource, id: &str) -> CatalogResult<Engraving> {
    let path = metadata_path(id);
    debug!(%path, "fetching metadata");
    let text = source.fetch(&path)?;
    let engraving: Engraving = serde_json::from_str(&text)?;
    validate(id, &engraving)?;
    Ok(engraving)
}

fn validate(requested: &str, engraving: &Engraving) -> CatalogResult<()> {
    let invalid = |reason: &str| CatalogError::Invalid {
        id: requested.to_string(),
        reason: reason.to_string(),
    };
    if engraving.id.trim().is_empty() {
        return Err(invalid("empty id"));
    }
    if engraving.id != requested {
        return Err(invalid(format!("file declares id {}", engraving.id).as_str()));
    }
    if engraving.title.trim().is_empty() {
        return Err(invalid("empty title"));
    }
    Ok(())
}

/// Load every id in parallel. Never fails as a whole.
pub fn load_all(source: &dyn MetadataSource, ids: &[String]) -> LoadReport {
    let results: Vec<(String, CatalogResult<Engraving>)> = thread::scope(|scope| {
        let handles: Vec<_> = ids
            .iter()
            .map(|id| scope.spawn(move || load_one(source, id)))
            .collect();

        handles
            .into_iter()
            .zip(ids)
            .map(|(handle, id)| {
                let result = handle.join().unwrap_or_else(|_| {
                    Err(CatalogError::Invalid {
                        id: id.clone(),
                        reason: "loader thread panicked".to_string(),
                    })
                });
                (id.clone(), result)
            })
            .collect()
    });

    let mut report = LoadReport::default();
    for (id, result) in results {
        match result {
            Ok(engraving) => report.items.push(engraving),
            Err(e) => {
                error!(%id, error = %e, "failed to load engraving metadata");
                report.failures.push(LoadFailure { id, error: e });
            }
        }
    }

    info!(
        loaded = report.items.len(),
        requested = ids.len(),
        "loaded engraving metadata"
    );
    report
}

/// The in-memory collection.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Engraving>,
}

impl Catalog {
    pub fn new(items: Vec<Engraving>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Engraving] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&Engraving> {
        self.items.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Title for an id, if it is in the collection
    pub fn title_of(&self, id: &str) -> Option<&str> {
        self.get(id).map(|e| e.title.as_str())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<LoadReport> for Catalog {
    fn from(report: LoadReport) -> Self {
        Self::new(report.items)
    }
}
