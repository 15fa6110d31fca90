//! Persisted UI preferences.
//!
//! ## Architecture
//!
//! `KeyValueStore` is the local-storage analogue: string keys, string
//! values, nothing else. `Preferences` layers typed accessors on top and
//! stores every value as JSON text. A value that fails to parse is treated
//! as absent; the accessor logs a warning and returns the default.
//!
//! `JsonFileStore` keeps all keys in one JSON object on disk and rewrites it
//! atomically (write to a temp file in the same directory, then rename).

use crate::constants::MAX_RECENTLY_VIEWED;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

pub const KEY_RECENTLY_VIEWED: &str = "recentlyViewed";
pub const KEY_SIDEBAR_COLLAPSED: &str = "sidebarCollapsed";
pub const KEY_VIEW_MODE: &str = "viewMode";

const APP_DIR: &str = "engraving-atlas";
const STORE_FILE: &str = "preferences.json";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to replace {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// String key/value storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    fn remove(&self, key: &str) -> StoreResult<()>;
}

// ============================================================================
// Stores
// ============================================================================

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.values.lock().remove(key);
        Ok(())
    }
}

/// All keys in one JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// `<config dir>/engraving-atlas/preferences.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(STORE_FILE))
    }

    /// Open a store. A missing file starts empty; an unreadable one is
    /// logged and also starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "corrupt preference file, starting fresh");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read preference file");
                BTreeMap::new()
            }
        };
        Self {
            path,
            values: Mutex::new(values),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self, values: &BTreeMap<String, String>) -> StoreResult<()> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir)?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(serde_json::to_string_pretty(values)?.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Persist {
            path: self.path.clone(),
            source: e.error,
        })?;
        debug!(path = %self.path.display(), "saved preferences");
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    /// The in-memory copy only changes once the file has been replaced
    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut values = self.values.lock();
        let mut next = values.clone();
        next.insert(key.to_string(), value.to_string());
        self.save(&next)?;
        *values = next;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut values = self.values.lock();
        if !values.contains_key(key) {
            return Ok(());
        }
        let mut next = values.clone();
        next.remove(key);
        self.save(&next)?;
        *values = next;
        Ok(())
    }
}

// ============================================================================
// Typed preferences
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    List,
    Grid,
}

pub struct Preferences {
    store: Box<dyn KeyValueStore>,
}

impl Preferences {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    fn read<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let Some(text) = self.store.get(key) else {
            return T::default();
        };
        serde_json::from_str(&text).unwrap_or_else(|e| {
            warn!(key, error = %e, "ignoring corrupt preference value");
            T::default()
        })
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) -> StoreResult<()> {
        self.store.set(key, &serde_json::to_string(value)?)
    }

    /// Most recent first
    pub fn recently_viewed(&self) -> Vec<String> {
        self.read(KEY_RECENTLY_VIEWED)
    }

    /// Move `id` to the front, dropping duplicates and anything past the
    /// limit. Returns the new list.
    pub fn push_recently_viewed(&self, id: &str) -> StoreResult<Vec<String>> {
        let mut list = self.recently_viewed();
        list.retain(|existing| existing != id);
        list.insert(0, id.to_string());
        list.truncate(MAX_RECENTLY_VIEWED);
        self.write(KEY_RECENTLY_VIEWED, &list)?;
        Ok(list)
    }

    pub fn sidebar_collapsed(&self) -> bool {
        self.read(KEY_SIDEBAR_COLLAPSED)
    }

    pub fn set_sidebar_collapsed(&self, collapsed: bool) -> StoreResult<()> {
        self.write(KEY_SIDEBAR_COLLAPSED, &collapsed)
    }

    pub fn view_mode(&self) -> ViewMode {
        self.read(KEY_VIEW_MODE)
    }

    pub fn set_view_mode(&self, mode: ViewMode) -> StoreResult<()> {
        self.write(KEY_VIEW_MODE, &mode)
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }
}
