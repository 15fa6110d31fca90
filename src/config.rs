//! Collection configuration.
//!
//! Read from an optional `atlas.json` at the data root. Every field has a
//! default, so a missing file and `{}` behave the same.

use crate::constants::DEFAULT_ENGRAVING_COUNT;
use crate::map::TileLayerKind;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

pub const CONFIG_FILE: &str = "atlas.json";

/// `steel_engraving_0001` .. `steel_engraving_0009`
pub static DEFAULT_ENGRAVING_IDS: Lazy<Vec<String>> = Lazy::new(|| {
    (1..=DEFAULT_ENGRAVING_COUNT)
        .map(|n| format!("steel_engraving_{n:04}"))
        .collect()
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AtlasConfig {
    /// Items to load, in display order
    pub engraving_ids: Vec<String>,
    /// Tile layer shown on startup
    pub initial_layer: TileLayerKind,
    /// Whether landmark overlays start visible
    pub show_landmarks: bool,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            engraving_ids: DEFAULT_ENGRAVING_IDS.clone(),
            initial_layer: TileLayerKind::Modern,
            show_landmarks: true,
        }
    }
}

impl AtlasConfig {
    /// Load `<root>/atlas.json`, falling back to defaults when it is missing
    /// or unreadable
    pub fn load(root: &Path) -> Self {
        let path = root.join(CONFIG_FILE);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Self::default();
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read config, using defaults");
                return Self::default();
            }
        };
        serde_json::from_str(&text).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "invalid config, using defaults");
            Self::default()
        })
    }
}
