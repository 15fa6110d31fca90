//! Startup and periodic housekeeping.

use super::AppContext;
use crate::catalog::{Catalog, CatalogError, MetadataSource, load_all};
use crate::landmarks::LandmarkDb;
use crate::notifications::Banner;
use crate::viewport::RenderSurface;
use std::time::Instant;
use tracing::{info, warn};

/// What `init` managed to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitSummary {
    pub requested: usize,
    pub loaded: usize,
    pub landmarks: usize,
}

impl<S: RenderSurface> AppContext<S> {
    /// Load the collection and landmark database, derive the list and map,
    /// then apply the initial location hash. Load failures never abort
    /// startup; they surface as banners.
    pub fn init(&mut self, source: &dyn MetadataSource, hash: &str, now: Instant) -> InitSummary {
        let report = load_all(source, &self.config.engraving_ids);
        let requested = report.requested();
        let failed = report.failures.len();

        if report.items.is_empty() && requested > 0 {
            self.banners.push(
                Banner::error("Failed to load application. Please refresh the page."),
                now,
            );
        } else if failed > 0 {
            self.banners.push(
                Banner::error(format!("Failed to load {failed} of {requested} engravings")),
                now,
            );
        }
        self.data.catalog = Catalog::from(report);

        self.data.landmarks = match LandmarkDb::load(source) {
            Ok(db) => db,
            Err(CatalogError::NotFound(path)) => {
                warn!(%path, "no landmark database, overlays disabled");
                LandmarkDb::default()
            }
            Err(e) => {
                warn!(error = %e, "failed to load landmark database");
                self.banners
                    .push(Banner::error("Landmark information is unavailable"), now);
                LandmarkDb::default()
            }
        };

        self.refresh_filtered();
        self.handle_hash_change(hash, now);

        let summary = InitSummary {
            requested,
            loaded: self.data.catalog.len(),
            landmarks: self.data.landmarks.len(),
        };
        info!(
            loaded = summary.loaded,
            requested = summary.requested,
            landmarks = summary.landmarks,
            "atlas initialized"
        );
        summary
    }

    /// Advance timers: expire banners and collect due preloads. Returns the
    /// image paths to preload.
    pub fn tick(&mut self, now: Instant) -> Vec<String> {
        self.banners.expire(now);
        self.preload
            .poll(now)
            .into_iter()
            .filter_map(|id| self.data.catalog.get(&id).map(|e| e.image_src()))
            .collect()
    }

    /// Pointer entered a list card
    pub fn hover_card(&mut self, id: &str, now: Instant) {
        if self.data.catalog.contains(id) {
            self.preload.hover_start(id, now);
        }
    }

    /// Pointer left a list card
    pub fn leave_card(&mut self, id: &str) {
        self.preload.hover_end(id);
    }
}
