//! Item selection, the image viewer, landmark details and hash routes.

use super::AppContext;
use crate::geometry::{Point, Size};
use crate::landmarks::{LandmarkDetail, LandmarkOverlay};
use crate::notifications::Banner;
use crate::routing::Route;
use crate::viewport::{RawInput, RenderSurface, ZoomDirection};
use std::time::Instant;
use tracing::{debug, warn};

impl<S: RenderSurface> AppContext<S> {
    /// Show an item's detail view: focus the map on it, record it as
    /// recently viewed and point the route at it. Returns false for an
    /// unknown id.
    pub fn select_item(&mut self, id: &str) -> bool {
        let Some(engraving) = self.data.catalog.get(id) else {
            warn!(id, "engraving not found");
            return false;
        };
        self.view.map.focus_on(engraving.coordinates());
        if let Err(e) = self.prefs.push_recently_viewed(id) {
            warn!(id, error = %e, "could not record recently viewed item");
        }
        self.nav.selected = Some(id.to_string());
        self.nav.route = Route::item(id);
        debug!(id, "selected engraving");
        true
    }

    /// Close the detail view (and the image viewer with it)
    pub fn close_detail(&mut self) {
        self.close_image();
        self.nav.landmark_detail = None;
        self.nav.selected = None;
        self.nav.route = Route::Home;
    }

    /// Recently viewed items still in the collection, most recent first
    pub fn recently_viewed(&self) -> Vec<String> {
        self.prefs
            .recently_viewed()
            .into_iter()
            .filter(|id| self.data.catalog.contains(id))
            .collect()
    }

    /// React to a location hash change (also used for the initial hash)
    pub fn handle_hash_change(&mut self, hash: &str, now: Instant) {
        match Route::parse(hash) {
            Route::Item(id) => {
                if !self.select_item(&id) {
                    self.banners
                        .push(Banner::error(format!("Engraving not found: {id}")), now);
                    self.close_detail();
                }
            }
            Route::Home => {
                if self.nav.selected.is_some() {
                    self.close_detail();
                }
            }
        }
    }

    // =========================================================================
    // Image viewer
    // =========================================================================

    /// Open the selected item's full image. Returns false if nothing is
    /// selected.
    pub fn open_image(&mut self, container: Size) -> bool {
        let Some(engraving) = self.selected() else {
            return false;
        };
        let src = engraving.image_src();
        let title = engraving.title.clone();
        let mut overlay = LandmarkOverlay::build(engraving, &self.data.landmarks);
        if !self.config.show_landmarks {
            overlay.toggle();
        }
        self.viewer.viewport.open(src, title, container);
        self.viewer.overlay = Some(overlay);
        true
    }

    /// Close the viewer; the transform resets to identity
    pub fn close_image(&mut self) {
        if self.viewer.viewport.is_open() {
            self.viewer.viewport.close();
        }
        self.viewer.overlay = None;
    }

    pub fn viewer_input(&mut self, input: &RawInput, now: Instant) -> bool {
        self.viewer.viewport.handle(input, now)
    }

    pub fn viewer_zoom(&mut self, direction: ZoomDirection) -> bool {
        self.viewer.viewport.zoom_step(direction)
    }

    pub fn viewer_reset(&mut self) -> bool {
        self.viewer.viewport.reset()
    }

    /// Show/hide the landmark overlay. Returns the new visibility.
    pub fn toggle_landmarks(&mut self) -> Option<bool> {
        self.viewer.overlay.as_mut().map(LandmarkOverlay::toggle)
    }

    /// Enter or leave coordinate capture. Returns the new state.
    pub fn toggle_coordinate_capture(&mut self) -> bool {
        self.viewer.capture.toggle()
    }

    /// A click on the image: opens the detail of the landmark under the
    /// pointer, if any. While capturing coordinates the click is recorded
    /// instead and never opens a landmark.
    pub fn click_image(&mut self, position: Point) -> Option<&LandmarkDetail> {
        let percent = self.viewer.viewport.screen_to_image_percent(position)?;
        if self.viewer.capture.is_active() {
            if let Some(point) = self.viewer.capture.capture(percent) {
                debug!(x = point.x, y = point.y, "captured coordinate");
            }
            return None;
        }
        let landmark_id = self
            .viewer
            .overlay
            .as_ref()?
            .hit_test(percent)?
            .landmark_id
            .clone();
        self.show_landmark(&landmark_id)
    }

    // =========================================================================
    // Landmarks
    // =========================================================================

    pub fn show_landmark(&mut self, id: &str) -> Option<&LandmarkDetail> {
        let detail = LandmarkDetail::lookup(id, &self.data.landmarks, &self.data.catalog);
        if detail.is_none() {
            warn!(id, "landmark not found");
        }
        self.nav.landmark_detail = detail;
        self.nav.landmark_detail.as_ref()
    }

    pub fn close_landmark(&mut self) {
        self.nav.landmark_detail = None;
    }

    /// Follow an "appears in" link: close the landmark and image views and
    /// select the other item
    pub fn open_engraving_from_landmark(&mut self, id: &str) -> bool {
        self.close_landmark();
        self.close_image();
        self.select_item(id)
    }
}
