//! Navigation tabs, keyboard shortcuts and persisted sidebar settings.

use super::{AppContext, NavTab};
use crate::preferences::ViewMode;
use crate::viewport::RenderSurface;
use tracing::{debug, warn};

impl<S: RenderSurface> AppContext<S> {
    /// Switch tab. The map tab closes the sidebar; every other tab opens it.
    pub fn show_tab(&mut self, tab: NavTab) {
        self.nav.tab = tab;
        self.nav.sidebar_open = tab != NavTab::Map;
        self.nav.focus_search = tab == NavTab::Search;
        debug!(?tab, "navigation tab");
    }

    /// Handle a key press. Tab shortcuts are ignored while a text input has
    /// focus. Escape closes the topmost open layer. Returns true if the key
    /// was consumed.
    pub fn handle_key(&mut self, key: &str, input_focused: bool) -> bool {
        if key == "Escape" {
            return self.escape();
        }
        if input_focused {
            return false;
        }
        match NavTab::from_shortcut(key) {
            Some(tab) => {
                self.show_tab(tab);
                true
            }
            None => false,
        }
    }

    fn escape(&mut self) -> bool {
        if self.nav.landmark_detail.is_some() {
            self.close_landmark();
        } else if self.viewer.viewport.is_open() {
            self.close_image();
        } else if self.nav.selected.is_some() {
            self.close_detail();
        } else if self.nav.sidebar_open {
            self.show_tab(NavTab::Map);
        } else {
            return false;
        }
        true
    }

    pub fn sidebar_collapsed(&self) -> bool {
        self.prefs.sidebar_collapsed()
    }

    pub fn toggle_sidebar_collapsed(&mut self) -> bool {
        let collapsed = !self.prefs.sidebar_collapsed();
        if let Err(e) = self.prefs.set_sidebar_collapsed(collapsed) {
            warn!(error = %e, "could not save sidebar state");
        }
        collapsed
    }

    pub fn view_mode(&self) -> ViewMode {
        self.prefs.view_mode()
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if let Err(e) = self.prefs.set_view_mode(mode) {
            warn!(error = %e, "could not save view mode");
        }
    }
}
