//! Application state - the AppContext struct and its sub-structs.

use crate::catalog::{Catalog, FilterState};
use crate::config::AtlasConfig;
use crate::geometry::Size;
use crate::landmarks::{CoordinateCapture, LandmarkDb, LandmarkDetail, LandmarkOverlay};
use crate::map::{MapMarker, MapView};
use crate::notifications::BannerQueue;
use crate::preferences::Preferences;
use crate::preload::PreloadScheduler;
use crate::routing::Route;
use crate::viewport::{ImageViewport, RenderSurface};
use serde::Serialize;

/// Bottom navigation tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavTab {
    #[default]
    Map,
    List,
    Search,
    Layers,
}

impl NavTab {
    /// Keyboard shortcut for a tab (case-insensitive)
    pub fn from_shortcut(key: &str) -> Option<Self> {
        match key {
            "m" | "M" => Some(NavTab::Map),
            "l" | "L" => Some(NavTab::List),
            "s" | "S" => Some(NavTab::Search),
            "f" | "F" => Some(NavTab::Layers),
            _ => None,
        }
    }
}

// =============================================================================
// Sub-structs
// =============================================================================

/// Everything loaded from the data root
#[derive(Debug, Default)]
pub struct DataState {
    pub catalog: Catalog,
    pub landmarks: LandmarkDb,
}

/// Derived list/map state: recomputed whenever the filters change
#[derive(Debug)]
pub struct ViewState {
    pub filters: FilterState,
    /// Ids of the filtered items, in display order
    pub visible: Vec<String>,
    pub markers: Vec<MapMarker>,
    pub map: MapView,
}

/// Current tab, route, and what the detail panes show
#[derive(Debug, Default)]
pub struct NavigationState {
    pub tab: NavTab,
    pub sidebar_open: bool,
    /// Set when the search tab asks for the input to take focus
    pub focus_search: bool,
    pub route: Route,
    pub selected: Option<String>,
    pub landmark_detail: Option<LandmarkDetail>,
}

/// The full-screen image modal and its landmark overlay
pub struct ViewerState<S: RenderSurface> {
    pub viewport: ImageViewport<S>,
    pub overlay: Option<LandmarkOverlay>,
    /// When active, clicks record coordinates instead of opening landmarks
    pub capture: CoordinateCapture,
}

/// The application controller.
///
/// Every collaborator is handed in by the caller; nothing is looked up
/// globally.
pub struct AppContext<S: RenderSurface> {
    pub config: AtlasConfig,
    pub data: DataState,
    pub view: ViewState,
    pub nav: NavigationState,
    pub viewer: ViewerState<S>,
    pub prefs: Preferences,
    pub preload: PreloadScheduler,
    pub banners: BannerQueue,
}

impl<S: RenderSurface> AppContext<S> {
    pub fn new(config: AtlasConfig, prefs: Preferences, surface: S, map_size: Size) -> Self {
        let mut map = MapView::new(map_size);
        map.layer = config.initial_layer;
        Self {
            config,
            data: DataState::default(),
            view: ViewState {
                filters: FilterState::default(),
                visible: Vec::new(),
                markers: Vec::new(),
                map,
            },
            nav: NavigationState::default(),
            viewer: ViewerState {
                viewport: ImageViewport::new(surface),
                overlay: None,
                capture: CoordinateCapture::new(),
            },
            prefs,
            preload: PreloadScheduler::default(),
            banners: BannerQueue::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.data.catalog
    }

    pub fn selected(&self) -> Option<&crate::catalog::Engraving> {
        self.nav
            .selected
            .as_deref()
            .and_then(|id| self.data.catalog.get(id))
    }

    pub fn route(&self) -> &Route {
        &self.nav.route
    }

    pub fn is_viewer_open(&self) -> bool {
        self.viewer.viewport.is_open()
    }
}
