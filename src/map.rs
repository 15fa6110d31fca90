//! Map model: tile layers, item markers and view fitting.
//!
//! Tile rendering is left to the front-end; this module decides which layer
//! is active, where markers go, and what centre/zoom the view should take.
//! Fitting uses the spherical Web-Mercator projection with integer zoom
//! snapping, matching how slippy-map clients compute `fitBounds`.

use crate::catalog::{Coordinates, Engraving};
use crate::constants::{
    DEFAULT_MAP_CENTER, DEFAULT_MAP_ZOOM, FIT_MAX_ZOOM, FIT_PADDING_PX, FOCUS_ZOOM, TILE_SIZE,
};
use crate::geometry::Size;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::debug;

// ============================================================================
// Tile layers
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileLayerKind {
    #[default]
    Modern,
    Historical,
}

impl TileLayerKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "modern" => Some(Self::Modern),
            "historical" => Some(Self::Historical),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Modern => "modern",
            Self::Historical => "historical",
        }
    }

    pub fn config(&self) -> TileLayerConfig {
        match self {
            Self::Modern => TileLayerConfig {
                kind: *self,
                url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
                attribution: "© OpenStreetMap contributors",
                max_zoom: 18,
            },
            Self::Historical => TileLayerConfig {
                kind: *self,
                url: "https://server.arcgisonline.com/ArcGIS/rest/services/USA_Topo_Maps/MapServer/tile/{z}/{y}/{x}",
                attribution: "Tiles © Esri — Source: USGS, Esri, TANA, DeLorme, and NPS",
                max_zoom: 16,
            },
        }
    }
}

/// Everything a client needs to create a tile layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileLayerConfig {
    pub kind: TileLayerKind,
    pub url: &'static str,
    pub attribution: &'static str,
    pub max_zoom: u8,
}

impl TileLayerConfig {
    /// Expand the url template for one tile. `{s}` takes subdomain `a`.
    pub fn tile_url(&self, z: u8, x: u32, y: u32) -> String {
        self.url
            .replace("{s}", "a")
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }
}

// ============================================================================
// Markers
// ============================================================================

/// A map pin for one item, labelled with its creation date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub id: String,
    pub position: Coordinates,
    pub label: String,
}

impl From<&Engraving> for MapMarker {
    fn from(e: &Engraving) -> Self {
        Self {
            id: e.id.clone(),
            position: e.coordinates(),
            label: e.dates.created.clone(),
        }
    }
}

pub fn markers_for<'a>(items: impl IntoIterator<Item = &'a Engraving>) -> Vec<MapMarker> {
    items.into_iter().map(MapMarker::from).collect()
}

// ============================================================================
// Projection
// ============================================================================

/// Longitude/latitude to normalized Web-Mercator `[0, 1]` coordinates
fn project(c: Coordinates) -> (f64, f64) {
    let lat = c.lat.clamp(-85.051_128_78, 85.051_128_78).to_radians();
    let x = (c.lng + 180.0) / 360.0;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0;
    (x, y)
}

fn unproject(x: f64, y: f64) -> Coordinates {
    let lng = x * 360.0 - 180.0;
    let lat = (PI * (1.0 - 2.0 * y)).sinh().atan().to_degrees();
    Coordinates { lat, lng }
}

// ============================================================================
// View
// ============================================================================

/// Current centre, zoom and layer of the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: Coordinates,
    pub zoom: u8,
    pub layer: TileLayerKind,
    pub size: Size,
}

impl MapView {
    pub fn new(size: Size) -> Self {
        Self {
            center: Coordinates {
                lat: DEFAULT_MAP_CENTER.0,
                lng: DEFAULT_MAP_CENTER.1,
            },
            zoom: DEFAULT_MAP_ZOOM,
            layer: TileLayerKind::default(),
            size,
        }
    }

    pub fn layer_config(&self) -> TileLayerConfig {
        self.layer.config()
    }

    /// Swap the tile layer, clamping zoom to what the new layer serves.
    /// Returns true if the layer changed.
    pub fn switch_layer(&mut self, layer: TileLayerKind) -> bool {
        if self.layer == layer {
            return false;
        }
        debug!(layer = layer.as_str(), "switching map layer");
        self.layer = layer;
        self.zoom = self.zoom.min(layer.config().max_zoom);
        true
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Centre on a point at the focus zoom
    pub fn focus_on(&mut self, position: Coordinates) {
        self.center = position;
        self.zoom = FOCUS_ZOOM.min(self.layer.config().max_zoom);
    }

    /// Fit the view to the given points with `FIT_PADDING_PX` on every side,
    /// never closer than `FIT_MAX_ZOOM`. Returns false (and leaves the view
    /// alone) when there is nothing to fit.
    pub fn fit_bounds(&mut self, points: &[Coordinates]) -> bool {
        let Some(first) = points.first() else {
            return false;
        };
        let start = project(*first);
        let (min, max) = points.iter().skip(1).map(|p| project(*p)).fold(
            (start, start),
            |((min_x, min_y), (max_x, max_y)), (x, y)| {
                ((min_x.min(x), min_y.min(y)), (max_x.max(x), max_y.max(y)))
            },
        );

        let max_zoom = FIT_MAX_ZOOM.min(self.layer.config().max_zoom);
        let avail_w = (self.size.width - 2.0 * FIT_PADDING_PX).max(0.0);
        let avail_h = (self.size.height - 2.0 * FIT_PADDING_PX).max(0.0);
        let span_w = (max.0 - min.0) * TILE_SIZE;
        let span_h = (max.1 - min.1) * TILE_SIZE;

        let zoom_for = |avail: f64, span: f64| -> f64 {
            if span <= 0.0 {
                f64::INFINITY
            } else {
                (avail / span).log2().floor()
            }
        };
        let zoom = zoom_for(avail_w, span_w)
            .min(zoom_for(avail_h, span_h))
            .clamp(0.0, f64::from(max_zoom));

        self.zoom = zoom as u8;
        self.center = unproject((min.0 + max.0) / 2.0, (min.1 + max.1) / 2.0);
        debug!(
            zoom = self.zoom,
            lat = self.center.lat,
            lng = self.center.lng,
            points = points.len(),
            "fitted map to markers"
        );
        true
    }

    pub fn fit_markers(&mut self, markers: &[MapMarker]) -> bool {
        let points: Vec<Coordinates> = markers.iter().map(|m| m.position).collect();
        self.fit_bounds(&points)
    }
}
