//! Landmark overlay for an open engraving, and the landmark detail view.

use super::hit_index::HitIndex;
use super::model::{Category, Landmark, LandmarkDb, ReferenceLink, Status};
use crate::catalog::{Catalog, Engraving};
use crate::constants::MARKER_HIT_RADIUS_PCT;
use crate::geometry::Point;
use serde::Serialize;
use tracing::{debug, warn};

/// Which markers the overlay shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// `"all"` or a category name
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "all" | "" => CategoryFilter::All,
            other => CategoryFilter::Only(Category::from(other.to_string())),
        }
    }

    pub fn accepts(&self, category: &Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => c == category,
        }
    }
}

/// One marker, positioned in image percentages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayMarker {
    pub landmark_id: String,
    pub name: String,
    pub category: Category,
    pub position: Point,
}

/// Markers for a single engraving.
pub struct LandmarkOverlay {
    engraving_id: String,
    markers: Vec<OverlayMarker>,
    index: HitIndex,
    visible: bool,
    filter: CategoryFilter,
}

impl LandmarkOverlay {
    /// Resolve an engraving's landmark references. References to ids missing
    /// from the database are skipped.
    pub fn build(engraving: &Engraving, db: &LandmarkDb) -> Self {
        let markers: Vec<OverlayMarker> = engraving
            .landmarks
            .iter()
            .filter_map(|r| match db.get(&r.landmark_id) {
                Some(landmark) => Some(OverlayMarker {
                    landmark_id: r.landmark_id.clone(),
                    name: landmark.name.clone(),
                    category: landmark.category.clone(),
                    position: Point::new(r.x, r.y),
                }),
                None => {
                    warn!(landmark = %r.landmark_id, engraving = %engraving.id, "landmark not found");
                    None
                }
            })
            .collect();

        debug!(
            engraving = %engraving.id,
            markers = markers.len(),
            refs = engraving.landmarks.len(),
            "built landmark overlay"
        );

        let index = HitIndex::from_points(
            markers.iter().enumerate().map(|(i, m)| (i, m.position)),
            MARKER_HIT_RADIUS_PCT,
        );

        Self {
            engraving_id: engraving.id.clone(),
            markers,
            index,
            visible: true,
            filter: CategoryFilter::All,
        }
    }

    pub fn engraving_id(&self) -> &str {
        &self.engraving_id
    }

    pub fn markers(&self) -> &[OverlayMarker] {
        &self.markers
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show/hide all markers. Returns the new visibility.
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    /// Label of the toggle button
    pub fn toggle_label(&self) -> &'static str {
        if self.visible {
            "Hide Landmarks"
        } else {
            "Show Landmarks"
        }
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
    }

    /// Markers currently displayed
    pub fn visible_markers(&self) -> impl Iterator<Item = &OverlayMarker> {
        let visible = self.visible;
        self.markers
            .iter()
            .filter(move |m| visible && self.filter.accepts(&m.category))
    }

    /// Topmost visible marker under a point in image percentages
    pub fn hit_test(&self, percent: Point) -> Option<&OverlayMarker> {
        if !self.visible {
            return None;
        }
        self.index
            .query_nearest(percent)
            .into_iter()
            .map(|slot| &self.markers[slot])
            .find(|m| self.filter.accepts(&m.category))
    }
}

/// An item a landmark appears in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppearsIn {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailLink {
    pub title: String,
    pub url: String,
    pub domain: String,
}

impl From<&ReferenceLink> for DetailLink {
    fn from(link: &ReferenceLink) -> Self {
        Self {
            title: link.title.clone(),
            url: link.url.clone(),
            domain: domain_from_url(&link.url),
        }
    }
}

/// Everything the landmark detail modal shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LandmarkDetail {
    pub id: String,
    pub name: String,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    pub description: String,
    pub blip: String,
    pub historical_context: String,
    pub appears_in: Vec<AppearsIn>,
    pub links: Vec<DetailLink>,
}

impl LandmarkDetail {
    /// Appears-in ids resolve to item titles; ids not in the collection
    /// show the id itself.
    pub fn new(id: &str, landmark: &Landmark, catalog: &Catalog) -> Self {
        let appears_in = landmark
            .appears_in
            .iter()
            .map(|item| AppearsIn {
                id: item.clone(),
                title: catalog.title_of(item).unwrap_or(item.as_str()).to_string(),
            })
            .collect();

        Self {
            id: id.to_string(),
            name: landmark.name.clone(),
            category: landmark.category.clone(),
            status: landmark.status.clone(),
            description: landmark.description.clone(),
            blip: landmark.blip.clone(),
            historical_context: landmark.historical_context.clone(),
            appears_in,
            links: landmark.links.iter().map(DetailLink::from).collect(),
        }
    }

    pub fn lookup(id: &str, db: &LandmarkDb, catalog: &Catalog) -> Option<Self> {
        db.get(id).map(|landmark| Self::new(id, landmark, catalog))
    }
}

/// Host of a URL for display, without a leading `www.`. Anything that does
/// not look like an absolute URL is returned unchanged.
pub fn domain_from_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    if scheme.is_empty() {
        return url.to_string();
    }
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
    let host = host_port.split(':').next().unwrap_or_default();
    if host.is_empty() {
        return url.to_string();
    }
    let host = host.to_lowercase();
    host.strip_prefix("www.").map(str::to_string).unwrap_or(host)
}
