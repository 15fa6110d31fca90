//! Search, date filter, layer switching and the derived list/map views.

use super::AppContext;
use crate::catalog::{Engraving, YearRange, truncate_description, unique_neighborhoods};
use crate::map::{TileLayerKind, markers_for};
use crate::viewport::RenderSurface;
use serde::Serialize;
use tracing::debug;

/// One card in the sidebar list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListCard {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub date: String,
    pub neighborhood: String,
    pub excerpt: String,
    pub thumbnail: String,
}

impl From<&Engraving> for ListCard {
    fn from(e: &Engraving) -> Self {
        Self {
            id: e.id.clone(),
            title: e.title.clone(),
            artist: e.artist_name().to_string(),
            date: e.dates.created.clone(),
            neighborhood: e.neighborhood_label().to_string(),
            excerpt: truncate_description(&e.description),
            thumbnail: e.thumbnail_src(),
        }
    }
}

impl<S: RenderSurface> AppContext<S> {
    /// Re-derive the visible list, map markers and map bounds
    pub(crate) fn refresh_filtered(&mut self) {
        let filtered = self.view.filters.apply(self.data.catalog.items());
        self.view.visible = filtered.iter().map(|e| e.id.clone()).collect();
        self.view.markers = markers_for(filtered);
        self.view.map.fit_markers(&self.view.markers);
        debug!(
            visible = self.view.visible.len(),
            total = self.data.catalog.len(),
            "filtered collection"
        );
    }

    pub fn set_search_query(&mut self, query: &str) {
        if self.view.filters.query == query {
            return;
        }
        self.view.filters.query = query.to_string();
        self.refresh_filtered();
    }

    /// Slider year selects a ±10 year window; `None` clears the filter
    pub fn set_date_filter(&mut self, year: Option<i32>) {
        let range = year.map(YearRange::around).unwrap_or_default();
        if self.view.filters.date_range == range {
            return;
        }
        self.view.filters.date_range = range;
        self.refresh_filtered();
    }

    pub fn clear_filters(&mut self) {
        self.view.filters = Default::default();
        self.refresh_filtered();
    }

    pub fn switch_layer(&mut self, layer: TileLayerKind) -> bool {
        self.view.map.switch_layer(layer)
    }

    pub fn visible_items(&self) -> Vec<&Engraving> {
        self.view
            .visible
            .iter()
            .filter_map(|id| self.data.catalog.get(id))
            .collect()
    }

    pub fn cards(&self) -> Vec<ListCard> {
        self.visible_items().into_iter().map(ListCard::from).collect()
    }

    pub fn neighborhoods(&self) -> Vec<String> {
        unique_neighborhoods(self.data.catalog.items())
    }
}
