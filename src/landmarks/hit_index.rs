//! R-tree index over landmark marker hit boxes.
//!
//! Markers are stored in image-percentage space, so a hit test is a point
//! query after mapping the pointer through the viewport's inverse transform.

use crate::geometry::Point;
use rstar::{AABB, RTree, RTreeObject};

/// A marker's square hit box, indexed by its position in the overlay.
#[derive(Debug, Clone, Copy)]
pub struct HitEntry {
    pub slot: usize,
    pub center: Point,
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl HitEntry {
    pub fn new(slot: usize, center: Point, radius: f64) -> Self {
        Self {
            slot,
            center,
            min_x: center.x - radius,
            min_y: center.y - radius,
            max_x: center.x + radius,
            max_y: center.y + radius,
        }
    }

    #[inline]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

impl RTreeObject for HitEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.min_x, self.min_y], [self.max_x, self.max_y])
    }
}

impl PartialEq for HitEntry {
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot
    }
}

/// Point queries over marker hit boxes.
pub struct HitIndex {
    tree: RTree<HitEntry>,
}

impl HitIndex {
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Bulk-load from `(slot, center)` pairs, all with the same radius
    pub fn from_points<I>(points: I, radius: f64) -> Self
    where
        I: IntoIterator<Item = (usize, Point)>,
    {
        let entries: Vec<HitEntry> = points
            .into_iter()
            .map(|(slot, center)| HitEntry::new(slot, center, radius))
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Every slot whose hit box contains the point
    pub fn query_point(&self, point: Point) -> Vec<usize> {
        let envelope = AABB::from_point([point.x, point.y]);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| entry.contains_point(point.x, point.y))
            .map(|entry| entry.slot)
            .collect()
    }

    /// Hit slots ordered by distance from the point, closest first
    pub fn query_nearest(&self, point: Point) -> Vec<usize> {
        let envelope = AABB::from_point([point.x, point.y]);
        let mut hits: Vec<&HitEntry> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| entry.contains_point(point.x, point.y))
            .collect();
        hits.sort_by(|a, b| {
            a.center
                .distance(point)
                .total_cmp(&b.center.distance(point))
                .then(a.slot.cmp(&b.slot))
        });
        hits.into_iter().map(|entry| entry.slot).collect()
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl Default for HitIndex {
    fn default() -> Self {
        Self::new()
    }
}
