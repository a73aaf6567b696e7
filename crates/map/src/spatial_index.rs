//! # Spatial Index
//!
//! R-tree over derived location points for runtime geographic queries by the
//! presentation layer ("which events sit near this map position"). Pixel-space
//! hit-testing stays with the renderer; this index answers in degrees and
//! meters. Rebuilt from the bucket list on every derivation.
//!
//! ## Table of Contents
//! 1. IndexedPoint — R-tree entry
//! 2. PointIndex — Queries

use geo::{Distance, Haversine, Point};
use rstar::{PointDistance, RTree, RTreeObject, AABB};

use crate::cluster::LocationBucket;

/// Meters per degree of latitude (WGS84 mean), used to size query envelopes.
const METERS_PER_DEGREE: f64 = 111_320.0;

// ============================================================================
// 1. IndexedPoint — R-tree entry
// ============================================================================

/// One bucket centroid in the index, carrying every event id at that position.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedPoint {
    /// All event ids sharing this merged position
    pub event_ids: Vec<String>,
    /// Centroid longitude (degrees)
    pub lng: f64,
    /// Centroid latitude (degrees)
    pub lat: f64,
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.lng, self.lat])
    }
}

impl PointDistance for IndexedPoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.lng - point[0];
        let dy = self.lat - point[1];
        dx * dx + dy * dy
    }
}

// ============================================================================
// 2. PointIndex — Queries
// ============================================================================

/// R-tree spatial index over the current derivation's location points.
#[derive(Debug, Clone, Default)]
pub struct PointIndex {
    tree: RTree<IndexedPoint>,
}

impl PointIndex {
    /// Bulk-load the index from derived buckets (one entry per bucket).
    pub fn build(buckets: &[LocationBucket]) -> Self {
        let entries = buckets
            .iter()
            .map(|bucket| IndexedPoint {
                event_ids: bucket.event_ids.clone(),
                lng: bucket.lng,
                lat: bucket.lat,
            })
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Nearest indexed point to a position, in planar degree space.
    pub fn nearest(&self, lng: f64, lat: f64) -> Option<&IndexedPoint> {
        self.tree.nearest_neighbor(&[lng, lat])
    }

    /// All indexed points within `radius_m` meters of a position.
    /// Envelope pre-filter in degrees, then an exact haversine check.
    pub fn within_radius_m(&self, lng: f64, lat: f64, radius_m: f64) -> Vec<&IndexedPoint> {
        let lat_margin = radius_m / METERS_PER_DEGREE;
        let lng_margin = lat_margin / lat.to_radians().cos().abs().max(1e-6);
        let envelope = AABB::from_corners(
            [lng - lng_margin, lat - lat_margin],
            [lng + lng_margin, lat + lat_margin],
        );
        let origin = Point::new(lng, lat);
        self.tree
            .locate_in_envelope(&envelope)
            .filter(|p| Haversine::distance(origin, Point::new(p.lng, p.lat)) <= radius_m)
            .collect()
    }

    /// All indexed points inside a lng/lat bounding box.
    pub fn query_rect(
        &self,
        min_lng: f64,
        min_lat: f64,
        max_lng: f64,
        max_lat: f64,
    ) -> Vec<&IndexedPoint> {
        let envelope = AABB::from_corners([min_lng, min_lat], [max_lng, max_lat]);
        self.tree.locate_in_envelope(&envelope).collect()
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
