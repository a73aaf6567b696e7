//! # Chronomap Map — View Derivation for the Historical-Events Map
//!
//! Pure, synchronous derivations from the immutable event store to the three
//! structures the map renderer consumes: the visible event set, per-location
//! point features, and connection lines for the selected event. Rendering,
//! clustering-by-zoom, and popups live in the presentation layer; this crate
//! only produces their inputs.
//!
//! ## Data flow
//! ```text
//! EventStore → filter → visible set → { cluster → points, connections }
//! ```
//! All stages are pure functions of (store, filter state, selection); the
//! `MapView` container memoizes the derivation on equality-checked inputs.
//!
//! ## Modules
//! - `config` — Parse `map.toml` (dataset path, grouping, playback, styling)
//! - `filter` — Facet filtering + pinned-selection visibility
//! - `cluster` — Coordinate bucketing, centroids, and role assignment
//! - `connections` — Line features between a selected event and its relations
//! - `view` — Memoized derivation container
//! - `spatial_index` — R-tree over derived points for geographic queries
//! - `playback` — Year window and tick-driven timeline playback
//!
//! ## Table of Contents
//! 1. Module declarations
//! 2. Re-exports

pub mod cluster;
pub mod config;
pub mod connections;
pub mod filter;
pub mod playback;
pub mod spatial_index;
pub mod view;

pub use cluster::{location_buckets, location_points, LocationBucket, PointRole};
pub use config::{MapConfig, MapConfigError};
pub use connections::connection_features;
pub use filter::{visible_events, FilterState};
pub use playback::{Playback, YearWindow};
pub use spatial_index::{IndexedPoint, PointIndex};
pub use view::{MapView, ViewData, ViewInputs};
