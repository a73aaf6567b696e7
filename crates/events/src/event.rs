//! # Historical Event Records
//!
//! Typed records for the static event dataset. The dataset is a JSON array of
//! camelCase objects (exported from the curation tooling), so the structs here
//! deserialize with `rename_all = "camelCase"`.
//!
//! ## Table of Contents
//! 1. HistoricalEvent — A single dated, located event
//! 2. EventLocation — WGS84 position with optional place labels
//! 3. RelatedEvent — Directed, reasoned edge to another event

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

// ============================================================================
// 1. HistoricalEvent — A single dated, located event
// ============================================================================

/// A single historical event from the static dataset.
///
/// Records are immutable after load. `tags` and `people` are optional in the
/// dataset and default to empty, which means "never matched by an active facet
/// filter, never excluded by an inactive one".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalEvent {
    /// Unique identifier across the whole dataset
    pub id: String,
    /// Short display title
    pub title: String,
    /// Longer description for the detail popup
    pub description: String,
    /// Calendar date (ISO 8601 in the dataset); comparisons are year-granular
    pub date: NaiveDate,
    /// Where the event happened
    pub location: EventLocation,
    /// Directed edges to other events, each with a display reason.
    /// Ids that resolve to no record are tolerated and skipped downstream.
    #[serde(default)]
    pub related_events: Vec<RelatedEvent>,
    /// Free-form tag facet values
    #[serde(default)]
    pub tags: Vec<String>,
    /// Free-form people facet values
    #[serde(default)]
    pub people: Vec<String>,
}

impl HistoricalEvent {
    /// Calendar year of the event, used by the year facet filter.
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Whether `id` is a related-event target of this event.
    pub fn is_related_to(&self, id: &str) -> bool {
        self.related_events.iter().any(|edge| edge.id == id)
    }
}

// ============================================================================
// 2. EventLocation — WGS84 position with optional place labels
// ============================================================================

/// WGS84 position of an event, with optional human-readable place labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventLocation {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// City label, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// State/region label, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl EventLocation {
    /// Position as a GeoJSON-ordered pair (longitude first).
    pub fn lng_lat(&self) -> (f64, f64) {
        (self.longitude, self.latitude)
    }
}

// ============================================================================
// 3. RelatedEvent — Directed, reasoned edge to another event
// ============================================================================

/// A directed reference from one event to another with a human-readable
/// justification. A→B carrying a reason does not imply any B→A edge; line
/// geometry treats the pair symmetrically while the reason stays directional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedEvent {
    /// Target event id (may dangle; downstream consumers skip silently)
    pub id: String,
    /// Why the two events are connected, shown on line hover
    pub reason: String,
}
