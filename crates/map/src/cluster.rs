//! # Location Aggregator
//!
//! Groups visible events into coordinate buckets and emits GeoJSON point
//! features for the external clusterer. Bucketing rounds coordinates to merge
//! near-duplicate positions from source noise; the emitted position is the
//! mean of the raw member coordinates, not the rounded corner, so merged
//! points stay representative of their contributing events.
//!
//! One feature is emitted *per member event*, not per bucket, so a clusterer
//! that counts features reports the true number of events rather than the
//! number of distinct locations.
//!
//! ## Table of Contents
//! 1. PointRole — Display priority relative to the selection
//! 2. LocationBucket — Merged coordinate bucket
//! 3. location_buckets — Bucketing + centroid + role assignment
//! 4. location_points — Per-event GeoJSON emission

use std::collections::{HashMap, HashSet};

use geojson::{Feature, FeatureCollection, Geometry, Value};
use serde::{Deserialize, Serialize};
use serde_json::json;

use chronomap_events::HistoricalEvent;

/// Default coordinate rounding decimals (~1.1 m at the equator).
pub const DEFAULT_GROUP_PRECISION: u32 = 5;

// ============================================================================
// 1. PointRole — Display priority relative to the selection
// ============================================================================

/// Display role of a bucket relative to the current selection.
/// Precedence: `Primary` > `Related` > `Default`. The role is a per-bucket
/// property; every event sharing a bucket shares its role and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointRole {
    /// Bucket contains the selected event
    Primary,
    /// Bucket contains a related-event target of the selection
    Related,
    /// No relation to the selection
    Default,
}

impl PointRole {
    /// Property value used in emitted GeoJSON features.
    pub fn as_str(&self) -> &'static str {
        match self {
            PointRole::Primary => "primary",
            PointRole::Related => "related",
            PointRole::Default => "default",
        }
    }
}

// ============================================================================
// 2. LocationBucket — Merged coordinate bucket
// ============================================================================

/// A merged coordinate bucket: all events whose rounded coordinates coincide,
/// positioned at the mean of their raw coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationBucket {
    /// Centroid longitude (mean of raw member longitudes)
    pub lng: f64,
    /// Centroid latitude (mean of raw member latitudes)
    pub lat: f64,
    /// Member event ids in visible-set order
    pub event_ids: Vec<String>,
    /// Shared display role for every member
    pub role: PointRole,
}

/// Integer bucket key from coordinates rounded to `precision` decimals.
/// Scaled integers make the key `Eq + Hash` without float comparisons.
fn bucket_key(lat: f64, lng: f64, precision: u32) -> (i64, i64) {
    let scale = 10f64.powi(precision as i32);
    ((lat * scale).round() as i64, (lng * scale).round() as i64)
}

// ============================================================================
// 3. location_buckets — Bucketing + centroid + role assignment
// ============================================================================

/// Group the visible set into coordinate buckets, in first-occurrence order.
///
/// Role per bucket: `Primary` if it holds the selected event, else `Related`
/// if it holds any related-event target of the selection, else `Default`.
pub fn location_buckets(
    visible: &[HistoricalEvent],
    selected: Option<&HistoricalEvent>,
    precision: u32,
) -> Vec<LocationBucket> {
    struct Accumulator {
        lat_sum: f64,
        lng_sum: f64,
        ids: Vec<String>,
    }

    let mut order: Vec<(i64, i64)> = Vec::new();
    let mut grouped: HashMap<(i64, i64), Accumulator> = HashMap::new();

    for event in visible {
        let key = bucket_key(event.location.latitude, event.location.longitude, precision);
        let entry = grouped.entry(key).or_insert_with(|| {
            order.push(key);
            Accumulator {
                lat_sum: 0.0,
                lng_sum: 0.0,
                ids: Vec::new(),
            }
        });
        entry.lat_sum += event.location.latitude;
        entry.lng_sum += event.location.longitude;
        entry.ids.push(event.id.clone());
    }

    let selected_id = selected.map(|e| e.id.as_str());
    let related_ids: HashSet<&str> = selected
        .map(|e| e.related_events.iter().map(|r| r.id.as_str()).collect())
        .unwrap_or_default();

    order
        .into_iter()
        .filter_map(|key| grouped.remove(&key))
        .map(|acc| {
            let count = acc.ids.len() as f64;
            let role = if selected_id
                .is_some_and(|id| acc.ids.iter().any(|member| member == id))
            {
                PointRole::Primary
            } else if acc.ids.iter().any(|id| related_ids.contains(id.as_str())) {
                PointRole::Related
            } else {
                PointRole::Default
            };
            LocationBucket {
                lng: acc.lng_sum / count,
                lat: acc.lat_sum / count,
                event_ids: acc.ids,
                role,
            }
        })
        .collect()
}

// ============================================================================
// 4. location_points — Per-event GeoJSON emission
// ============================================================================

/// Emit one GeoJSON point feature per member event of each bucket, at the
/// bucket centroid. Properties match what the map layers expect: `eventIds`
/// (comma-joined full member list, so any feature can resolve "who else is
/// here"), `role`, and the centroid `lng`/`lat`.
pub fn location_points(buckets: &[LocationBucket]) -> FeatureCollection {
    let mut features = Vec::new();

    for bucket in buckets {
        let event_ids = bucket.event_ids.join(",");
        for _ in &bucket.event_ids {
            let mut properties = serde_json::Map::new();
            properties.insert("eventIds".to_string(), json!(event_ids));
            properties.insert("role".to_string(), json!(bucket.role.as_str()));
            properties.insert("lng".to_string(), json!(bucket.lng));
            properties.insert("lat".to_string(), json!(bucket.lat));

            features.push(Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::Point(vec![bucket.lng, bucket.lat]))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            });
        }
    }

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronomap_events::{EventLocation, RelatedEvent};
    use chrono::NaiveDate;

    fn make_event(id: &str, lat: f64, lng: f64) -> HistoricalEvent {
        HistoricalEvent {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            date: NaiveDate::from_ymd_opt(1850, 1, 1).unwrap(),
            location: EventLocation {
                latitude: lat,
                longitude: lng,
                city: None,
                state: None,
            },
            related_events: Vec::new(),
            tags: Vec::new(),
            people: Vec::new(),
        }
    }

    #[test]
    fn test_near_duplicates_merge_to_raw_centroid() {
        // Both round to the same 5-decimal key; centroid must be the mean of
        // the raw coordinates, not the rounded corner.
        let visible = vec![
            make_event("a", 1.000010, 2.000010),
            make_event("b", 1.000014, 2.000014),
        ];
        let buckets = location_buckets(&visible, None, DEFAULT_GROUP_PRECISION);
        assert_eq!(buckets.len(), 1);
        let bucket = &buckets[0];
        assert!((bucket.lat - 1.000012).abs() < 1e-9);
        assert!((bucket.lng - 2.000012).abs() < 1e-9);
        assert_eq!(bucket.event_ids, vec!["a", "b"]);
    }

    #[test]
    fn test_distinct_locations_stay_separate() {
        let visible = vec![make_event("a", 10.0, 20.0), make_event("b", 30.0, 40.0)];
        let buckets = location_buckets(&visible, None, DEFAULT_GROUP_PRECISION);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].event_ids, vec!["a"]);
        assert_eq!(buckets[1].event_ids, vec!["b"]);
    }

    #[test]
    fn test_one_feature_per_member_event() {
        let visible = vec![
            make_event("a", 5.0, 5.0),
            make_event("b", 5.0, 5.0),
            make_event("c", 5.0, 5.0),
        ];
        let buckets = location_buckets(&visible, None, DEFAULT_GROUP_PRECISION);
        let collection = location_points(&buckets);
        assert_eq!(collection.features.len(), 3);
        for feature in &collection.features {
            let props = feature.properties.as_ref().unwrap();
            assert_eq!(props["eventIds"], "a,b,c");
        }
    }

    #[test]
    fn test_role_primary_takes_precedence() {
        let selected = make_event("a", 5.0, 5.0);
        // Bucket holds the selected event and an unrelated one
        let visible = vec![selected.clone(), make_event("x", 5.0, 5.0)];
        let buckets = location_buckets(&visible, Some(&selected), DEFAULT_GROUP_PRECISION);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].role, PointRole::Primary);
    }

    #[test]
    fn test_role_related_for_target_buckets() {
        let mut selected = make_event("a", 5.0, 5.0);
        selected.related_events.push(RelatedEvent {
            id: "b".to_string(),
            reason: "follow-up".to_string(),
        });
        let visible = vec![
            selected.clone(),
            make_event("b", 10.0, 10.0),
            make_event("c", 20.0, 20.0),
        ];
        let buckets = location_buckets(&visible, Some(&selected), DEFAULT_GROUP_PRECISION);
        assert_eq!(buckets[0].role, PointRole::Primary);
        assert_eq!(buckets[1].role, PointRole::Related);
        assert_eq!(buckets[2].role, PointRole::Default);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(PointRole::Primary.as_str(), "primary");
        assert_eq!(json!(PointRole::Related), json!("related"));
    }

    #[test]
    fn test_feature_geometry_matches_centroid() {
        let visible = vec![make_event("a", 48.8566, 2.3522)];
        let buckets = location_buckets(&visible, None, DEFAULT_GROUP_PRECISION);
        let collection = location_points(&buckets);
        let feature = &collection.features[0];
        match &feature.geometry.as_ref().unwrap().value {
            Value::Point(coords) => {
                assert!((coords[0] - 2.3522).abs() < 1e-9);
                assert!((coords[1] - 48.8566).abs() < 1e-9);
            }
            other => panic!("expected point geometry, got {other:?}"),
        }
    }
}
