//! # Connection Builder
//!
//! Derives GeoJSON line features between a selected event and its related
//! events. Only edges whose target is currently visible produce a line;
//! everything else is dropped silently (a related event may be filtered out
//! independently without being pinned).
//!
//! ## Table of Contents
//! 1. connection_features — Line features for the selection
//! 2. connection_label — Direction-stable label text

use geojson::{Feature, FeatureCollection, Geometry, Value};
use serde_json::json;

use chronomap_events::HistoricalEvent;

// ============================================================================
// 1. connection_features — Line features for the selection
// ============================================================================

/// One line feature per related edge of `selected` whose target is in the
/// visible set. Geometry always runs selected → target; the label ordering is
/// cosmetic only (see `connection_label`). Each feature carries the edge's
/// `reason` verbatim for hover display.
pub fn connection_features(
    selected: Option<&HistoricalEvent>,
    visible: &[HistoricalEvent],
) -> FeatureCollection {
    let mut features = Vec::new();

    if let Some(selected) = selected {
        for edge in &selected.related_events {
            let Some(target) = visible.iter().find(|e| e.id == edge.id) else {
                continue;
            };

            let (lng1, lat1) = selected.location.lng_lat();
            let (lng2, lat2) = target.location.lng_lat();

            let mut properties = serde_json::Map::new();
            properties.insert("label".to_string(), json!(connection_label(selected, target)));
            properties.insert("reason".to_string(), json!(edge.reason));

            features.push(Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::LineString(vec![
                    vec![lng1, lat1],
                    vec![lng2, lat2],
                ]))),
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

// ============================================================================
// 2. connection_label — Direction-stable label text
// ============================================================================

/// Label for a connection line: both titles joined by `<->`, ordered so the
/// text reads the same no matter which end is selected. The more-western
/// (smaller longitude) title comes first; on equal longitudes the more-
/// southern title comes first; a full coordinate tie puts the target first.
pub fn connection_label(selected: &HistoricalEvent, target: &HistoricalEvent) -> String {
    let (lng1, lat1) = selected.location.lng_lat();
    let (lng2, lat2) = target.location.lng_lat();

    if lng1 < lng2 {
        format!("{} <-> {}", selected.title, target.title)
    } else if lng1 > lng2 {
        format!("{} <-> {}", target.title, selected.title)
    } else if lat1 < lat2 {
        format!("{} <-> {}", selected.title, target.title)
    } else {
        format!("{} <-> {}", target.title, selected.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronomap_events::{EventLocation, RelatedEvent};
    use chrono::NaiveDate;

    fn make_event(id: &str, title: &str, lat: f64, lng: f64) -> HistoricalEvent {
        HistoricalEvent {
            id: id.to_string(),
            title: title.to_string(),
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

    fn relate(event: &mut HistoricalEvent, id: &str, reason: &str) {
        event.related_events.push(RelatedEvent {
            id: id.to_string(),
            reason: reason.to_string(),
        });
    }

    #[test]
    fn test_no_selection_yields_empty_collection() {
        let visible = vec![make_event("a", "A", 0.0, 0.0)];
        let collection = connection_features(None, &visible);
        assert!(collection.features.is_empty());
    }

    #[test]
    fn test_line_runs_selected_to_target() {
        let mut selected = make_event("a", "A", 1.0, 2.0);
        relate(&mut selected, "b", "because");
        let visible = vec![selected.clone(), make_event("b", "B", 3.0, 4.0)];

        let collection = connection_features(Some(&selected), &visible);
        assert_eq!(collection.features.len(), 1);
        let feature = &collection.features[0];
        match &feature.geometry.as_ref().unwrap().value {
            Value::LineString(coords) => {
                assert_eq!(coords[0], vec![2.0, 1.0]);
                assert_eq!(coords[1], vec![4.0, 3.0]);
            }
            other => panic!("expected line geometry, got {other:?}"),
        }
        let props = feature.properties.as_ref().unwrap();
        assert_eq!(props["reason"], "because");
    }

    #[test]
    fn test_invisible_target_is_dropped() {
        let mut selected = make_event("a", "A", 1.0, 2.0);
        relate(&mut selected, "b", "hidden");
        let visible = vec![selected.clone()];
        let collection = connection_features(Some(&selected), &visible);
        assert!(collection.features.is_empty());
    }

    #[test]
    fn test_dangling_reference_produces_no_feature() {
        let mut selected = make_event("a", "A", 1.0, 2.0);
        relate(&mut selected, "zzz", "missing");
        let visible = vec![selected.clone(), make_event("b", "B", 3.0, 4.0)];
        let collection = connection_features(Some(&selected), &visible);
        assert!(collection.features.is_empty());
    }

    #[test]
    fn test_label_puts_western_title_first() {
        let selected = make_event("a", "A", 0.0, -10.0);
        let target = make_event("b", "B", 0.0, 5.0);
        assert_eq!(connection_label(&selected, &target), "A <-> B");

        let selected = make_event("a", "A", 0.0, 5.0);
        let target = make_event("b", "B", 0.0, -10.0);
        assert_eq!(connection_label(&selected, &target), "B <-> A");
    }

    #[test]
    fn test_label_falls_back_to_southern_title() {
        let selected = make_event("a", "A", -3.0, 7.0);
        let target = make_event("b", "B", 8.0, 7.0);
        assert_eq!(connection_label(&selected, &target), "A <-> B");

        let selected = make_event("a", "A", 8.0, 7.0);
        let target = make_event("b", "B", -3.0, 7.0);
        assert_eq!(connection_label(&selected, &target), "B <-> A");
    }

    #[test]
    fn test_label_coordinate_tie_puts_target_first() {
        let selected = make_event("a", "A", 7.0, 7.0);
        let target = make_event("b", "B", 7.0, 7.0);
        assert_eq!(connection_label(&selected, &target), "B <-> A");
    }
}
