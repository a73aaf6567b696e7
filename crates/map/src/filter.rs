//! # Visibility Filter
//!
//! Derives the subset of events the map should consider for display: every
//! event matching all active facets, plus the pinned selection and its direct
//! relations regardless of facets (so a user can inspect a selected event's
//! neighborhood even when filters would hide it).
//!
//! ## Table of Contents
//! 1. FilterState — Active facet selections
//! 2. visible_events — Ordered, deduplicated visible set

use std::collections::{BTreeSet, HashSet};

use chronomap_events::{EventStore, HistoricalEvent};

// ============================================================================
// 1. FilterState — Active facet selections
// ============================================================================

/// The active facet filters. Each facet is independent; an event must satisfy
/// every *active* facet to match. Empty tag/people sets and a `None` year mean
/// the facet is inactive and matches everything.
///
/// Ordered sets keep equality checks and derived output deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Year facet: event year must equal this exactly when set
    pub active_year: Option<i32>,
    /// Tag facet: event must carry at least one selected tag when non-empty
    pub selected_tags: BTreeSet<String>,
    /// People facet: event must name at least one selected person when non-empty
    pub selected_people: BTreeSet<String>,
}

impl FilterState {
    /// A filter with no active facets (everything visible).
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no facet is active.
    pub fn is_empty(&self) -> bool {
        self.active_year.is_none()
            && self.selected_tags.is_empty()
            && self.selected_people.is_empty()
    }

    /// Deactivate all facets.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether an event satisfies every active facet.
    pub fn matches(&self, event: &HistoricalEvent) -> bool {
        let matches_year = self.active_year.is_none_or(|year| event.year() == year);
        let matches_tags = self.selected_tags.is_empty()
            || event.tags.iter().any(|t| self.selected_tags.contains(t));
        let matches_people = self.selected_people.is_empty()
            || event.people.iter().any(|p| self.selected_people.contains(p));
        matches_year && matches_tags && matches_people
    }
}

// ============================================================================
// 2. visible_events — Ordered, deduplicated visible set
// ============================================================================

/// Derive the visible event set: facet-matching events in first-occurrence
/// store order, then the pinned selection and its resolvable related targets
/// appended (facet-exempt). Deduplicated by id; dangling related ids are
/// skipped silently. An empty result is valid.
pub fn visible_events(
    store: &EventStore,
    filter: &FilterState,
    selected: Option<&HistoricalEvent>,
) -> Vec<HistoricalEvent> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut visible: Vec<HistoricalEvent> = Vec::new();

    for event in store.iter() {
        if filter.matches(event) && seen.insert(event.id.as_str()) {
            visible.push(event.clone());
        }
    }

    if let Some(selected) = selected {
        if seen.insert(selected.id.as_str()) {
            visible.push(selected.clone());
        }
        for edge in &selected.related_events {
            if let Some(related) = store.get(&edge.id) {
                if seen.insert(related.id.as_str()) {
                    visible.push(related.clone());
                }
            }
        }
    }

    visible
}
