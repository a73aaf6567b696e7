//! # Facet Catalog
//!
//! Distinct filterable values across the dataset: sorted tag and people lists
//! for the filter sidebar, plus the dataset's year span for the timeline.
//! Derived once from the store; the store never changes afterwards.

use std::collections::BTreeSet;

use crate::store::EventStore;

/// Sorted, deduplicated facet values plus the dataset year span.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FacetCatalog {
    /// All distinct tags, sorted
    pub tags: Vec<String>,
    /// All distinct people, sorted
    pub people: Vec<String>,
    /// Earliest event year (None for an empty store)
    pub min_year: Option<i32>,
    /// Latest event year (None for an empty store)
    pub max_year: Option<i32>,
}

impl FacetCatalog {
    /// Collect facet values from every event in the store.
    pub fn from_store(store: &EventStore) -> Self {
        let mut tags = BTreeSet::new();
        let mut people = BTreeSet::new();
        let mut min_year = None;
        let mut max_year = None;

        for event in store.iter() {
            tags.extend(event.tags.iter().cloned());
            people.extend(event.people.iter().cloned());
            let year = event.year();
            min_year = Some(min_year.map_or(year, |y: i32| y.min(year)));
            max_year = Some(max_year.map_or(year, |y: i32| y.max(year)));
        }

        Self {
            tags: tags.into_iter().collect(),
            people: people.into_iter().collect(),
            min_year,
            max_year,
        }
    }
}
