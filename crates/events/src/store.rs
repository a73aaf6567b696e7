//! # Event Store
//!
//! The immutable dataset store. Loaded once from a JSON file (or an embedded
//! JSON string) at startup; all map state is derived from it afterwards.
//!
//! ## Table of Contents
//! 1. EventStore — Id-indexed immutable collection
//! 2. Loading
//! 3. StoreError

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::event::HistoricalEvent;

// ============================================================================
// 1. EventStore — Id-indexed immutable collection
// ============================================================================

/// The full collection of historical events, indexed by id.
///
/// Construction validates id uniqueness; related-event references are allowed
/// to dangle (the derivation pipeline skips them).
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<HistoricalEvent>,
    by_id: HashMap<String, usize>,
}

impl EventStore {
    /// Build a store from already-parsed events, rejecting duplicate ids.
    pub fn from_events(events: Vec<HistoricalEvent>) -> Result<Self, StoreError> {
        let mut by_id = HashMap::with_capacity(events.len());
        for (index, event) in events.iter().enumerate() {
            if by_id.insert(event.id.clone(), index).is_some() {
                return Err(StoreError::DuplicateId(event.id.clone()));
            }
        }

        let store = Self { events, by_id };
        for event in &store.events {
            for edge in &event.related_events {
                if !store.contains(&edge.id) {
                    tracing::debug!(
                        "event {} references unknown event {} — edge will be skipped",
                        event.id,
                        edge.id
                    );
                }
            }
        }
        Ok(store)
    }

    /// Look up an event by id.
    pub fn get(&self, id: &str) -> Option<&HistoricalEvent> {
        self.by_id.get(id).map(|&index| &self.events[index])
    }

    /// Whether an event with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Iterate events in dataset order.
    pub fn iter(&self) -> impl Iterator<Item = &HistoricalEvent> {
        self.events.iter()
    }

    /// All events in dataset order.
    pub fn events(&self) -> &[HistoricalEvent] {
        &self.events
    }

    /// Number of events in the store.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the store holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

// ============================================================================
// 2. Loading
// ============================================================================

impl EventStore {
    /// Load the dataset from a JSON file (an array of event objects).
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_json_str(&content)?;
        tracing::info!("Loaded {} events from {}", store.len(), path.display());
        Ok(store)
    }

    /// Parse the dataset from a JSON string (used for embedded datasets).
    pub fn from_json_str(content: &str) -> Result<Self, StoreError> {
        let events: Vec<HistoricalEvent> = serde_json::from_str(content)?;
        Self::from_events(events)
    }
}

// ============================================================================
// 3. StoreError
// ============================================================================

/// Errors from loading or validating the event dataset.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File I/O error
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// JSON parse error
    #[error("invalid event dataset: {0}")]
    Json(#[from] serde_json::Error),
    /// Two records share an id
    #[error("duplicate event id: {0}")]
    DuplicateId(String),
}
