//! # Chronomap Events — Historical Event Dataset
//!
//! The static dataset behind the Chronomap viewer: a few hundred historical
//! event records loaded once at startup and never mutated. Everything else in
//! the workspace derives its output from this store.
//!
//! ## Modules
//! - `event` — Event record types (`HistoricalEvent`, `EventLocation`, `RelatedEvent`)
//! - `store` — Immutable `EventStore` with id-unique loading and lookups
//! - `facets` — Distinct tag/person lists and the dataset year span
//!
//! ## Table of Contents
//! 1. Module declarations
//! 2. Re-exports

pub mod event;
pub mod facets;
pub mod store;

pub use event::{EventLocation, HistoricalEvent, RelatedEvent};
pub use facets::FacetCatalog;
pub use store::{EventStore, StoreError};
