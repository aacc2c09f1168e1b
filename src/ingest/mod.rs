//! Ingest module for scraped expert picks.
//!
//! Fetching pages is left to the caller. This module only turns an already
//! fetched page or JSON payload into settlement inputs, driven by a
//! caller-supplied [`FieldMapping`].

pub mod mapping;
pub mod transform;

pub use mapping::{FieldMapping, FieldRule};
pub use transform::{extract_embedded_json, settlement_inputs, transform_picks, PickRecord};
