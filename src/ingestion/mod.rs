//! Ingestion of upstream query answers into a typed [`crate::types::RawDataset`].
//!
//! Rows reach the engine as flat JSON objects with no out-of-band schema. Ingestion is the single
//! place where cells are inspected for their JSON type; see [`crate::types::Value`].

pub mod json;

pub use json::{dataset_from_json_str, dataset_from_json_values};
