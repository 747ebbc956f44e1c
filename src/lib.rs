//! `chart-shaping` turns the raw answer of an analytic query (a flat list of JSON-like records)
//! into chart-ready series, without the caller having to say which column is which.
//!
//! The primary entrypoint is [`chart::transform`]. Given a [`types::RawDataset`] and a
//! [`config::TransformConfig`], it:
//!
//! - classifies columns from a row sample ([`inference::classify_columns`])
//! - picks the grouping dimension and the measure, honoring pinned keys when present
//! - aggregates by the dimension with sum/count/avg/min/max ([`processing::aggregate`])
//! - pivots into the row layout the requested [`config::ChartShape`] expects
//! - gates the output: a result with no series or only zeros comes back `valid == false`
//!
//! ## Quick example
//!
//! ```rust
//! use chart_shaping::config::{AggregateOp, ChartShape, TransformConfig};
//! use chart_shaping::ingestion::dataset_from_json_str;
//! use chart_shaping::transform;
//!
//! # fn main() -> Result<(), chart_shaping::TransformError> {
//! let ds = dataset_from_json_str(
//!     r#"[
//!         {"region": "east", "channel": "web",    "revenue": 100},
//!         {"region": "east", "channel": "retail", "revenue": 40},
//!         {"region": "west", "channel": "web",    "revenue": 70}
//!     ]"#,
//! )?;
//!
//! let config = TransformConfig::for_shape(ChartShape::Bar).with_op(AggregateOp::Sum);
//! let result = transform(&ds, &config)?;
//!
//! assert!(result.valid);
//! assert_eq!(result.index_key, "region");
//! assert_eq!(result.series_keys, vec!["web".to_string(), "retail".to_string()]);
//! // Missing (group, series) cells are zero-filled.
//! assert_eq!(result.data[1].value("retail"), Some(0.0));
//! # Ok(())
//! # }
//! ```
//!
//! ## Failure channels
//!
//! Degenerate input never panics. Empty data, no usable dimension, or an all-zero series yield a
//! [`chart::TransformResult`] with `valid == false` and an [`chart::InvalidReason`]. The one
//! error is [`TransformError::NoNumericColumn`]; use [`chart::transform_or_invalid`] to fold it
//! into the invalid result too.
//!
//! ## Modules
//!
//! - [`ingestion`]: JSON text/values into a [`types::RawDataset`]
//! - [`inference`]: column classification and dimension/measure ranking
//! - [`processing`]: grouping, pivoting, and the validity gate
//! - [`chart`]: per-shape transformers and the result type
//! - [`memo`]: single-entry cache keyed on dataset identity + config
//! - [`execution`]: parallel batches of configs over one dataset
//! - [`observability`]: events, severities, and observers
//! - [`config`], [`error`], [`types`]

pub mod chart;
pub mod config;
pub mod error;
pub mod execution;
pub mod inference;
pub mod ingestion;
pub mod memo;
pub mod observability;
pub mod processing;
pub mod types;

pub use chart::{transform, transform_or_invalid, transform_with_options, TransformResult};
pub use config::{AggregateOp, ChartShape, TransformConfig};
pub use error::{EngineResult, TransformError};
