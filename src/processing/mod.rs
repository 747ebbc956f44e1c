//! Aggregation, pivoting and the validity gate.
//!
//! These are the shape-independent building blocks the chart transformers compose:
//!
//! - [`aggregate()`]: group rows by a dimension and reduce each series under an [`AggregateOp`]
//! - [`pivot()`]: reshape groups into one zero-filled [`crate::chart::OutputRow`] per group
//! - [`check_renderable()`]: reject results with no renderable numeric signal
//!
//! ## Example: group → pivot → gate
//!
//! ```rust
//! use chart_shaping::config::AggregateOp;
//! use chart_shaping::processing::{aggregate, check_renderable, pivot, SeriesSource};
//! use chart_shaping::types::{RawDataset, Value};
//!
//! let ds = RawDataset::from_records(vec![
//!     vec![
//!         ("region", Value::from("east")),
//!         ("product", Value::from("a")),
//!         ("sales", Value::from(10_i64)),
//!     ],
//!     vec![
//!         ("region", Value::from("west")),
//!         ("product", Value::from("b")),
//!         ("sales", Value::from(7_i64)),
//!     ],
//! ]);
//!
//! let grouped = aggregate(
//!     &ds,
//!     0,
//!     SeriesSource::Stacked { stack: 1, measure: Some(2) },
//!     AggregateOp::Sum,
//! );
//! let (rows, series_keys) = pivot(grouped);
//!
//! // "east" never saw product "b": the pivot writes an explicit zero.
//! assert_eq!(rows[0].value("b"), Some(0.0));
//! assert!(check_renderable(&rows, &series_keys).is_ok());
//! ```
//!
//! [`AggregateOp`]: crate::config::AggregateOp

pub mod aggregate;
pub mod pivot;
pub mod validity;

pub use aggregate::{aggregate, Accumulator, Aggregated, Group, SeriesSource, VALUE_SERIES};
pub use pivot::{pivot, sort_descending};
pub use validity::check_renderable;
