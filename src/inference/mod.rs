//! Schema inference: column roles and default axis selection.
//!
//! - [`classify_columns`]: assigns each column a [`ColumnRole`] from a leading-row sample
//! - [`select_dimension`] / [`select_measure`]: pick defaults when the caller has not pinned one
//!
//! Roles are a default-selection aid only. Pinned keys bypass them entirely.

pub mod classify;
pub mod select;

pub use classify::{classify_columns, is_excluded_name, Classification, ColumnProfile, ColumnRole};
pub use select::{
    select_dimension, select_indicators, select_measure, select_scatter_axes,
    select_stack_dimension, PREFERRED_DIMENSION,
};
