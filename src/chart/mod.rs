//! Shape transformers: raw rows in, chart-ready [`TransformResult`] out.
//!
//! [`transform`] is the single entry point every chart component calls. It classifies columns,
//! resolves pinned keys, dispatches on [`ChartShape`], and runs the validity gate:
//!
//! | Shape | Index | Series |
//! |---|---|---|
//! | bar / line / area | dimension | secondary dimension values, else `"value"` |
//! | pie / funnel / treemap | dimension | `"value"` (funnel sorted descending) |
//! | radar | dimension | every measure column, nested under `values` |
//! | scatter | first measure (X) | second measure (Y), rows not aggregated |
//!
//! ```rust
//! use chart_shaping::chart::transform;
//! use chart_shaping::config::{AggregateOp, ChartShape, TransformConfig};
//! use chart_shaping::ingestion::dataset_from_json_str;
//!
//! # fn main() -> Result<(), chart_shaping::TransformError> {
//! let ds = dataset_from_json_str(
//!     r#"[{"region":"east","sales":10},{"region":"east","sales":5},{"region":"west","sales":7}]"#,
//! )?;
//! let config = TransformConfig::for_shape(ChartShape::Bar).with_op(AggregateOp::Sum);
//! let result = transform(&ds, &config)?;
//!
//! assert!(result.valid);
//! assert_eq!(result.index_key, "region");
//! assert_eq!(result.data[0].value("value"), Some(15.0));
//! # Ok(())
//! # }
//! ```

mod categorical;
mod part_to_whole;
mod radar;
mod result;
mod scatter;

pub use result::{InvalidReason, OutputRow, RowLayout, TransformResult};

use crate::config::{ChartShape, EngineOptions, NumericFailureMode, TransformConfig};
use crate::error::{EngineResult, TransformError};
use crate::inference::{classify_columns, Classification, ColumnProfile, ColumnRole};
use crate::observability::{Diagnostics, SelectionRole, TransformContext, TransformEvent};
use crate::processing::check_renderable;
use crate::types::RawDataset;

/// Shape-specific output before gating.
pub(crate) struct Shaped {
    pub index_key: String,
    pub series_keys: Vec<String>,
    pub rows: Vec<OutputRow>,
    pub layout: RowLayout,
}

/// Why a shape transformer gave up, with whatever index key it had settled on.
pub(crate) struct Rejected {
    pub index_key: String,
    pub reason: InvalidReason,
}

impl Rejected {
    pub(crate) fn new(index_key: impl Into<String>, reason: InvalidReason) -> Self {
        Self {
            index_key: index_key.into(),
            reason,
        }
    }
}

/// Everything a shape transformer needs for one invocation.
pub(crate) struct ShapeInput<'a> {
    pub dataset: &'a RawDataset,
    pub classification: &'a Classification,
    pub config: &'a TransformConfig,
    pub opts: &'a EngineOptions,
    pub diag: &'a Diagnostics<'a>,
    /// Pinned dimension, if it names a real column.
    pub pinned_dimension: Option<&'a ColumnProfile>,
    /// Pinned measure, if it names a real column.
    pub pinned_measure: Option<&'a ColumnProfile>,
}

impl<'a> ShapeInput<'a> {
    pub(crate) fn announce(&self, role: SelectionRole, column: &ColumnProfile, auto: bool) {
        self.diag.emit(TransformEvent::ColumnSelected {
            role,
            column: column.name.clone(),
            auto,
        });
        if auto && column.role == ColumnRole::Excluded {
            self.diag.emit(TransformEvent::ExcludedColumnUsed {
                role,
                column: column.name.clone(),
            });
        }
    }

    pub(crate) fn report_coercions<'c>(
        &self,
        coerced: impl IntoIterator<Item = (&'c String, &'c usize)>,
    ) {
        for (column, count) in coerced {
            self.diag.emit(TransformEvent::ValuesCoerced {
                column: column.clone(),
                count: *count,
            });
        }
    }
}

/// Transform `dataset` for `config` with default [`EngineOptions`].
///
/// Returns [`TransformError::NoNumericColumn`] when an aggregate needs a measure but no sampled
/// column parses as numeric. Every other degenerate input yields `valid == false`.
pub fn transform(dataset: &RawDataset, config: &TransformConfig) -> EngineResult<TransformResult> {
    transform_with_options(dataset, config, &EngineOptions::default())
}

/// Like [`transform`], but folds the numeric-column error into an invalid result.
///
/// Callers that only need "render or show the empty state" should prefer this.
pub fn transform_or_invalid(dataset: &RawDataset, config: &TransformConfig) -> TransformResult {
    let opts = EngineOptions {
        numeric_failure: NumericFailureMode::Invalid,
        ..Default::default()
    };
    match transform_with_options(dataset, config, &opts) {
        Ok(result) => result,
        Err(_) => TransformResult::invalid("", InvalidReason::NoNumericColumn),
    }
}

/// Transform `dataset` for `config` under explicit `opts`.
pub fn transform_with_options(
    dataset: &RawDataset,
    config: &TransformConfig,
    opts: &EngineOptions,
) -> EngineResult<TransformResult> {
    let ctx = TransformContext {
        shape: config.shape,
        op: config.aggregate_op,
        rows: dataset.row_count(),
    };
    let diag = Diagnostics::new(ctx, opts.observer.as_deref(), opts.alert_at_or_above);

    let result = run(dataset, config, opts, &diag);
    match &result {
        Ok(r) => diag.emit(TransformEvent::Completed {
            rows: r.data.len(),
            series: r.series_keys.len(),
            valid: r.valid,
            reason: r.invalid_reason,
        }),
        Err(e) => diag.emit(TransformEvent::Failed {
            message: e.to_string(),
        }),
    }
    result
}

fn run(
    dataset: &RawDataset,
    config: &TransformConfig,
    opts: &EngineOptions,
    diag: &Diagnostics<'_>,
) -> EngineResult<TransformResult> {
    if dataset.is_empty() || dataset.schema.is_empty() {
        return Ok(TransformResult::invalid("", InvalidReason::EmptyDataset));
    }

    let classification = classify_columns(dataset, opts.sample_size);
    let pinned_dimension = resolve_pin(
        &classification,
        config.dimension_key.as_deref(),
        SelectionRole::Dimension,
        diag,
    );
    let pinned_measure = resolve_pin(
        &classification,
        config.measure_key.as_deref(),
        SelectionRole::Measure,
        diag,
    );

    let needs_measure = config.aggregate_op.needs_measure() && pinned_measure.is_none();
    if needs_measure && !classification.has_numeric_column() {
        match opts.numeric_failure {
            NumericFailureMode::Error => {
                return Err(TransformError::NoNumericColumn {
                    op: config.aggregate_op,
                });
            }
            NumericFailureMode::Invalid => {
                return Ok(TransformResult::invalid("", InvalidReason::NoNumericColumn));
            }
        }
    }

    let input = ShapeInput {
        dataset,
        classification: &classification,
        config,
        opts,
        diag,
        pinned_dimension,
        pinned_measure,
    };

    let shaped = match config.shape {
        ChartShape::Bar | ChartShape::Line | ChartShape::Area => categorical::shape(&input),
        ChartShape::Pie | ChartShape::Funnel | ChartShape::Treemap => part_to_whole::shape(&input),
        ChartShape::Radar => radar::shape(&input),
        ChartShape::Scatter => scatter::shape(&input),
    };

    Ok(match shaped {
        Ok(mut shaped) => {
            separate_series_from_index(&mut shaped, diag);
            gate(shaped)
        }
        Err(rejected) => TransformResult::invalid(rejected.index_key, rejected.reason),
    })
}

fn gate(shaped: Shaped) -> TransformResult {
    match check_renderable(&shaped.rows, &shaped.series_keys) {
        Ok(()) => TransformResult {
            data: shaped.rows,
            index_key: shaped.index_key,
            series_keys: shaped.series_keys,
            valid: true,
            layout: shaped.layout,
            invalid_reason: None,
        },
        Err(reason) => TransformResult {
            layout: shaped.layout,
            ..TransformResult::invalid(shaped.index_key, reason)
        },
    }
}

/// Flat rows share one namespace between the index field and the series fields, so a series
/// key equal to the index key is renamed to the first free `<key>_<n>`.
fn separate_series_from_index(shaped: &mut Shaped, diag: &Diagnostics<'_>) {
    if shaped.layout != RowLayout::Flat {
        return;
    }
    let Some(pos) = shaped.series_keys.iter().position(|k| *k == shaped.index_key) else {
        return;
    };

    let from = shaped.series_keys[pos].clone();
    let mut n = 1;
    let mut to = format!("{from}_{n}");
    while shaped.series_keys.contains(&to) {
        n += 1;
        to = format!("{from}_{n}");
    }

    shaped.series_keys[pos] = to.clone();
    for row in &mut shaped.rows {
        row.values = std::mem::take(&mut row.values)
            .into_iter()
            .map(|(k, v)| if k == from { (to.clone(), v) } else { (k, v) })
            .collect();
    }
    diag.emit(TransformEvent::SeriesKeyRenamed { from, to });
}

/// Look a pinned key up; unknown columns are reported and treated as auto.
fn resolve_pin<'a>(
    classification: &'a Classification,
    key: Option<&str>,
    role: SelectionRole,
    diag: &Diagnostics<'_>,
) -> Option<&'a ColumnProfile> {
    let key = key?;
    let found = classification.get(key);
    if found.is_none() {
        diag.emit(TransformEvent::PinnedKeyIgnored {
            role,
            column: key.to_string(),
        });
    }
    found
}
