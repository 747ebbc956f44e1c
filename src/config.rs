//! Caller-owned transform configuration and engine-wide options.
//!
//! [`TransformConfig`] is what the UI layer pins or leaves on auto. [`EngineOptions`] carries the
//! heuristics' tuning constants plus the diagnostics hooks; use [`Default`] for common cases.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::observability::{TransformObserver, TransformSeverity};

/// Reduction applied to each (group, series) bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateOp {
    /// Running total.
    #[default]
    Sum,
    /// Row count; the measure column is ignored.
    Count,
    /// Arithmetic mean of the contributing values.
    Avg,
    /// Smallest finite value.
    Min,
    /// Largest finite value.
    Max,
}

impl AggregateOp {
    /// Whether the op reads measure values at all.
    pub fn needs_measure(self) -> bool {
        !matches!(self, AggregateOp::Count)
    }
}

impl fmt::Display for AggregateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AggregateOp::Sum => "sum",
            AggregateOp::Count => "count",
            AggregateOp::Avg => "avg",
            AggregateOp::Min => "min",
            AggregateOp::Max => "max",
        })
    }
}

impl FromStr for AggregateOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sum" => Ok(Self::Sum),
            "count" => Ok(Self::Count),
            "avg" | "average" | "mean" => Ok(Self::Avg),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            other => Err(format!("unknown aggregate op '{other}'")),
        }
    }
}

/// Target chart family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartShape {
    #[default]
    Bar,
    Line,
    Area,
    Pie,
    Funnel,
    Radar,
    Scatter,
    Treemap,
}

impl ChartShape {
    /// Single-dimension, part-to-whole shapes with one `"value"` series.
    pub fn is_part_to_whole(self) -> bool {
        matches!(self, ChartShape::Pie | ChartShape::Funnel | ChartShape::Treemap)
    }
}

impl fmt::Display for ChartShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChartShape::Bar => "bar",
            ChartShape::Line => "line",
            ChartShape::Area => "area",
            ChartShape::Pie => "pie",
            ChartShape::Funnel => "funnel",
            ChartShape::Radar => "radar",
            ChartShape::Scatter => "scatter",
            ChartShape::Treemap => "treemap",
        })
    }
}

impl FromStr for ChartShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bar" => Ok(Self::Bar),
            "line" => Ok(Self::Line),
            "area" => Ok(Self::Area),
            "pie" => Ok(Self::Pie),
            "funnel" => Ok(Self::Funnel),
            "radar" => Ok(Self::Radar),
            "scatter" => Ok(Self::Scatter),
            "treemap" => Ok(Self::Treemap),
            other => Err(format!("unknown chart shape '{other}'")),
        }
    }
}

/// Per-chart configuration. `None` keys mean "auto-detect".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransformConfig {
    pub dimension_key: Option<String>,
    pub measure_key: Option<String>,
    pub aggregate_op: AggregateOp,
    pub shape: ChartShape,
}

impl TransformConfig {
    /// Auto-detect everything for `shape`, summing.
    pub fn for_shape(shape: ChartShape) -> Self {
        Self {
            shape,
            ..Default::default()
        }
    }

    pub fn with_op(mut self, op: AggregateOp) -> Self {
        self.aggregate_op = op;
        self
    }

    /// Pin the grouping dimension (the X axis for scatter).
    pub fn with_dimension(mut self, key: impl Into<String>) -> Self {
        self.dimension_key = Some(key.into());
        self
    }

    /// Pin the measure (the Y axis for scatter).
    pub fn with_measure(mut self, key: impl Into<String>) -> Self {
        self.measure_key = Some(key.into());
        self
    }
}

/// What the engine does when an aggregate needs a number but the sample has no numeric column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumericFailureMode {
    /// Return [`crate::TransformError::NoNumericColumn`].
    #[default]
    Error,
    /// Return an invalid result like every other degenerate input.
    Invalid,
}

/// Options controlling engine heuristics and diagnostics.
#[derive(Clone)]
pub struct EngineOptions {
    /// Rows inspected by the classifier and selectors.
    pub sample_size: usize,
    /// Max distinct-values ratio of a grouping column for bar/line/area/radar.
    pub categorical_ceiling: f64,
    /// Max distinct-values ratio of a grouping column for pie/funnel/treemap.
    pub part_to_whole_ceiling: f64,
    /// Weight of the null ratio in the dimension score denominator.
    pub null_penalty_weight: f64,
    pub numeric_failure: NumericFailureMode,
    /// Optional observer for diagnostics.
    pub observer: Option<Arc<dyn TransformObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: TransformSeverity,
}

impl EngineOptions {
    /// Cardinality ceiling used when scoring grouping candidates for `shape`.
    pub fn cardinality_ceiling(&self, shape: ChartShape) -> f64 {
        if shape.is_part_to_whole() {
            self.part_to_whole_ceiling
        } else if shape == ChartShape::Scatter {
            // Scatter axes are continuous; only constant columns are rejected.
            1.0
        } else {
            self.categorical_ceiling
        }
    }
}

impl fmt::Debug for EngineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineOptions")
            .field("sample_size", &self.sample_size)
            .field("categorical_ceiling", &self.categorical_ceiling)
            .field("part_to_whole_ceiling", &self.part_to_whole_ceiling)
            .field("null_penalty_weight", &self.null_penalty_weight)
            .field("numeric_failure", &self.numeric_failure)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            sample_size: 100,
            categorical_ceiling: 0.6,
            part_to_whole_ceiling: 0.8,
            null_penalty_weight: 10.0,
            numeric_failure: NumericFailureMode::default(),
            observer: None,
            alert_at_or_above: TransformSeverity::Error,
        }
    }
}
