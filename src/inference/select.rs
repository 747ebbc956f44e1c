//! Default dimension/measure selection when the caller leaves a key on auto.

use crate::config::{ChartShape, EngineOptions};

use super::classify::{Classification, ColumnProfile, ColumnRole};

/// Column that always wins dimension auto-selection when usable.
///
/// A business-specific preference kept for parity with existing dashboards.
pub const PREFERRED_DIMENSION: &str = "branch_name";

/// Auto-select the grouping dimension for `shape`.
///
/// Scores every `Dimension` column that is neither constant nor near-unique in the sample, with
/// fewer distinct values and fewer nulls scoring higher. Falls back to the first `Dimension`
/// column when nothing survives. `None` means selection failed.
pub fn select_dimension<'a>(
    classification: &'a Classification,
    shape: ChartShape,
    opts: &EngineOptions,
) -> Option<&'a ColumnProfile> {
    if let Some(preferred) = classification.get(PREFERRED_DIMENSION) {
        if preferred.role != ColumnRole::Excluded && preferred.unique_count > 1 {
            return Some(preferred);
        }
    }

    rank_candidates(classification, ColumnRole::Dimension, shape, opts)
        .into_iter()
        .next()
        .or_else(|| classification.with_role(ColumnRole::Dimension).next())
}

/// Auto-select the measure: the first `Measure` column other than `dimension`.
///
/// When the sample has no usable `Measure` column, the first numeric column excluded by name
/// is used instead.
pub fn select_measure<'a>(
    classification: &'a Classification,
    dimension: Option<&str>,
) -> Option<&'a ColumnProfile> {
    classification
        .with_role(ColumnRole::Measure)
        .find(|c| Some(c.name.as_str()) != dimension)
        .or_else(|| excluded_numeric(classification).find(|c| Some(c.name.as_str()) != dimension))
}

/// Every `Measure` column other than `dimension`, in declaration order (radar indicators).
///
/// Falls back to the numeric columns excluded by name when no `Measure` column qualifies.
pub fn select_indicators<'a>(
    classification: &'a Classification,
    dimension: Option<&str>,
) -> Vec<&'a ColumnProfile> {
    let measures: Vec<&ColumnProfile> = classification
        .with_role(ColumnRole::Measure)
        .filter(|c| Some(c.name.as_str()) != dimension)
        .collect();
    if !measures.is_empty() {
        return measures;
    }
    excluded_numeric(classification)
        .filter(|c| Some(c.name.as_str()) != dimension)
        .collect()
}

/// Numeric columns whose name excluded them from auto-selection, in declaration order.
///
/// Last resort for measures and scatter axes, so a sample that has a numeric column never
/// ends up with nothing to aggregate.
fn excluded_numeric(classification: &Classification) -> impl Iterator<Item = &ColumnProfile> {
    classification
        .with_role(ColumnRole::Excluded)
        .filter(|c| c.numeric)
}

/// Secondary (stack) dimension for multi-series shapes: the first `Dimension` column not
/// already in use as the primary dimension or the measure.
pub fn select_stack_dimension<'a>(
    classification: &'a Classification,
    in_use: &[&str],
) -> Option<&'a ColumnProfile> {
    classification
        .with_role(ColumnRole::Dimension)
        .find(|c| !in_use.contains(&c.name.as_str()))
}

/// Auto-select scatter axes among `Measure` columns, honoring whichever axis is pinned.
///
/// Measures are ranked with the dimension score (constant columns dropped); the best two become
/// X and Y. Declaration order fills any axis the ranking could not, then numeric columns
/// excluded by name.
pub fn select_scatter_axes<'a>(
    classification: &'a Classification,
    pinned_x: Option<&'a ColumnProfile>,
    pinned_y: Option<&'a ColumnProfile>,
    opts: &EngineOptions,
) -> (Option<&'a ColumnProfile>, Option<&'a ColumnProfile>) {
    let ranked = rank_candidates(classification, ColumnRole::Measure, ChartShape::Scatter, opts);
    let mut pool = ranked
        .into_iter()
        .chain(classification.with_role(ColumnRole::Measure))
        .chain(excluded_numeric(classification));

    let mut taken: Vec<&str> = [pinned_x, pinned_y]
        .into_iter()
        .flatten()
        .map(|c| c.name.as_str())
        .collect();
    let mut next = |taken: &mut Vec<&'a str>| {
        let pick = pool.find(|c| !taken.contains(&c.name.as_str()));
        if let Some(c) = pick {
            taken.push(c.name.as_str());
        }
        pick
    };

    let x = match pinned_x {
        Some(x) => Some(x),
        None => next(&mut taken),
    };
    let y = match pinned_y {
        Some(y) => Some(y),
        None => next(&mut taken),
    };
    (x, y)
}

/// Columns of `role` surviving the cardinality filter, best score first (stable on ties).
fn rank_candidates<'a>(
    classification: &'a Classification,
    role: ColumnRole,
    shape: ChartShape,
    opts: &EngineOptions,
) -> Vec<&'a ColumnProfile> {
    let sample_size = classification.sample_size;
    let ceiling = sample_size as f64 * opts.cardinality_ceiling(shape);

    let mut scored: Vec<(f64, &ColumnProfile)> = classification
        .with_role(role)
        .filter(|c| c.unique_count > 1 && c.unique_count as f64 <= ceiling)
        .map(|c| {
            let penalty = c.null_ratio(sample_size) * opts.null_penalty_weight;
            (1.0 / (c.unique_count as f64 + penalty), c)
        })
        .collect();

    // `sort_by` is stable, so equal scores keep declaration order.
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.into_iter().map(|(_, c)| c).collect()
}
