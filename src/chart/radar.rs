//! Radar: every measure column becomes an indicator axis.

use crate::inference::select_indicators;
use crate::observability::SelectionRole;
use crate::processing::{aggregate, pivot, SeriesSource};

use super::categorical::resolve_dimension;
use super::{InvalidReason, Rejected, RowLayout, ShapeInput, Shaped};

pub(super) fn shape(input: &ShapeInput<'_>) -> Result<Shaped, Rejected> {
    let dimension = resolve_dimension(input)?;

    let mut indicators: Vec<(String, usize)> = Vec::new();
    // A pinned measure leads the indicator list even when it would not classify as one.
    if let Some(pinned) = input.pinned_measure.filter(|m| m.name != dimension.name) {
        input.announce(SelectionRole::Measure, pinned, false);
        indicators.push((pinned.name.clone(), pinned.index));
    }
    for column in select_indicators(input.classification, Some(dimension.name.as_str())) {
        if indicators.iter().all(|(name, _)| *name != column.name) {
            input.announce(SelectionRole::Measure, column, true);
            indicators.push((column.name.clone(), column.index));
        }
    }
    if indicators.is_empty() {
        return Err(Rejected::new(dimension.name.clone(), InvalidReason::NoSeries));
    }

    let aggregated = aggregate(
        input.dataset,
        dimension.index,
        SeriesSource::Indicators(&indicators),
        input.config.aggregate_op,
    );
    input.report_coercions(&aggregated.coerced);
    let (rows, series_keys) = pivot(aggregated);

    Ok(Shaped {
        index_key: dimension.name.clone(),
        series_keys,
        rows,
        layout: RowLayout::Nested,
    })
}
