//! Bar, line and area: grouped by dimension, optionally split by a secondary dimension.

use crate::inference::{select_dimension, select_measure, select_stack_dimension, ColumnProfile};
use crate::observability::SelectionRole;
use crate::processing::{aggregate, pivot, SeriesSource, VALUE_SERIES};

use super::{InvalidReason, Rejected, RowLayout, ShapeInput, Shaped};

pub(super) fn shape(input: &ShapeInput<'_>) -> Result<Shaped, Rejected> {
    let dimension = resolve_dimension(input)?;
    let measure = resolve_measure(input, dimension)?;

    let mut in_use = vec![dimension.name.as_str()];
    if let Some(m) = measure {
        in_use.push(m.name.as_str());
    }
    let stack = select_stack_dimension(input.classification, &in_use);

    let series = match stack {
        Some(stack) => {
            log::debug!("stacking '{}' by '{}'", dimension.name, stack.name);
            SeriesSource::Stacked {
                stack: stack.index,
                measure: measure.map(|m| m.index),
            }
        }
        None => SeriesSource::Single {
            key: VALUE_SERIES,
            measure: measure.map(|m| m.index),
        },
    };

    let aggregated = aggregate(input.dataset, dimension.index, series, input.config.aggregate_op);
    input.report_coercions(&aggregated.coerced);
    let (rows, series_keys) = pivot(aggregated);

    Ok(Shaped {
        index_key: dimension.name.clone(),
        series_keys,
        rows,
        layout: RowLayout::Flat,
    })
}

/// Pinned dimension, else the auto-selected one for the configured shape.
pub(super) fn resolve_dimension<'a>(input: &ShapeInput<'a>) -> Result<&'a ColumnProfile, Rejected> {
    if let Some(pinned) = input.pinned_dimension {
        input.announce(SelectionRole::Dimension, pinned, false);
        return Ok(pinned);
    }
    let dimension = select_dimension(input.classification, input.config.shape, input.opts)
        .ok_or_else(|| Rejected::new("", InvalidReason::NoDimension))?;
    input.announce(SelectionRole::Dimension, dimension, true);
    Ok(dimension)
}

/// Pinned measure, else the first measure other than `dimension`. `Count` needs none.
pub(super) fn resolve_measure<'a>(
    input: &ShapeInput<'a>,
    dimension: &ColumnProfile,
) -> Result<Option<&'a ColumnProfile>, Rejected> {
    if !input.config.aggregate_op.needs_measure() {
        return Ok(None);
    }
    if let Some(pinned) = input.pinned_measure {
        input.announce(SelectionRole::Measure, pinned, false);
        return Ok(Some(pinned));
    }
    let measure = select_measure(input.classification, Some(dimension.name.as_str()))
        .ok_or_else(|| Rejected::new(dimension.name.clone(), InvalidReason::NoMeasure))?;
    input.announce(SelectionRole::Measure, measure, true);
    Ok(Some(measure))
}
