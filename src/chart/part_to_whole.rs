//! Pie, funnel and treemap: one dimension, one `"value"` series.

use crate::config::ChartShape;
use crate::processing::{aggregate, pivot, sort_descending, SeriesSource, VALUE_SERIES};

use super::categorical::{resolve_dimension, resolve_measure};
use super::{Rejected, RowLayout, ShapeInput, Shaped};

pub(super) fn shape(input: &ShapeInput<'_>) -> Result<Shaped, Rejected> {
    let dimension = resolve_dimension(input)?;
    let measure = resolve_measure(input, dimension)?;

    let series = SeriesSource::Single {
        key: VALUE_SERIES,
        measure: measure.map(|m| m.index),
    };
    let aggregated = aggregate(input.dataset, dimension.index, series, input.config.aggregate_op);
    input.report_coercions(&aggregated.coerced);
    let (mut rows, series_keys) = pivot(aggregated);

    if input.config.shape == ChartShape::Funnel {
        sort_descending(&mut rows, VALUE_SERIES);
    }

    Ok(Shaped {
        index_key: dimension.name.clone(),
        series_keys,
        rows,
        layout: RowLayout::Flat,
    })
}
