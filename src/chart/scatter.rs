//! Scatter: two numeric axes, rows passed through without aggregation.

use indexmap::IndexMap;

use crate::inference::select_scatter_axes;
use crate::observability::{SelectionRole, TransformEvent};
use crate::types::Value;

use super::{InvalidReason, OutputRow, Rejected, RowLayout, ShapeInput, Shaped};

/// `dimensionKey` pins X and `measureKey` pins Y; unpinned axes come from the measure ranking.
pub(super) fn shape(input: &ShapeInput<'_>) -> Result<Shaped, Rejected> {
    let (x, y) = select_scatter_axes(
        input.classification,
        input.pinned_dimension,
        input.pinned_measure,
        input.opts,
    );
    let x = x.ok_or_else(|| Rejected::new("", InvalidReason::NoDimension))?;
    input.announce(SelectionRole::Dimension, x, input.pinned_dimension.is_none());
    let y = y.ok_or_else(|| Rejected::new(x.name.clone(), InvalidReason::NoMeasure))?;
    input.announce(SelectionRole::Measure, y, input.pinned_measure.is_none());

    let ds = input.dataset;
    let mut dropped = 0usize;
    let rows: Vec<OutputRow> = (0..ds.row_count())
        .filter_map(|r| {
            match (ds.value(r, x.index).as_number(), ds.value(r, y.index).as_number()) {
                (Some(xv), Some(yv)) => Some(OutputRow {
                    index: Value::Number(xv),
                    values: IndexMap::from([(y.name.clone(), yv)]),
                }),
                _ => {
                    dropped += 1;
                    None
                }
            }
        })
        .collect();
    if dropped > 0 {
        input.diag.emit(TransformEvent::RowsDropped { count: dropped });
    }

    Ok(Shaped {
        index_key: x.name.clone(),
        series_keys: vec![y.name.clone()],
        rows,
        layout: RowLayout::Flat,
    })
}
