//! Group-by aggregation over a [`crate::types::RawDataset`].

use indexmap::{IndexMap, IndexSet};

use crate::config::AggregateOp;
use crate::types::{RawDataset, Value};

static NULL: Value = Value::Null;

/// Series key used by shapes with a single series.
pub const VALUE_SERIES: &str = "value";

/// Where each row's series key (and measure) comes from.
#[derive(Debug, Clone, Copy)]
pub enum SeriesSource<'a> {
    /// One series named `key`, reading `measure` (ignored for `Count`).
    Single { key: &'a str, measure: Option<usize> },
    /// One series per distinct value of the `stack` column.
    Stacked { stack: usize, measure: Option<usize> },
    /// One series per listed `(name, column)` indicator, each reduced independently.
    Indicators(&'a [(String, usize)]),
}

/// Running state for one (group, series) bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accumulator {
    op: AggregateOp,
    sum: f64,
    count: u64,
    extremum: Option<f64>,
}

impl Accumulator {
    pub fn new(op: AggregateOp) -> Self {
        Self {
            op,
            sum: 0.0,
            count: 0,
            extremum: None,
        }
    }

    /// Fold one row's measure cell in. Returns `true` when a non-numeric value was read as 0.
    pub fn push(&mut self, cell: &Value) -> bool {
        match self.op {
            AggregateOp::Count => {
                self.count += 1;
                false
            }
            AggregateOp::Sum | AggregateOp::Avg => {
                if cell.is_null() {
                    return false;
                }
                let (v, coerced) = match cell.as_number() {
                    Some(v) => (v, false),
                    None => (0.0, true),
                };
                self.sum += v;
                self.count += 1;
                coerced
            }
            AggregateOp::Min | AggregateOp::Max => {
                // The first finite value seeds the extremum; seeding with 0 would hide
                // all-negative (or all-positive) groups.
                if let Some(v) = cell.as_number() {
                    self.extremum = Some(match (self.op, self.extremum) {
                        (AggregateOp::Min, Some(a)) => a.min(v),
                        (AggregateOp::Max, Some(a)) => a.max(v),
                        _ => v,
                    });
                }
                false
            }
        }
    }

    /// Final value; empty buckets finish as 0.
    pub fn finish(&self) -> f64 {
        match self.op {
            AggregateOp::Sum => self.sum,
            AggregateOp::Count => self.count as f64,
            AggregateOp::Avg => {
                if self.count == 0 {
                    0.0
                } else {
                    self.sum / self.count as f64
                }
            }
            AggregateOp::Min | AggregateOp::Max => self.extremum.unwrap_or(0.0),
        }
    }
}

/// One dimension value and its reduced series.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// First-seen cell for this group's label.
    pub key: Value,
    /// Reduced value per observed series key. Unobserved keys are absent; see
    /// [`crate::processing::pivot`].
    pub cells: IndexMap<String, f64>,
}

/// Result of [`aggregate`]: groups in first-encounter order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregated {
    pub groups: Vec<Group>,
    /// Series keys in first-encounter order (declaration order for indicators).
    pub series_keys: Vec<String>,
    /// Per measure column, how many non-numeric cells were read as 0.
    pub coerced: IndexMap<String, usize>,
}

/// Group `dataset` rows by the `dimension` column and reduce each series under `op`.
pub fn aggregate(
    dataset: &RawDataset,
    dimension: usize,
    series: SeriesSource<'_>,
    op: AggregateOp,
) -> Aggregated {
    let mut groups: IndexMap<String, (Value, IndexMap<String, Accumulator>)> = IndexMap::new();
    let mut series_keys: IndexSet<String> = IndexSet::new();
    let mut coerced: IndexMap<String, usize> = IndexMap::new();

    if let SeriesSource::Indicators(indicators) = series {
        series_keys.extend(indicators.iter().map(|(name, _)| name.clone()));
    }

    for row in 0..dataset.row_count() {
        let key = dataset.value(row, dimension);
        let (_, cells) = groups
            .entry(key.group_label())
            .or_insert_with(|| (key.clone(), IndexMap::new()));

        let mut fold = |series_key: String, measure: Option<usize>| {
            let cell = measure.map(|m| dataset.value(row, m)).unwrap_or(&NULL);
            let acc = cells
                .entry(series_key)
                .or_insert_with(|| Accumulator::new(op));
            if acc.push(cell) {
                if let Some(m) = measure {
                    *coerced.entry(dataset.schema.columns[m].clone()).or_insert(0) += 1;
                }
            }
        };

        match series {
            SeriesSource::Single { key, measure } => {
                series_keys.insert(key.to_string());
                fold(key.to_string(), measure);
            }
            SeriesSource::Stacked { stack, measure } => {
                let label = dataset.value(row, stack).group_label();
                series_keys.insert(label.clone());
                fold(label, measure);
            }
            SeriesSource::Indicators(indicators) => {
                for (name, col) in indicators {
                    fold(name.clone(), Some(*col));
                }
            }
        }
    }

    let groups = groups
        .into_values()
        .map(|(key, cells)| Group {
            key,
            cells: cells
                .into_iter()
                .map(|(series, acc)| (series, acc.finish()))
                .collect(),
        })
        .collect();

    Aggregated {
        groups,
        series_keys: series_keys.into_iter().collect(),
        coerced,
    }
}
