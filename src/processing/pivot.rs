//! Long-to-wide reshaping of aggregated groups.

use std::cmp::Ordering;

use indexmap::IndexMap;

use crate::chart::OutputRow;

use super::aggregate::Aggregated;

/// One [`OutputRow`] per group, in group order, with a value for every series key.
///
/// Combinations never observed in the input are written as `0.0`, so every row carries exactly
/// `series_keys` and stacked or grouped renderers see aligned series.
pub fn pivot(aggregated: Aggregated) -> (Vec<OutputRow>, Vec<String>) {
    let Aggregated {
        groups,
        series_keys,
        ..
    } = aggregated;

    let rows = groups
        .into_iter()
        .map(|mut group| {
            let values: IndexMap<String, f64> = series_keys
                .iter()
                .map(|k| (k.clone(), group.cells.swap_remove(k).unwrap_or(0.0)))
                .collect();
            OutputRow {
                index: group.key,
                values,
            }
        })
        .collect();

    (rows, series_keys)
}

/// Stable sort by `series` value, largest first.
pub fn sort_descending(rows: &mut [OutputRow], series: &str) {
    rows.sort_by(|a, b| {
        let av = a.value(series).unwrap_or(0.0);
        let bv = b.value(series).unwrap_or(0.0);
        bv.partial_cmp(&av).unwrap_or(Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::{pivot, sort_descending};
    use crate::processing::aggregate::{Aggregated, Group};
    use crate::types::Value;

    fn group(key: &str, cells: &[(&str, f64)]) -> Group {
        Group {
            key: Value::from(key),
            cells: cells.iter().map(|(k, v)| (k.to_string(), *v)).collect::<IndexMap<_, _>>(),
        }
    }

    #[test]
    fn absent_combinations_are_zero_filled() {
        let agg = Aggregated {
            groups: vec![group("east", &[("a", 1.0), ("b", 2.0)]), group("west", &[("b", 3.0)])],
            series_keys: vec!["a".to_string(), "b".to_string()],
            coerced: IndexMap::new(),
        };
        let (rows, keys) = pivot(agg);
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].index, Value::from("west"));
        assert_eq!(rows[1].value("a"), Some(0.0));
        assert_eq!(rows[1].value("b"), Some(3.0));
        for row in &rows {
            assert_eq!(row.values.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        }
    }

    #[test]
    fn series_fields_follow_series_key_order() {
        let agg = Aggregated {
            groups: vec![group("x", &[("b", 2.0), ("a", 1.0)])],
            series_keys: vec!["a".to_string(), "b".to_string()],
            coerced: IndexMap::new(),
        };
        let (rows, _) = pivot(agg);
        assert_eq!(rows[0].values.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn descending_sort_is_stable_on_ties() {
        let agg = Aggregated {
            groups: vec![
                group("first", &[("value", 2.0)]),
                group("second", &[("value", 5.0)]),
                group("third", &[("value", 2.0)]),
            ],
            series_keys: vec!["value".to_string()],
            coerced: IndexMap::new(),
        };
        let (mut rows, _) = pivot(agg);
        sort_descending(&mut rows, "value");
        let order: Vec<String> = rows.iter().map(|r| r.index.to_string()).collect();
        assert_eq!(order, vec!["second", "first", "third"]);
    }
}
