//! Renderability check applied to every shaped result.

use crate::chart::{InvalidReason, OutputRow};

/// `Ok` when `rows` carry at least one finite, non-zero value across `series_keys`.
///
/// Zero-filled cells do not count as signal: a chart of nothing but zeros renders as an empty
/// frame, which callers should replace with their empty state.
pub fn check_renderable(rows: &[OutputRow], series_keys: &[String]) -> Result<(), InvalidReason> {
    if series_keys.is_empty() {
        return Err(InvalidReason::NoSeries);
    }
    let has_signal = rows.iter().any(|row| {
        series_keys
            .iter()
            .filter_map(|k| row.value(k))
            .any(|v| v.is_finite() && v != 0.0)
    });
    if has_signal {
        Ok(())
    } else {
        Err(InvalidReason::NoSignal)
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::check_renderable;
    use crate::chart::{InvalidReason, OutputRow};
    use crate::types::Value;

    fn row(v: f64) -> OutputRow {
        OutputRow {
            index: Value::from("a"),
            values: IndexMap::from([("value".to_string(), v)]),
        }
    }

    #[test]
    fn empty_series_is_rejected() {
        assert_eq!(check_renderable(&[row(1.0)], &[]), Err(InvalidReason::NoSeries));
    }

    #[test]
    fn all_zero_or_no_rows_is_rejected() {
        let keys = vec!["value".to_string()];
        assert_eq!(check_renderable(&[row(0.0), row(0.0)], &keys), Err(InvalidReason::NoSignal));
        assert_eq!(check_renderable(&[], &keys), Err(InvalidReason::NoSignal));
        assert_eq!(check_renderable(&[row(f64::NAN)], &keys), Err(InvalidReason::NoSignal));
    }

    #[test]
    fn one_non_zero_value_is_enough() {
        let keys = vec!["value".to_string()];
        assert_eq!(check_renderable(&[row(0.0), row(-2.0)], &keys), Ok(()));
    }
}
