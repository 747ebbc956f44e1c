//! Chart-ready output types.

use std::fmt;

use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

use crate::error::EngineResult;
use crate::types::Value;

/// One row handed to a renderer: the dimension value plus one number per series key.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRow {
    /// Dimension value (X coordinate for scatter).
    pub index: Value,
    /// Value per series key, in series-key order.
    pub values: IndexMap<String, f64>,
}

impl OutputRow {
    pub fn value(&self, series: &str) -> Option<f64> {
        self.values.get(series).copied()
    }
}

/// How series fields are laid out when a row is serialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowLayout {
    /// `{ <indexKey>: dim, <series>: n, ... }`
    #[default]
    Flat,
    /// `{ <indexKey>: dim, "values": { <series>: n, ... } }` (radar indicators).
    Nested,
}

/// Why a result is not renderable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InvalidReason {
    EmptyDataset,
    NoDimension,
    NoMeasure,
    NoSeries,
    NoSignal,
    NoNumericColumn,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InvalidReason::EmptyDataset => "dataset is empty",
            InvalidReason::NoDimension => "no usable dimension",
            InvalidReason::NoMeasure => "no usable measure",
            InvalidReason::NoSeries => "no series",
            InvalidReason::NoSignal => "no non-zero numeric value",
            InvalidReason::NoNumericColumn => "no numeric column",
        })
    }
}

/// Output of [`crate::chart::transform`].
///
/// Invalid results always carry empty `data` and must be shown as an empty state.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformResult {
    pub data: Vec<OutputRow>,
    pub index_key: String,
    /// Unique series keys; every row in `data` has exactly these.
    pub series_keys: Vec<String>,
    pub valid: bool,
    pub layout: RowLayout,
    /// Set when `valid` is false.
    pub invalid_reason: Option<InvalidReason>,
}

impl TransformResult {
    pub(crate) fn invalid(index_key: impl Into<String>, reason: InvalidReason) -> Self {
        Self {
            data: Vec::new(),
            index_key: index_key.into(),
            series_keys: Vec::new(),
            valid: false,
            layout: RowLayout::Flat,
            invalid_reason: Some(reason),
        }
    }

    /// The renderer's JSON payload.
    pub fn to_json(&self) -> EngineResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl Serialize for TransformResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let rows: Vec<RowView<'_>> = self
            .data
            .iter()
            .map(|row| RowView {
                row,
                index_key: &self.index_key,
                layout: self.layout,
            })
            .collect();

        let len = if self.invalid_reason.is_some() { 5 } else { 4 };
        let mut s = serializer.serialize_struct("TransformResult", len)?;
        s.serialize_field("data", &rows)?;
        s.serialize_field("indexKey", &self.index_key)?;
        s.serialize_field("seriesKeys", &self.series_keys)?;
        s.serialize_field("valid", &self.valid)?;
        if let Some(reason) = &self.invalid_reason {
            s.serialize_field("invalidReason", reason)?;
        } else {
            s.skip_field("invalidReason")?;
        }
        s.end()
    }
}

struct RowView<'a> {
    row: &'a OutputRow,
    index_key: &'a str,
    layout: RowLayout,
}

impl Serialize for RowView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut m = serializer.serialize_map(None)?;
        m.serialize_entry(self.index_key, &self.row.index)?;
        match self.layout {
            RowLayout::Flat => {
                for (k, v) in &self.row.values {
                    m.serialize_entry(k, v)?;
                }
            }
            RowLayout::Nested => m.serialize_entry("values", &self.row.values)?,
        }
        m.end()
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;
    use serde_json::json;

    use super::{InvalidReason, OutputRow, RowLayout, TransformResult};
    use crate::types::Value;

    fn result(layout: RowLayout) -> TransformResult {
        TransformResult {
            data: vec![OutputRow {
                index: Value::from("east"),
                values: IndexMap::from([("a".to_string(), 1.0), ("b".to_string(), 0.0)]),
            }],
            index_key: "region".to_string(),
            series_keys: vec!["a".to_string(), "b".to_string()],
            valid: true,
            layout,
            invalid_reason: None,
        }
    }

    #[test]
    fn flat_rows_serialize_series_as_fields() {
        assert_eq!(
            result(RowLayout::Flat).to_json().unwrap(),
            json!({
                "data": [{"region": "east", "a": 1.0, "b": 0.0}],
                "indexKey": "region",
                "seriesKeys": ["a", "b"],
                "valid": true
            })
        );
    }

    #[test]
    fn nested_rows_serialize_series_under_values() {
        assert_eq!(
            result(RowLayout::Nested).to_json().unwrap()["data"][0],
            json!({"region": "east", "values": {"a": 1.0, "b": 0.0}})
        );
    }

    #[test]
    fn invalid_results_carry_their_reason() {
        let r = TransformResult::invalid("", InvalidReason::EmptyDataset);
        assert_eq!(
            r.to_json().unwrap(),
            json!({
                "data": [],
                "indexKey": "",
                "seriesKeys": [],
                "valid": false,
                "invalidReason": "emptyDataset"
            })
        );
    }
}
