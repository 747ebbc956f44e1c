//! JSON ingestion implementation.
//!
//! Supported inputs:
//! - A JSON array of objects: `[{"a":1}, {"a":2}]`
//! - A single object: `{"a":1}`
//! - Newline-delimited JSON (NDJSON): `{"a":1}\n{"a":2}\n`
//!
//! The schema is the key order of the first object. Later rows are read against it: keys they
//! lack become null, keys the first row lacks are dropped.

use crate::error::{EngineResult, TransformError};
use crate::types::{RawDataset, Schema, Value};

/// Ingest JSON text into a [`RawDataset`].
///
/// Blank input is an empty dataset (the upstream service answered with no rows).
pub fn dataset_from_json_str(input: &str) -> EngineResult<RawDataset> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(RawDataset::default());
    }

    // First try parsing as a single JSON value (array or object).
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(trimmed) {
        match v {
            serde_json::Value::Array(items) => dataset_from_json_values(&items),
            serde_json::Value::Object(_) => dataset_from_json_values(std::slice::from_ref(&v)),
            _ => Err(TransformError::Ingestion {
                message: "json must be an object, an array of objects, or NDJSON".to_string(),
            }),
        }
    } else {
        // Fall back to NDJSON.
        let mut values = Vec::new();
        for (i, line) in trimmed.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let v = serde_json::from_str::<serde_json::Value>(line).map_err(|e| {
                TransformError::Ingestion {
                    message: format!("invalid ndjson at line {}: {}", i + 1, e),
                }
            })?;
            values.push(v);
        }
        dataset_from_json_values(&values)
    }
}

/// Ingest already-parsed JSON rows into a [`RawDataset`].
pub fn dataset_from_json_values(values: &[serde_json::Value]) -> EngineResult<RawDataset> {
    let Some(first) = values.first() else {
        return Ok(RawDataset::default());
    };
    let first = first.as_object().ok_or_else(|| TransformError::Ingestion {
        message: "row 1 is not a json object".to_string(),
    })?;
    let schema = Schema::new(first.keys().cloned().collect());

    let mut rows: Vec<Vec<Value>> = Vec::with_capacity(values.len());
    for (idx0, v) in values.iter().enumerate() {
        let row_num = idx0 + 1;
        let obj = v.as_object().ok_or_else(|| TransformError::Ingestion {
            message: format!("row {row_num} is not a json object"),
        })?;

        let row = schema
            .column_names()
            .map(|c| obj.get(c).map(Value::from_json).unwrap_or(Value::Null))
            .collect();
        rows.push(row);
    }

    Ok(RawDataset::new(schema, rows))
}

#[cfg(test)]
mod tests {
    use super::{dataset_from_json_str, dataset_from_json_values};
    use crate::types::Value;

    #[test]
    fn array_keeps_first_row_key_order() {
        let ds = dataset_from_json_str(r#"[{"zeta":1,"alpha":"a"},{"alpha":"b","zeta":2}]"#)
            .unwrap();
        assert_eq!(ds.schema.columns, vec!["zeta".to_string(), "alpha".to_string()]);
        assert_eq!(ds.rows[1], vec![Value::Number(2.0), Value::from("b")]);
    }

    #[test]
    fn ndjson_is_accepted() {
        let input = "{\"a\":1}\n\n{\"a\":\"2\"}\n";
        let ds = dataset_from_json_str(input).unwrap();
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.rows[1][0], Value::from("2"));
    }

    #[test]
    fn single_object_is_one_row() {
        let ds = dataset_from_json_str(r#"{"a":true}"#).unwrap();
        assert_eq!(ds.rows, vec![vec![Value::Bool(true)]]);
    }

    #[test]
    fn blank_input_and_empty_array_are_empty_datasets() {
        assert!(dataset_from_json_str("  ").unwrap().is_empty());
        assert!(dataset_from_json_str("[]").unwrap().is_empty());
        assert!(dataset_from_json_values(&[]).unwrap().schema.is_empty());
    }

    #[test]
    fn nested_values_and_missing_keys_tag_as_null() {
        let ds = dataset_from_json_str(r#"[{"a":1,"b":[1,2]},{"b":{"x":1}}]"#).unwrap();
        assert_eq!(ds.rows[0][1], Value::Null);
        assert_eq!(ds.rows[1], vec![Value::Null, Value::Null]);
    }

    #[test]
    fn non_object_rows_are_rejected() {
        let err = dataset_from_json_str(r#"[{"a":1}, 5]"#).unwrap_err();
        assert!(err.to_string().contains("row 2 is not a json object"));

        let err = dataset_from_json_str("42").unwrap_err();
        assert!(err.to_string().contains("ingestion error"));
    }

    #[test]
    fn broken_ndjson_reports_line() {
        let err = dataset_from_json_str("{\"a\":1}\n{oops\n").unwrap_err();
        assert!(err.to_string().contains("invalid ndjson at line 2"));
    }
}
