//! Core data model types.
//!
//! Rows arrive as schemaless JSON objects. Ingestion tags every cell exactly once into a
//! [`Value`], and the column order of the first row becomes the dataset [`Schema`]. Everything
//! downstream (classification, selection, aggregation) reads the tagged representation.

use std::fmt;

use serde::Serialize;

/// Coarse kind of a tagged [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    Text,
}

/// A single tagged cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing, `null`, or a non-scalar JSON value.
    Null,
    /// Boolean.
    Bool(bool),
    /// Finite 64-bit float.
    Number(f64),
    /// UTF-8 string.
    Text(String),
}

impl Value {
    /// Tag a JSON value. Arrays, objects and non-finite numbers become [`Value::Null`].
    pub fn from_json(v: &serde_json::Value) -> Self {
        match v {
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(f) if f.is_finite() => Value::Number(f),
                _ => Value::Null,
            },
            serde_json::Value::String(s) => Value::Text(s.clone()),
            serde_json::Value::Null
            | serde_json::Value::Array(_)
            | serde_json::Value::Object(_) => Value::Null,
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::Text(_) => ValueKind::Text,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// `true` for null and for strings that are empty after trimming.
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Numeric reading of the cell.
    ///
    /// Numbers pass through; text is trimmed and parsed. Anything that does not yield a finite
    /// float returns `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// Key used to bucket rows: equal labels fall into the same group.
    ///
    /// Labels are the display strings, so values of different kinds can share a group: `Null`
    /// with the text `"null"`, `Bool(true)` with `"true"`, and `Number(1.0)` with `"1"`. The
    /// group keeps the first value it saw as its index.
    pub fn group_label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        if n.is_finite() { Value::Number(n) } else { Value::Null }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// Ordered column names of a dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    pub columns: Vec<String>,
}

impl Schema {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// Iterate column names in declaration order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.as_str())
    }

    /// Returns the index of a column by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`] columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDataset {
    /// Schema inferred from the first row.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl RawDataset {
    /// Create a dataset from schema and rows.
    ///
    /// Rows shorter than the schema read as null in the missing positions.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// Build a dataset from `(column, value)` pairs per row; the first row fixes the schema.
    pub fn from_records<K, V, R>(records: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut schema: Option<Schema> = None;
        let mut rows = Vec::new();
        for record in records {
            let pairs: Vec<(String, Value)> =
                record.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
            let schema = schema
                .get_or_insert_with(|| Schema::new(pairs.iter().map(|(k, _)| k.clone()).collect()));
            let row = schema
                .columns
                .iter()
                .map(|c| {
                    pairs
                        .iter()
                        .find(|(k, _)| k == c)
                        .map(|(_, v)| v.clone())
                        .unwrap_or(Value::Null)
                })
                .collect();
            rows.push(row);
        }
        Self::new(schema.unwrap_or_default(), rows)
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at (`row`, `col`); out-of-range positions read as null.
    pub fn value(&self, row: usize, col: usize) -> &Value {
        static NULL: Value = Value::Null;
        self.rows.get(row).and_then(|r| r.get(col)).unwrap_or(&NULL)
    }

    /// Iterate one column's cells in row order.
    pub fn column(&self, col: usize) -> impl Iterator<Item = &Value> {
        (0..self.rows.len()).map(move |r| self.value(r, col))
    }
}
