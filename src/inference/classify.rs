//! Column role classification over a leading-row sample.

use std::collections::HashSet;

use crate::types::{RawDataset, Value, ValueKind};

/// Role assigned to a column for default axis selection.
///
/// Roles only steer auto-detection: a caller may pin any column regardless of its role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    /// Identifier-, date-, or address-like name; never auto-selected.
    Excluded,
    /// Categorical grouping column.
    Dimension,
    /// Numeric column to aggregate.
    Measure,
    /// Neither numeric nor predominantly categorical (e.g. all-null in the sample).
    Unclassified,
}

/// Per-column statistics gathered from the sample.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnProfile {
    pub name: String,
    /// Position in the dataset schema.
    pub index: usize,
    pub role: ColumnRole,
    /// Distinct non-missing values in the sample.
    pub unique_count: usize,
    /// Null or blank cells in the sample.
    pub missing_count: usize,
    /// Every non-missing sampled value reads as a finite number (and there is at least one).
    pub numeric: bool,
}

impl ColumnProfile {
    /// Share of missing cells in a sample of `sample_size` rows.
    pub fn null_ratio(&self, sample_size: usize) -> f64 {
        if sample_size == 0 {
            0.0
        } else {
            self.missing_count as f64 / sample_size as f64
        }
    }
}

/// Output of [`classify_columns`]: one profile per schema column, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    pub sample_size: usize,
    pub columns: Vec<ColumnProfile>,
}

impl Classification {
    pub fn get(&self, name: &str) -> Option<&ColumnProfile> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn role_of(&self, name: &str) -> Option<ColumnRole> {
        self.get(name).map(|c| c.role)
    }

    /// Columns holding `role`, in declaration order.
    pub fn with_role(&self, role: ColumnRole) -> impl Iterator<Item = &ColumnProfile> {
        self.columns.iter().filter(move |c| c.role == role)
    }

    /// Whether any sampled column parses as numeric, excluded ones included.
    pub fn has_numeric_column(&self) -> bool {
        self.columns.iter().any(|c| c.numeric)
    }
}

/// Whether a column name looks like an identifier, a date, contact data, or a person's name.
pub fn is_excluded_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.ends_with("id")
        || lower.ends_with("code")
        || lower.ends_with("number")
        || lower.contains("date")
        || lower.contains("email")
        || lower.contains("address")
        || matches!(lower.as_str(), "first_name" | "last_name" | "name")
        || lower.chars().count() < 3
}

/// Classify every schema column from the first `sample_size` rows.
pub fn classify_columns(dataset: &RawDataset, sample_size: usize) -> Classification {
    let sample_size = sample_size.min(dataset.row_count());
    let columns = dataset
        .schema
        .column_names()
        .enumerate()
        .map(|(index, name)| profile_column(dataset, index, name, sample_size))
        .collect();

    Classification {
        sample_size,
        columns,
    }
}

fn profile_column(
    dataset: &RawDataset,
    index: usize,
    name: &str,
    sample_size: usize,
) -> ColumnProfile {
    let mut distinct: HashSet<String> = HashSet::new();
    let mut missing_count = 0usize;
    let mut present = 0usize;
    let mut numeric_count = 0usize;
    let mut categorical_count = 0usize;

    for value in dataset.column(index).take(sample_size) {
        if value.is_missing() {
            missing_count += 1;
            continue;
        }
        present += 1;
        distinct.insert(value.group_label());
        if value.as_number().is_some() {
            numeric_count += 1;
        }
        if is_categorical_kind(value) {
            categorical_count += 1;
        }
    }

    let numeric = present > 0 && numeric_count == present;
    let role = if is_excluded_name(name) {
        ColumnRole::Excluded
    } else if numeric {
        ColumnRole::Measure
    } else if present > 0 && categorical_count * 2 > present {
        ColumnRole::Dimension
    } else {
        ColumnRole::Unclassified
    };

    ColumnProfile {
        name: name.to_string(),
        index,
        role,
        unique_count: distinct.len(),
        missing_count,
        numeric,
    }
}

fn is_categorical_kind(value: &Value) -> bool {
    matches!(value.kind(), ValueKind::Text | ValueKind::Bool)
}
