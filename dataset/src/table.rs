//! FILENAME: dataset/src/table.rs
//! PURPOSE: Defines the immutable statistics table the view engine reads from.
//! CONTEXT: This file contains the `Dataset` struct and `CellValue` enum.
//! A dataset is a dense rectangular snapshot (every row has a value slot for
//! every column); it is validated once at construction and never mutated.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::DatasetError;

/// Label of the country-wide aggregate row present in every dataset.
pub const SUMMARY_ROW_LABEL: &str = "Hela landet";

/// A single measurement: a finite number or nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Missing,
    Number(f64),
}

impl CellValue {
    /// Returns the numeric value, or None when missing.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }
}

impl From<Option<f64>> for CellValue {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(n) => CellValue::Number(n),
            None => CellValue::Missing,
        }
    }
}

/// The immutable source table: ordered row labels, ordered column names, and
/// a value for every (row, column) pair.
///
/// Storage is dense row-major (`values[row][column]`); the survey tables are
/// small and fully populated, so a sparse map buys nothing here. Label and
/// column lookup maps are built once at construction for O(1) access.
#[derive(Debug, Clone)]
pub struct Dataset {
    row_labels: Vec<String>,
    columns: Vec<String>,
    values: Vec<Vec<CellValue>>,

    row_index: HashMap<String, usize>,
    column_index: HashMap<String, usize>,

    /// Index of the summary row within `row_labels`.
    summary_row: usize,
}

impl Dataset {
    /// Validates and builds a dataset.
    ///
    /// Rejects empty tables, ragged rows, duplicate labels or columns, and
    /// tables without the summary row. Non-finite numbers are normalized to
    /// `CellValue::Missing` so downstream comparisons never see NaN.
    pub fn new(
        row_labels: Vec<String>,
        columns: Vec<String>,
        mut values: Vec<Vec<CellValue>>,
    ) -> Result<Dataset, DatasetError> {
        if row_labels.is_empty() || columns.is_empty() {
            return Err(DatasetError::Empty);
        }

        let mut row_index = HashMap::with_capacity(row_labels.len());
        for (i, label) in row_labels.iter().enumerate() {
            if row_index.insert(label.clone(), i).is_some() {
                return Err(DatasetError::DuplicateRow(label.clone()));
            }
        }

        let mut column_index = HashMap::with_capacity(columns.len());
        for (i, column) in columns.iter().enumerate() {
            if column_index.insert(column.clone(), i).is_some() {
                return Err(DatasetError::DuplicateColumn(column.clone()));
            }
        }

        let summary_row = match row_index.get(SUMMARY_ROW_LABEL) {
            Some(&i) => i,
            None => return Err(DatasetError::SummaryRowMissing(SUMMARY_ROW_LABEL)),
        };

        if values.len() != row_labels.len() {
            return Err(DatasetError::ShapeMismatch {
                row: row_labels
                    .get(values.len())
                    .cloned()
                    .unwrap_or_default(),
                expected: row_labels.len(),
                found: values.len(),
            });
        }
        for (label, row) in row_labels.iter().zip(values.iter()) {
            if row.len() != columns.len() {
                return Err(DatasetError::ShapeMismatch {
                    row: label.clone(),
                    expected: columns.len(),
                    found: row.len(),
                });
            }
        }

        for row in values.iter_mut() {
            for value in row.iter_mut() {
                if let CellValue::Number(n) = value {
                    if !n.is_finite() {
                        *value = CellValue::Missing;
                    }
                }
            }
        }

        Ok(Dataset {
            row_labels,
            columns,
            values,
            row_index,
            column_index,
            summary_row,
        })
    }

    /// Row labels in canonical (source) order.
    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    /// Column names in canonical (source) order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.row_labels.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Looks up a value by row label and column name.
    /// Returns None for unknown coordinates.
    pub fn value(&self, row: &str, column: &str) -> Option<CellValue> {
        let r = *self.row_index.get(row)?;
        let c = *self.column_index.get(column)?;
        Some(self.values[r][c])
    }

    /// Looks up a value by row and column index.
    pub fn value_at(&self, row: usize, column: usize) -> Option<CellValue> {
        self.values.get(row).and_then(|r| r.get(column)).copied()
    }

    pub fn row_position(&self, label: &str) -> Option<usize> {
        self.row_index.get(label).copied()
    }

    pub fn column_position(&self, column: &str) -> Option<usize> {
        self.column_index.get(column).copied()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_index.contains_key(column)
    }

    /// Index of the summary row in canonical order.
    pub fn summary_row(&self) -> usize {
        self.summary_row
    }

    pub fn is_summary(&self, label: &str) -> bool {
        label == SUMMARY_ROW_LABEL
    }
}
