//! FILENAME: dataset/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Dataset has no rows or no columns")]
    Empty,

    #[error("Row '{row}' has {found} values, expected {expected}")]
    ShapeMismatch {
        row: String,
        expected: usize,
        found: usize,
    },

    #[error("Duplicate row label: {0}")]
    DuplicateRow(String),

    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("Summary row '{0}' is missing")]
    SummaryRowMissing(&'static str),
}
