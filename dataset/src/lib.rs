//! FILENAME: dataset/src/lib.rs
//! PURPOSE: Main library entry point for the regional statistics data model.
//! CONTEXT: Re-exports public types and modules for use by other crates.

pub mod category;
pub mod error;
pub mod table;

// Re-export commonly used types at the crate root
pub use category::RowCategory;
pub use error::DatasetError;
pub use table::{CellValue, Dataset, SUMMARY_ROW_LABEL};
