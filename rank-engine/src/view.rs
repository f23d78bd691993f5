//! FILENAME: rank-engine/src/view.rs
//! Table View - Renderable output for the host.
//!
//! The flattened result of one render: rows in display order, each carrying
//! its visible cells (value + tooltip text), plus the hidden-column list.
//! These structures are serializable so any host (UI process, HTTP handler,
//! test harness) can consume them as plain data.

use serde::{Deserialize, Serialize};

use dataset::{CellValue, RowCategory};

/// One visible cell of a rendered row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    /// Column name (canonical dataset name).
    pub column: String,

    /// The cell's value.
    pub value: CellValue,

    /// Rendered rank tooltip. Byte-identical across renders that share a
    /// peer-set generation, sorts included.
    pub tooltip: String,
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    /// Region label.
    pub label: String,

    /// Area category; None for the summary row.
    pub category: Option<RowCategory>,

    /// Whether this is the country-wide aggregate row (always row 0).
    pub is_summary: bool,

    /// Visible cells in canonical column order.
    pub cells: Vec<TableCell>,
}

/// The complete rendered view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    /// Rows in display order; the summary row is first.
    pub rows: Vec<TableRow>,

    /// Dataset columns not currently rendered, in canonical order.
    pub hidden_columns: Vec<String>,

    /// Peer-set generation this view was rendered under.
    pub generation: u64,
}

impl TableView {
    /// Finds a rendered row by label.
    pub fn row(&self, label: &str) -> Option<&TableRow> {
        self.rows.iter().find(|r| r.label == label)
    }

    /// Finds one cell by row label and column name.
    pub fn cell(&self, label: &str, column: &str) -> Option<&TableCell> {
        self.row(label)?.cells.iter().find(|c| c.column == column)
    }
}
