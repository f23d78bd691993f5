//! FILENAME: rank-engine/src/definition.rs
//! View Definition - The serializable configuration.
//!
//! This module contains the types that DESCRIBE the current view: which
//! area categories are included, which columns are shown, and the active
//! sort. These structures are designed to be:
//! - Serializable (command payloads from any host event loop)
//! - Immutable snapshots of user intent

use serde::{Deserialize, Serialize};

use dataset::{Dataset, RowCategory};

/// Column names shown by default when present in the dataset: the survey's
/// top-level "totalt" aggregates. Detail columns start hidden and can be
/// enabled per command.
pub const DEFAULT_VISIBLE_COLUMNS: &[&str] = &[
    "Utsatthet för brott totalt",
    "Brott mot enskild person totalt",
    "Egendomsbrott mot hushåll totalt",
    "Otrygghet och oro för brott totalt",
];

// ============================================================================
// SORT
// ============================================================================

/// Direction of the single active sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// The active sort: one column, one direction.
/// `None` at the view level means "insertion order of the current filter".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortSpec {
    pub column: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        SortSpec {
            column: column.into(),
            direction,
        }
    }
}

// ============================================================================
// FILTER SELECTION
// ============================================================================

/// Which area categories are included in the view.
/// The summary row is always included regardless of this selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSelection {
    pub county: bool,
    pub district: bool,
    pub city: bool,
}

impl FilterSelection {
    /// All categories enabled.
    pub fn all() -> Self {
        FilterSelection {
            county: true,
            district: true,
            city: true,
        }
    }

    /// No categories enabled (the view degenerates to the summary row).
    pub fn none() -> Self {
        FilterSelection {
            county: false,
            district: false,
            city: false,
        }
    }

    /// Builds a selection enabling exactly the given categories.
    pub fn from_categories(categories: impl IntoIterator<Item = RowCategory>) -> Self {
        let mut selection = FilterSelection::none();
        for category in categories {
            match category {
                RowCategory::County => selection.county = true,
                RowCategory::District => selection.district = true,
                RowCategory::City => selection.city = true,
            }
        }
        selection
    }

    pub fn contains(&self, category: RowCategory) -> bool {
        match category {
            RowCategory::County => self.county,
            RowCategory::District => self.district,
            RowCategory::City => self.city,
        }
    }
}

impl Default for FilterSelection {
    fn default() -> Self {
        FilterSelection::all()
    }
}

// ============================================================================
// COLUMN VISIBILITY
// ============================================================================

/// Which dataset columns are currently rendered, kept in canonical column
/// order. Hidden columns stay in the dataset and keep participating in rank
/// computation; visibility is presentation state only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnVisibility {
    visible: Vec<String>,
}

impl ColumnVisibility {
    /// The default selection: the top-level columns present in the dataset,
    /// or every column when none of the defaults match.
    pub fn default_for(dataset: &Dataset) -> Self {
        let visible: Vec<String> = dataset
            .columns()
            .iter()
            .filter(|c| DEFAULT_VISIBLE_COLUMNS.contains(&c.as_str()))
            .cloned()
            .collect();
        if visible.is_empty() {
            ColumnVisibility {
                visible: dataset.columns().to_vec(),
            }
        } else {
            ColumnVisibility { visible }
        }
    }

    /// Builds a visibility set from requested column names, dropping names
    /// the dataset does not know and normalizing to canonical column order.
    pub fn from_columns<'a>(
        dataset: &Dataset,
        columns: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let requested: Vec<&str> = columns.into_iter().collect();
        let visible = dataset
            .columns()
            .iter()
            .filter(|c| requested.contains(&c.as_str()))
            .cloned()
            .collect();
        ColumnVisibility { visible }
    }

    /// Visible column names in canonical order.
    pub fn visible(&self) -> &[String] {
        &self.visible
    }

    pub fn is_visible(&self, column: &str) -> bool {
        self.visible.iter().any(|c| c == column)
    }

    /// The complement of the visible set over the dataset's columns, in
    /// canonical order. Derived on demand; nothing caches this.
    pub fn hidden_for(&self, dataset: &Dataset) -> Vec<String> {
        dataset
            .columns()
            .iter()
            .filter(|c| !self.is_visible(c))
            .cloned()
            .collect()
    }
}

// ============================================================================
// COMMANDS
// ============================================================================

/// The externally-triggered operations, as a serializable payload any event
/// loop or message channel can deliver. Unknown category or column tokens
/// inside a command are dropped, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum ViewCommand {
    /// Replace the area filter selection with exactly these categories.
    #[serde(rename_all = "camelCase")]
    SetAreaFilters { categories: Vec<String> },

    /// Replace the visible column set with exactly these columns.
    #[serde(rename_all = "camelCase")]
    SetColumnVisibility { columns: Vec<String> },

    /// Sort by one column.
    #[serde(rename_all = "camelCase")]
    SetSort {
        column: String,
        direction: SortDirection,
    },

    /// Return to insertion order of the current filter.
    ClearSort,
}
