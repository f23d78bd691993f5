//! FILENAME: dataset/src/category.rs
//! PURPOSE: Classifies row labels into the filterable area categories.
//! CONTEXT: The survey tables mix three kinds of regions in one label
//! column: counties ("Värmlands län"), city districts ("Göteborg, Centrum
//! stadsdelsnämnd") and municipalities (everything else). The category is
//! derived from the label on demand and never stored.

use serde::{Deserialize, Serialize};

use crate::table::SUMMARY_ROW_LABEL;

/// The kind of region a non-summary row represents.
/// Exactly one category applies to every non-summary row; the summary row
/// belongs to none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RowCategory {
    /// County-level aggregate rows ("… län").
    County,
    /// City-district rows ("… stadsdel …").
    District,
    /// Municipality rows (the default).
    City,
}

impl RowCategory {
    pub const ALL: [RowCategory; 3] = [
        RowCategory::County,
        RowCategory::District,
        RowCategory::City,
    ];

    /// Derives the category from a row label.
    /// Returns None for the summary row.
    pub fn of(label: &str) -> Option<RowCategory> {
        if label == SUMMARY_ROW_LABEL {
            return None;
        }
        if label.ends_with(" län") {
            Some(RowCategory::County)
        } else if label.contains(" stadsdel") {
            Some(RowCategory::District)
        } else {
            Some(RowCategory::City)
        }
    }

    /// Parses a command token ("county", "District", ...) into a category.
    /// Unknown tokens return None and are dropped by the caller.
    pub fn parse(token: &str) -> Option<RowCategory> {
        match token.trim().to_ascii_lowercase().as_str() {
            "county" => Some(RowCategory::County),
            "district" => Some(RowCategory::District),
            "city" => Some(RowCategory::City),
            _ => None,
        }
    }
}
