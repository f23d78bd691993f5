//! FILENAME: rank-engine/src/annotate.rs
//! Rank Annotation - Pure computation of per-cell rank tooltips.
//!
//! Given one cell and the values of the current peer rows in that cell's
//! column, produce the annotation shown on hover. Ranking is descending:
//! the highest value in the column is rank 1 ("most dangerous"), matching
//! the survey's worse-is-first convention. The summary row and missing
//! values get fixed annotations instead of a rank.

use std::fmt;

use serde::{Deserialize, Serialize};

use dataset::{CellValue, SUMMARY_ROW_LABEL};

/// The annotation attached to a single cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Annotation {
    /// Numeric cell on a region row: its descending rank among the peers
    /// with a value in this column.
    #[serde(rename_all = "camelCase")]
    Ranked {
        row: String,
        column: String,
        rank: usize,
        total: usize,
    },

    /// The country-wide aggregate row. Never ranked, whatever its value.
    #[serde(rename_all = "camelCase")]
    Aggregate { row: String, column: String },

    /// Missing value, or a column with no peer values to rank against.
    #[serde(rename_all = "camelCase")]
    NoData { row: String },
}

impl fmt::Display for Annotation {
    /// Renders the tooltip markdown. The templates are fixed; renders of
    /// the same annotation are byte-identical.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Annotation::Ranked {
                row,
                column,
                rank,
                total,
            } => {
                write!(f, "**{} / {}**\n{}. farligaste av {}\n", row, column, rank, total)
            }
            Annotation::Aggregate { row, column } => {
                write!(f, "**{} / {}**\nriksgenomsnitt\n", row, column)
            }
            Annotation::NoData { row } => {
                write!(f, "**{}**\nuppgift saknas\n", row)
            }
        }
    }
}

/// Computes the annotation for one cell.
///
/// `peer_values` are the values of the peer rows (the non-summary rows of
/// the active filtered view) in this cell's column, in any order; missing
/// peer values are ignored. The result depends only on the multiset of
/// peer values, never on their order.
pub fn annotate(row: &str, column: &str, value: CellValue, peer_values: &[CellValue]) -> Annotation {
    if row == SUMMARY_ROW_LABEL {
        return Annotation::Aggregate {
            row: row.to_string(),
            column: column.to_string(),
        };
    }

    let value = match value.as_number() {
        Some(n) => n,
        None => {
            return Annotation::NoData {
                row: row.to_string(),
            }
        }
    };

    let (lt, eq, gt) = rank_counts(value, peer_values);
    let total = lt + eq + gt;
    if total == 0 {
        return Annotation::NoData {
            row: row.to_string(),
        };
    }

    Annotation::Ranked {
        row: row.to_string(),
        column: column.to_string(),
        // Ties share the rank at the bottom of their block: rank 1 only for
        // a unique maximum.
        rank: gt + eq,
        total,
    }
}

/// Counts peer values strictly below, equal to, and strictly above `value`.
/// Missing peers are excluded from all three counts.
fn rank_counts(value: f64, peer_values: &[CellValue]) -> (usize, usize, usize) {
    let mut lt = 0;
    let mut eq = 0;
    let mut gt = 0;
    for peer in peer_values {
        let peer = match peer.as_number() {
            Some(n) => n,
            None => continue,
        };
        if peer < value {
            lt += 1;
        } else if peer > value {
            gt += 1;
        } else {
            eq += 1;
        }
    }
    (lt, eq, gt)
}
