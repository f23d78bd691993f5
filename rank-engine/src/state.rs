//! FILENAME: rank-engine/src/state.rs
//! View State - Filter and sort derivation over dataset rows.
//!
//! Holds the current filter selection and sort, and derives from them the
//! ordered sequence of dataset row indices to render. The summary row is
//! pinned at position 0 regardless of filter and sort. Filtering owns the
//! peer-set generation counter; sorting re-orders only and never touches it.

use std::cmp::Ordering;

use dataset::{Dataset, RowCategory};

use crate::definition::{FilterSelection, SortDirection, SortSpec};

/// Derived view state for one dataset snapshot.
#[derive(Debug, Clone)]
pub struct ViewState {
    filters: FilterSelection,
    sort: Option<SortSpec>,

    /// Row indices to render, summary row first, then peers in sort order.
    ordered_rows: Vec<usize>,

    /// Peer rows (non-summary members of the filtered view) in canonical
    /// order. Canonical order makes set comparison a plain Vec equality.
    peer_rows: Vec<usize>,

    /// Incremented exactly when the peer set changes membership.
    generation: u64,
}

impl ViewState {
    /// Builds the default state: all categories enabled, no sort.
    pub fn new(dataset: &Dataset) -> Self {
        let mut state = ViewState {
            filters: FilterSelection::default(),
            sort: None,
            ordered_rows: Vec::new(),
            peer_rows: Vec::new(),
            generation: 0,
        };
        state.peer_rows = state.compute_peer_rows(dataset, state.filters);
        state.rebuild_order(dataset);
        state
    }

    pub fn filters(&self) -> FilterSelection {
        self.filters
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    /// The live peer-set generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Row indices in render order: summary row first.
    pub fn current_rows(&self) -> &[usize] {
        &self.ordered_rows
    }

    /// Peer row indices (non-summary rows of the filtered view) in
    /// canonical dataset order.
    pub fn peer_rows(&self) -> &[usize] {
        &self.peer_rows
    }

    /// Replaces the filter selection and rederives the view.
    ///
    /// Returns true when the peer set changed membership; the caller must
    /// then invalidate the tooltip cache. Re-applying a selection that
    /// yields the same peer set reports false and leaves the generation
    /// untouched. The current sort is re-applied to the new row set.
    pub fn set_filters(&mut self, dataset: &Dataset, selection: FilterSelection) -> bool {
        let peers = self.compute_peer_rows(dataset, selection);
        let changed = peers != self.peer_rows;

        self.filters = selection;
        self.peer_rows = peers;
        self.rebuild_order(dataset);

        if changed {
            self.generation += 1;
        }
        changed
    }

    /// Replaces the sort and re-orders the current rows.
    /// Never changes the peer set, the generation, or any cached tooltip.
    pub fn set_sort(&mut self, dataset: &Dataset, sort: Option<SortSpec>) {
        self.sort = sort;
        self.rebuild_order(dataset);
    }

    fn compute_peer_rows(&self, dataset: &Dataset, selection: FilterSelection) -> Vec<usize> {
        dataset
            .row_labels()
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != dataset.summary_row())
            .filter(|(_, label)| match RowCategory::of(label) {
                Some(category) => selection.contains(category),
                None => false,
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Rebuilds `ordered_rows` from scratch: summary row, then the peer
    /// rows in canonical order, then the sort applied on top. Starting from
    /// canonical order every time keeps ties deterministic; a stable sort
    /// over an already re-sorted tail would inherit the previous order.
    fn rebuild_order(&mut self, dataset: &Dataset) {
        let mut tail = self.peer_rows.clone();

        if let Some(spec) = &self.sort {
            if let Some(column) = dataset.column_position(&spec.column) {
                let direction = spec.direction;
                tail.sort_by(|&a, &b| {
                    let va = dataset.value_at(a, column).and_then(|v| v.as_number());
                    let vb = dataset.value_at(b, column).and_then(|v| v.as_number());
                    compare_values(va, vb, direction)
                });
            }
        }

        self.ordered_rows = Vec::with_capacity(tail.len() + 1);
        self.ordered_rows.push(dataset.summary_row());
        self.ordered_rows.extend(tail);
    }
}

/// Orders two optional numeric values for one sort direction.
/// Missing values sort after all present values regardless of direction.
fn compare_values(a: Option<f64>, b: Option<f64>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            let ordering = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        }
    }
}
