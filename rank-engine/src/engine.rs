//! FILENAME: rank-engine/src/engine.rs
//! Table View Engine - Orchestrates state, cache and annotation.
//!
//! This module owns one dataset snapshot and drives the full pipeline
//! behind each command: apply filters, detect a peer-set change, invalidate
//! the tooltip cache when (and only when) one happened, re-sort, and
//! produce the renderable view.
//!
//! Every operation is synchronous and either fully commits or leaves the
//! engine untouched; there is no partially-applied state a caller can
//! observe. One engine instance assumes one logical owner: a
//! multi-threaded host must serialize filter/sort/render on one instance
//! as a unit.

use dataset::{CellValue, Dataset, RowCategory};

use crate::annotate::annotate;
use crate::cache::TooltipCache;
use crate::definition::{ColumnVisibility, FilterSelection, SortDirection, SortSpec, ViewCommand};
use crate::error::ViewError;
use crate::state::ViewState;
use crate::view::{TableCell, TableRow, TableView};

/// The ranked tabular view engine.
pub struct TableViewEngine {
    dataset: Dataset,
    state: ViewState,
    cache: TooltipCache,
    visibility: ColumnVisibility,
}

impl TableViewEngine {
    /// Builds an engine over one dataset snapshot with the default view:
    /// all categories enabled, default columns visible, no sort.
    pub fn new(dataset: Dataset) -> Self {
        let state = ViewState::new(&dataset);
        let visibility = ColumnVisibility::default_for(&dataset);
        TableViewEngine {
            dataset,
            state,
            cache: TooltipCache::new(),
            visibility,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn filters(&self) -> FilterSelection {
        self.state.filters()
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.state.sort()
    }

    pub fn visibility(&self) -> &ColumnVisibility {
        &self.visibility
    }

    /// Applies one serialized command.
    pub fn apply(&mut self, command: &ViewCommand) {
        match command {
            ViewCommand::SetAreaFilters { categories } => {
                self.set_area_filters(categories.iter().map(String::as_str));
            }
            ViewCommand::SetColumnVisibility { columns } => {
                self.set_column_visibility(columns.iter().map(String::as_str));
            }
            ViewCommand::SetSort { column, direction } => {
                self.set_sort(column, *direction);
            }
            ViewCommand::ClearSort => self.clear_sort(),
        }
    }

    /// Replaces the area filter selection with exactly the given category
    /// tokens. Unknown tokens are dropped; the rest of the command applies.
    /// The tooltip cache is invalidated only when the peer set actually
    /// changed membership.
    pub fn set_area_filters<'a>(&mut self, categories: impl IntoIterator<Item = &'a str>) {
        let mut parsed = Vec::new();
        for token in categories {
            match RowCategory::parse(token) {
                Some(category) => parsed.push(category),
                None => log::debug!("Dropping unknown area category token: {:?}", token),
            }
        }

        let selection = FilterSelection::from_categories(parsed);
        if self.state.set_filters(&self.dataset, selection) {
            self.cache.invalidate_all();
            log::debug!(
                "Peer set changed, tooltip cache invalidated (generation {})",
                self.cache.generation()
            );
        }
    }

    /// Replaces the visible column set with exactly the given columns.
    /// Unknown columns are dropped. Never touches the peer set or cache.
    pub fn set_column_visibility<'a>(&mut self, columns: impl IntoIterator<Item = &'a str>) {
        let requested: Vec<&str> = columns.into_iter().collect();
        for column in &requested {
            if !self.dataset.has_column(column) {
                log::debug!("Dropping unknown column token: {:?}", column);
            }
        }
        self.visibility = ColumnVisibility::from_columns(&self.dataset, requested);
    }

    /// Sorts by one column. An unknown column drops the command, keeping
    /// the previous sort. Never touches the peer set or cache.
    pub fn set_sort(&mut self, column: &str, direction: SortDirection) {
        if !self.dataset.has_column(column) {
            log::debug!("Dropping sort on unknown column: {:?}", column);
            return;
        }
        self.state
            .set_sort(&self.dataset, Some(SortSpec::new(column, direction)));
    }

    /// Returns to insertion order of the current filter.
    pub fn clear_sort(&mut self) {
        self.state.set_sort(&self.dataset, None);
    }

    /// Produces the current view: ordered rows with annotated visible
    /// cells, plus the hidden-column list.
    ///
    /// Tooltips are served from the cache for the live generation; a
    /// generation disagreement between state and cache aborts the render
    /// with state unchanged.
    pub fn render(&mut self) -> Result<TableView, ViewError> {
        let generation = self.state.generation();
        if generation != self.cache.generation() {
            return Err(ViewError::GenerationMismatch {
                state: generation,
                cache: self.cache.generation(),
            });
        }

        // Resolve visible columns and gather each column's peer values
        // once; every cell miss in that column reuses the same slice.
        let visible: Vec<(&String, usize)> = self
            .visibility
            .visible()
            .iter()
            .filter_map(|c| self.dataset.column_position(c).map(|i| (c, i)))
            .collect();

        let peers_by_column: Vec<Vec<CellValue>> = visible
            .iter()
            .map(|&(_, col_idx)| {
                self.state
                    .peer_rows()
                    .iter()
                    .map(|&r| {
                        self.dataset
                            .value_at(r, col_idx)
                            .unwrap_or(CellValue::Missing)
                    })
                    .collect()
            })
            .collect();

        let mut rows = Vec::with_capacity(self.state.current_rows().len());
        for &row_idx in self.state.current_rows() {
            let label = &self.dataset.row_labels()[row_idx];
            let mut cells = Vec::with_capacity(visible.len());

            for ((column, col_idx), peers) in visible.iter().zip(peers_by_column.iter()) {
                let value = self
                    .dataset
                    .value_at(row_idx, *col_idx)
                    .unwrap_or(CellValue::Missing);
                let tooltip = self
                    .cache
                    .get_or_compute(label, column, generation, || {
                        annotate(label, column, value, peers)
                    })?
                    .to_string();
                cells.push(TableCell {
                    column: (*column).clone(),
                    value,
                    tooltip,
                });
            }

            rows.push(TableRow {
                label: label.clone(),
                category: RowCategory::of(label),
                is_summary: self.dataset.is_summary(label),
                cells,
            });
        }

        Ok(TableView {
            rows,
            hidden_columns: self.visibility.hidden_for(&self.dataset),
            generation,
        })
    }
}
