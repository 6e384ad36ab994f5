use std::collections::BTreeSet;

use crate::analysis::{self, DashboardSnapshot};
use crate::config::DashboardConfig;
use crate::data::filter::{FilterSelection, filtered_indices, init_filter_selection, view_of};
use crate::data::model::{Dataset, FilterColumn, FilterValue, Record};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until a file has been loaded).
    pub dataset: Option<Dataset>,

    /// Per-column filter selections.
    pub filters: FilterSelection,

    /// Indices of records passing the current filters.
    pub visible_indices: Vec<usize>,

    /// Metrics and chart tables for the current filters.
    pub snapshot: DashboardSnapshot,

    /// Chart parameters.
    pub config: DashboardConfig,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Ingest a newly loaded dataset and select every value of every filter.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.filters = init_filter_selection(&dataset);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Records passing the current filters, in dataset order.
    pub fn visible_records(&self) -> Vec<&Record> {
        match &self.dataset {
            Some(ds) => view_of(ds, &self.visible_indices),
            None => Vec::new(),
        }
    }

    /// Re-run the whole pipeline after a filter change.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        self.visible_indices = filtered_indices(ds, &self.filters);
        let view = view_of(ds, &self.visible_indices);
        self.snapshot = analysis::evaluate(&view, &self.config);

        log::debug!("{} of {} records pass the filters", view.len(), ds.len());
        if view.is_empty() && !ds.is_empty() {
            log::warn!("Current filter selection matches no records");
        }
    }

    /// Whether `value` is currently admitted for `column`.
    pub fn is_selected(&self, column: FilterColumn, value: &FilterValue) -> bool {
        self.filters
            .get(&column)
            .is_some_and(|selected| selected.contains(value))
    }

    /// Toggle a single value in a column's filter.
    pub fn toggle_filter_value(&mut self, column: FilterColumn, value: &FilterValue) {
        let selected = self.filters.entry(column).or_default();
        if !selected.remove(value) {
            selected.insert(value.clone());
        }
        self.refilter();
    }

    /// Select all values in a column.
    pub fn select_all(&mut self, column: FilterColumn) {
        if let Some(all_vals) = self.dataset.as_ref().and_then(|ds| ds.distinct(column)) {
            self.filters.insert(column, all_vals.clone());
            self.refilter();
        }
    }

    /// Deselect all values in a column.
    pub fn select_none(&mut self, column: FilterColumn) {
        self.filters.insert(column, BTreeSet::new());
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::two_row_dataset;

    fn loaded_state() -> AppState {
        let mut state = AppState::new(DashboardConfig::default());
        state.set_dataset(two_row_dataset());
        state
    }

    #[test]
    fn loading_selects_everything() {
        let state = loaded_state();
        assert_eq!(state.visible_indices, vec![0, 1]);
        assert_eq!(state.snapshot.metrics.total_records, 2);
        assert!(state.is_selected(FilterColumn::Year, &FilterValue::Integer(2023)));
    }

    #[test]
    fn toggling_junior_off_leaves_senior_scenario() {
        let mut state = loaded_state();
        state.toggle_filter_value(FilterColumn::Seniority, &FilterValue::from("Junior"));

        assert_eq!(state.visible_records().len(), 1);
        let m = &state.snapshot.metrics;
        assert_eq!(m.mean_salary, 150_000.0);
        assert_eq!(m.max_salary, 150_000.0);
        assert_eq!(m.total_records, 1);
        assert_eq!(m.top_job_title, "Data Scientist");

        state.toggle_filter_value(FilterColumn::Seniority, &FilterValue::from("Junior"));
        assert_eq!(state.visible_records().len(), 2);
    }

    #[test]
    fn select_none_then_all() {
        let mut state = loaded_state();
        state.select_none(FilterColumn::Contract);
        assert!(state.visible_indices.is_empty());
        assert!(state.snapshot.top_jobs.is_none());
        assert_eq!(state.snapshot.metrics.top_job_title, "");

        state.select_all(FilterColumn::Contract);
        assert_eq!(state.visible_indices.len(), 2);
        assert!(state.snapshot.top_jobs.is_some());
    }

    #[test]
    fn refilter_without_dataset_is_a_no_op() {
        let mut state = AppState::default();
        state.select_none(FilterColumn::Year);
        assert!(state.visible_records().is_empty());
        assert_eq!(state.snapshot, DashboardSnapshot::default());
    }
}
