use std::collections::{BTreeMap, BTreeSet};

use super::model::{Dataset, FilterColumn, FilterValue, Record};

// ---------------------------------------------------------------------------
// Filter selection: which distinct values are admitted per column
// ---------------------------------------------------------------------------

/// Per-column selection state: maps filter column → set of admitted values.
/// A column absent from the map is unconstrained; an empty set admits nothing.
pub type FilterSelection = BTreeMap<FilterColumn, BTreeSet<FilterValue>>;

/// Initialise a [`FilterSelection`] with every distinct value selected.
pub fn init_filter_selection(dataset: &Dataset) -> FilterSelection {
    dataset
        .distinct_values
        .iter()
        .map(|(col, vals)| (*col, vals.clone()))
        .collect()
}

/// Whether a record passes every column constraint in `selection`.
pub fn passes(record: &Record, selection: &FilterSelection) -> bool {
    selection
        .iter()
        .all(|(col, selected)| record.matches(*col, selected))
}

/// Return positions of records that pass all filters, in dataset order.
pub fn filtered_indices(dataset: &Dataset, selection: &FilterSelection) -> Vec<usize> {
    if selection.values().any(|selected| selected.is_empty()) {
        return Vec::new();
    }
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, record)| passes(record, selection))
        .map(|(i, _)| i)
        .collect()
}

/// Borrow the records at `indices`.
pub fn view_of<'a>(dataset: &'a Dataset, indices: &[usize]) -> Vec<&'a Record> {
    indices.iter().filter_map(|&i| dataset.records.get(i)).collect()
}

/// The filtered view itself: borrowed records that pass all filters.
#[cfg(test)]
pub(crate) fn filtered_view<'a>(dataset: &'a Dataset, selection: &FilterSelection) -> Vec<&'a Record> {
    view_of(dataset, &filtered_indices(dataset, selection))
}
