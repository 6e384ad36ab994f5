use std::collections::BTreeMap;

use crate::data::model::Record;

/// The four headline figures shown above the charts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryMetrics {
    pub mean_salary: f64,
    pub max_salary: f64,
    pub total_records: usize,
    /// Most frequent job title; empty when there are no records.
    pub top_job_title: String,
}

/// Compute the summary metrics of a filtered view.
///
/// An empty view yields `(0, 0, 0, "")`. When several titles share the
/// highest count, the lexicographically smallest one is reported.
pub fn compute_metrics(view: &[&Record]) -> SummaryMetrics {
    if view.is_empty() {
        return SummaryMetrics::default();
    }

    let total: f64 = view.iter().map(|r| r.salary_usd).sum();
    let max_salary = view
        .iter()
        .map(|r| r.salary_usd)
        .fold(f64::NEG_INFINITY, f64::max);

    SummaryMetrics {
        mean_salary: total / view.len() as f64,
        max_salary,
        total_records: view.len(),
        top_job_title: most_frequent_job_title(view).unwrap_or_default(),
    }
}

/// Mode of the job-title column.
pub fn most_frequent_job_title(view: &[&Record]) -> Option<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for r in view {
        *counts.entry(r.job_title.as_str()).or_default() += 1;
    }
    // max_by_key keeps the last maximum; iterate in reverse so ties resolve
    // to the smallest title.
    counts
        .into_iter()
        .rev()
        .max_by_key(|(_, n)| *n)
        .map(|(title, _)| title.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filtered_view, init_filter_selection};
    use crate::data::model::tests::{record, two_row_dataset};
    use crate::data::model::{FilterColumn, FilterValue};

    #[test]
    fn empty_view_yields_zero_sentinel() {
        let m = compute_metrics(&[]);
        assert_eq!(m.mean_salary, 0.0);
        assert_eq!(m.max_salary, 0.0);
        assert_eq!(m.total_records, 0);
        assert_eq!(m.top_job_title, "");
    }

    #[test]
    fn senior_scenario() {
        let ds = two_row_dataset();
        let mut sel = init_filter_selection(&ds);
        sel.insert(FilterColumn::Seniority, [FilterValue::from("Senior")].into_iter().collect());

        let m = compute_metrics(&filtered_view(&ds, &sel));
        assert_eq!(m.total_records, 1);
        assert_eq!(m.mean_salary, 150_000.0);
        assert_eq!(m.max_salary, 150_000.0);
        assert_eq!(m.top_job_title, "Data Scientist");
    }

    #[test]
    fn max_is_at_least_mean_is_at_least_min() {
        let rows = [
            record(2023, "Senior", "A", "Remote", "USA", 12_000.0),
            record(2023, "Senior", "B", "Remote", "USA", 250_000.0),
            record(2023, "Senior", "B", "Remote", "USA", 61_500.5),
        ];
        let view: Vec<&Record> = rows.iter().collect();
        let m = compute_metrics(&view);
        let min = view.iter().map(|r| r.salary_usd).fold(f64::INFINITY, f64::min);
        assert!(m.max_salary >= m.mean_salary);
        assert!(m.mean_salary >= min);
        assert_eq!(m.top_job_title, "B");
    }

    #[test]
    fn mode_ties_resolve_to_smallest_title() {
        let rows = [
            record(2023, "Senior", "Zeta Engineer", "Remote", "USA", 1.0),
            record(2023, "Senior", "Alpha Analyst", "Remote", "USA", 1.0),
            record(2023, "Senior", "Zeta Engineer", "Remote", "USA", 1.0),
            record(2023, "Senior", "Alpha Analyst", "Remote", "USA", 1.0),
        ];
        let view: Vec<&Record> = rows.iter().collect();
        assert_eq!(most_frequent_job_title(&view).as_deref(), Some("Alpha Analyst"));
    }
}
