//! Aggregations over the filtered view: headline metrics and chart tables.
//!
//! Every function here is pure and takes the filtered view as `&[&Record]`;
//! an empty view is answered with a zero sentinel (metrics) or `None`
//! (charts) rather than an error.

pub mod charts;
pub mod metrics;

use crate::config::DashboardConfig;
use crate::data::model::Record;

use charts::{CategoryShare, CountrySalary, HistogramBin, JobSalary};
use metrics::SummaryMetrics;

/// Everything the central panel renders for one filter selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSnapshot {
    pub metrics: SummaryMetrics,
    pub top_jobs: Option<Vec<JobSalary>>,
    pub salary_histogram: Option<Vec<HistogramBin>>,
    pub remote_shares: Option<Vec<CategoryShare>>,
    pub country_salaries: Option<Vec<CountrySalary>>,
}

/// Run the metrics computer and all four chart preparers over `view`.
pub fn evaluate(view: &[&Record], config: &DashboardConfig) -> DashboardSnapshot {
    DashboardSnapshot {
        metrics: metrics::compute_metrics(view),
        top_jobs: charts::top_jobs_by_salary(view, config.top_jobs),
        salary_histogram: charts::salary_histogram(view, config.histogram_bins),
        remote_shares: charts::remote_work_shares(view),
        country_salaries: charts::country_mean_salary(view, &config.job_title),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::two_row_dataset;

    #[test]
    fn empty_view_snapshot_has_no_chart_data() {
        let snap = evaluate(&[], &DashboardConfig::default());
        assert_eq!(snap, DashboardSnapshot::default());
    }

    #[test]
    fn full_view_snapshot() {
        let ds = two_row_dataset();
        let view: Vec<&Record> = ds.records.iter().collect();
        let snap = evaluate(&view, &DashboardConfig::default());

        assert_eq!(snap.metrics.total_records, 2);
        assert_eq!(snap.metrics.mean_salary, 95_000.0);
        assert_eq!(snap.top_jobs.unwrap().len(), 2);
        assert_eq!(snap.salary_histogram.unwrap().len(), 30);
        assert_eq!(snap.remote_shares.unwrap().len(), 2);
        assert_eq!(
            snap.country_salaries.unwrap(),
            vec![CountrySalary { iso3: "USA".into(), mean_salary: 150_000.0 }]
        );
    }
}
