use std::collections::BTreeMap;

use crate::data::model::Record;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Running sum/count used for per-group means.
#[derive(Debug, Default, Clone, Copy)]
struct MeanAcc {
    sum: f64,
    count: usize,
}

impl MeanAcc {
    fn push(&mut self, v: f64) {
        self.sum += v;
        self.count += 1;
    }

    fn mean(self) -> f64 {
        self.sum / self.count as f64
    }
}

/// Mean salary per key, keys in sorted order.
fn mean_salary_by<'a, F>(view: &[&'a Record], key: F) -> BTreeMap<&'a str, f64>
where
    F: Fn(&'a Record) -> &'a str,
{
    let mut groups: BTreeMap<&str, MeanAcc> = BTreeMap::new();
    for &r in view {
        groups.entry(key(r)).or_default().push(r.salary_usd);
    }
    groups.into_iter().map(|(k, acc)| (k, acc.mean())).collect()
}

// ---------------------------------------------------------------------------
// Top jobs by mean salary (horizontal bar chart)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct JobSalary {
    pub job_title: String,
    pub mean_salary: f64,
}

/// The `limit` job titles with the highest mean salary, ascending by mean.
///
/// Returns `None` for an empty view.
pub fn top_jobs_by_salary(view: &[&Record], limit: usize) -> Option<Vec<JobSalary>> {
    if view.is_empty() {
        return None;
    }

    let mut jobs: Vec<JobSalary> = mean_salary_by(view, |r| r.job_title.as_str())
        .into_iter()
        .map(|(title, mean)| JobSalary {
            job_title: title.to_string(),
            mean_salary: mean,
        })
        .collect();

    // Stable sorts: equal means keep title order.
    jobs.sort_by(|a, b| b.mean_salary.total_cmp(&a.mean_salary));
    jobs.truncate(limit);
    jobs.sort_by(|a, b| a.mean_salary.total_cmp(&b.mean_salary));
    Some(jobs)
}

// ---------------------------------------------------------------------------
// Salary distribution (histogram)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Bucket salaries into `bins` equal-width bins over the observed min–max.
///
/// The last bin is closed so the maximum salary lands in it. When every
/// salary is identical the range is widened to one dollar centred on it.
pub fn salary_histogram(view: &[&Record], bins: usize) -> Option<Vec<HistogramBin>> {
    if view.is_empty() || bins == 0 {
        return None;
    }

    let (mut min, mut max) = view
        .iter()
        .map(|r| r.salary_usd)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if max - min <= f64::EPSILON {
        min -= 0.5;
        max += 0.5;
    }
    let width = (max - min) / bins as f64;

    let mut counts = vec![0usize; bins];
    for r in view {
        let idx = ((r.salary_usd - min) / width).floor() as usize;
        counts[idx.min(bins - 1)] += 1;
    }

    Some(
        counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                start: min + width * i as f64,
                end: min + width * (i + 1) as f64,
                count,
            })
            .collect(),
    )
}

// ---------------------------------------------------------------------------
// Remote-work mode proportions (donut)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: String,
    pub count: usize,
    /// Fraction of the filtered view, in `0.0..=1.0`.
    pub share: f64,
}

/// Row count per remote-work mode, most common first.
pub fn remote_work_shares(view: &[&Record]) -> Option<Vec<CategoryShare>> {
    if view.is_empty() {
        return None;
    }

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for r in view {
        *counts.entry(r.remote_mode.as_str()).or_default() += 1;
    }

    let total = view.len() as f64;
    let mut shares: Vec<CategoryShare> = counts
        .into_iter()
        .map(|(category, count)| CategoryShare {
            category: category.to_string(),
            count,
            share: count as f64 / total,
        })
        .collect();
    shares.sort_by(|a, b| b.count.cmp(&a.count));
    Some(shares)
}

// ---------------------------------------------------------------------------
// Mean salary per country for one job title (map)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CountrySalary {
    pub iso3: String,
    pub mean_salary: f64,
}

/// Mean salary per residence country among rows whose title is exactly `job_title`.
///
/// `None` means the filtered view itself is empty; a non-empty view with no
/// matching title gives an empty table.
pub fn country_mean_salary(view: &[&Record], job_title: &str) -> Option<Vec<CountrySalary>> {
    if view.is_empty() {
        return None;
    }

    let matching: Vec<&Record> = view
        .iter()
        .copied()
        .filter(|r| r.job_title == job_title)
        .collect();

    Some(
        mean_salary_by(&matching, |r| r.residence_iso3.as_str())
            .into_iter()
            .map(|(iso3, mean)| CountrySalary {
                iso3: iso3.to_string(),
                mean_salary: mean,
            })
            .collect(),
    )
}
