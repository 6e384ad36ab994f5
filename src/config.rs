use std::path::PathBuf;

use clap::Parser;

/// Dataset read at startup when no path is given.
pub const DEFAULT_DATA_PATH: &str = "dados-final.csv";
/// Job title used by the per-country salary chart.
pub const DEFAULT_JOB_TITLE: &str = "Data Scientist";
pub const DEFAULT_TOP_JOBS: usize = 10;
pub const DEFAULT_HISTOGRAM_BINS: usize = 30;

#[derive(Parser, Debug)]
#[command(name = "salary-dashboard")]
#[command(about = "Interactive dashboard of data-industry salaries.")]
pub struct CommandLine {
    /// Salary dataset (.csv, .json or .parquet)
    #[arg(long = "data", default_value = DEFAULT_DATA_PATH)]
    pub data_path: PathBuf,

    /// Job title shown in the per-country salary chart
    #[arg(long, default_value = DEFAULT_JOB_TITLE)]
    pub job_title: String,

    /// Number of job titles in the top-salaries chart
    #[arg(long = "top", default_value_t = DEFAULT_TOP_JOBS, value_parser = parse_positive)]
    pub top_jobs: usize,

    /// Number of bins in the salary histogram
    #[arg(long = "bins", default_value_t = DEFAULT_HISTOGRAM_BINS, value_parser = parse_positive)]
    pub histogram_bins: usize,
}

/// Counts of groups and bins must be at least one.
fn parse_positive(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Parameters of the chart preparers.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub job_title: String,
    pub top_jobs: usize,
    pub histogram_bins: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            job_title: DEFAULT_JOB_TITLE.to_string(),
            top_jobs: DEFAULT_TOP_JOBS,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
        }
    }
}

impl From<&CommandLine> for DashboardConfig {
    fn from(cli: &CommandLine) -> Self {
        Self {
            job_title: cli.job_title.clone(),
            top_jobs: cli.top_jobs,
            histogram_bins: cli.histogram_bins,
        }
    }
}
