use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// FilterColumn – the four attributes the sidebar can filter on
// ---------------------------------------------------------------------------

/// A filterable attribute of a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterColumn {
    Year,
    Seniority,
    Contract,
    CompanySize,
}

impl FilterColumn {
    /// All filterable columns in sidebar order.
    pub const ALL: [FilterColumn; 4] = [
        FilterColumn::Year,
        FilterColumn::Seniority,
        FilterColumn::Contract,
        FilterColumn::CompanySize,
    ];

    /// Column name in the source file.
    pub fn source_name(self) -> &'static str {
        match self {
            FilterColumn::Year => "ano",
            FilterColumn::Seniority => "senioridade",
            FilterColumn::Contract => "contrato",
            FilterColumn::CompanySize => "tamanho_empresa",
        }
    }

    /// Human readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            FilterColumn::Year => "Year",
            FilterColumn::Seniority => "Seniority",
            FilterColumn::Contract => "Contract",
            FilterColumn::CompanySize => "Company size",
        }
    }
}

impl fmt::Display for FilterColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// FilterValue – a single admissible value of a filter column
// ---------------------------------------------------------------------------

/// Value of a filterable attribute. Years stay numeric so they sort as numbers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterValue {
    Integer(i64),
    Text(String),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Integer(i) => write!(f, "{i}"),
            FilterValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Integer(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the salary table
// ---------------------------------------------------------------------------

/// One salary record. Field names follow the source file's column headers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Record {
    #[serde(rename = "ano")]
    pub year: i64,
    #[serde(rename = "senioridade")]
    pub seniority: String,
    #[serde(rename = "contrato")]
    pub contract: String,
    #[serde(rename = "tamanho_empresa")]
    pub company_size: String,
    #[serde(rename = "cargo")]
    pub job_title: String,
    #[serde(rename = "home_office")]
    pub remote_mode: String,
    #[serde(rename = "residencia_iso3")]
    pub residence_iso3: String,
    #[serde(rename = "usd")]
    pub salary_usd: f64,
}

impl Record {
    /// The value this record holds for a filter column.
    pub fn value_of(&self, column: FilterColumn) -> FilterValue {
        match column {
            FilterColumn::Year => FilterValue::Integer(self.year),
            FilterColumn::Seniority => FilterValue::Text(self.seniority.clone()),
            FilterColumn::Contract => FilterValue::Text(self.contract.clone()),
            FilterColumn::CompanySize => FilterValue::Text(self.company_size.clone()),
        }
    }

    /// Whether this record's value for `column` is in `selected`.
    ///
    /// Borrows instead of building a `FilterValue` for the string columns,
    /// since this runs once per row and column on every filter change.
    pub fn matches(&self, column: FilterColumn, selected: &BTreeSet<FilterValue>) -> bool {
        let text = match column {
            FilterColumn::Year => return selected.contains(&FilterValue::Integer(self.year)),
            FilterColumn::Seniority => &self.seniority,
            FilterColumn::Contract => &self.contract,
            FilterColumn::CompanySize => &self.company_size,
        };
        selected
            .iter()
            .any(|v| matches!(v, FilterValue::Text(s) if s == text))
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed distinct values per filter column.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// All records, in file order.
    pub records: Vec<Record>,
    /// For each filter column the sorted set of distinct values.
    pub distinct_values: BTreeMap<FilterColumn, BTreeSet<FilterValue>>,
}

impl Dataset {
    /// Build the distinct-value index from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut distinct_values: BTreeMap<FilterColumn, BTreeSet<FilterValue>> = FilterColumn::ALL
            .iter()
            .map(|&col| (col, BTreeSet::new()))
            .collect();

        for record in &records {
            for col in FilterColumn::ALL {
                distinct_values
                    .entry(col)
                    .or_default()
                    .insert(record.value_of(col));
            }
        }

        Dataset {
            records,
            distinct_values,
        }
    }

    /// Sorted distinct values of one filter column.
    pub fn distinct(&self, column: FilterColumn) -> Option<&BTreeSet<FilterValue>> {
        self.distinct_values.get(&column)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(
        year: i64,
        seniority: &str,
        job_title: &str,
        remote_mode: &str,
        iso3: &str,
        salary_usd: f64,
    ) -> Record {
        Record {
            year,
            seniority: seniority.to_string(),
            contract: "CLT".to_string(),
            company_size: "M".to_string(),
            job_title: job_title.to_string(),
            remote_mode: remote_mode.to_string(),
            residence_iso3: iso3.to_string(),
            salary_usd,
        }
    }

    /// The two-row dataset used across the pipeline tests.
    pub(crate) fn two_row_dataset() -> Dataset {
        Dataset::from_records(vec![
            record(2023, "Senior", "Data Scientist", "Remote", "USA", 150_000.0),
            record(2023, "Junior", "Analyst", "Hybrid", "BRA", 40_000.0),
        ])
    }

    #[test]
    fn distinct_values_are_sorted_and_deduplicated() {
        let ds = Dataset::from_records(vec![
            record(2024, "Senior", "A", "Remote", "USA", 1.0),
            record(2021, "Junior", "B", "Remote", "USA", 2.0),
            record(2024, "Mid", "C", "Remote", "USA", 3.0),
        ]);

        let years: Vec<_> = ds.distinct(FilterColumn::Year).unwrap().iter().cloned().collect();
        assert_eq!(years, vec![FilterValue::Integer(2021), FilterValue::Integer(2024)]);

        let seniorities: Vec<String> = ds
            .distinct(FilterColumn::Seniority)
            .unwrap()
            .iter()
            .map(|v| v.to_string())
            .collect();
        assert_eq!(seniorities, vec!["Junior", "Mid", "Senior"]);
    }

    #[test]
    fn empty_dataset_still_lists_every_filter_column() {
        let ds = Dataset::from_records(Vec::new());
        assert!(ds.is_empty());
        for col in FilterColumn::ALL {
            assert!(ds.distinct(col).unwrap().is_empty());
        }
    }

    #[test]
    fn matches_agrees_with_value_of() {
        let r = record(2023, "Senior", "Data Scientist", "Remote", "USA", 1.0);
        for col in FilterColumn::ALL {
            let only_own: BTreeSet<_> = [r.value_of(col)].into_iter().collect();
            assert!(r.matches(col, &only_own));
            let other: BTreeSet<_> = [FilterValue::from("nope"), FilterValue::Integer(1999)]
                .into_iter()
                .collect();
            assert!(!r.matches(col, &other));
        }
    }
}
