use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{Dataset, FilterColumn, Record};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Structural problems found while mapping columnar data onto [`Record`]s.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("missing column '{0}'")]
    MissingColumn(&'static str),
    #[error("column '{column}' has unsupported type {data_type:?}")]
    UnsupportedType {
        column: &'static str,
        data_type: DataType,
    },
    #[error("row {row}: null value in column '{column}'")]
    NullValue { column: &'static str, row: usize },
    #[error("row {row}: salary {value} is not a finite number")]
    NonFiniteSalary { row: usize, value: f64 },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a salary dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row; `ano`, `senioridade`, `contrato`, `tamanho_empresa`,
///   `cargo`, `home_office`, `residencia_iso3`, `usd` (extra columns ignored)
/// * `.json`    – `[{ "ano": 2023, "cargo": "...", ... }, ...]`
/// * `.parquet` – same columns; integer or float numeric columns
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .and_then(|dataset| {
        check_salaries(&dataset.records)?;
        Ok(dataset)
    })
    .with_context(|| format!("loading {}", path.display()))?;

    let distinct: Vec<String> = FilterColumn::ALL
        .iter()
        .map(|&col| {
            let n = dataset.distinct(col).map_or(0, |v| v.len());
            format!("{n} {}", col.source_name())
        })
        .collect();
    log::info!(
        "Loaded {} records from {} ({})",
        dataset.len(),
        path.display(),
        distinct.join(", ")
    );
    Ok(dataset)
}

/// Every aggregation assumes finite salaries; NaN or infinite cells are malformed input.
fn check_salaries(records: &[Record]) -> Result<(), SchemaError> {
    match records.iter().position(|r| !r.salary_usd.is_finite()) {
        Some(row) => Err(SchemaError::NonFiniteSalary {
            row,
            value: records[row].salary_usd,
        }),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let records = reader
        .deserialize::<Record>()
        .enumerate()
        // +2: one-based, after the header line
        .map(|(row_no, result)| result.with_context(|| format!("CSV line {}", row_no + 2)))
        .collect::<Result<Vec<_>>>()?;
    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let records: Vec<Record> = serde_json::from_str(&text).context("parsing JSON")?;
    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by Pandas (`df.to_parquet()`) or Polars.
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        records.extend(records_from_batch(&batch)?);
    }

    Ok(Dataset::from_records(records))
}

/// Convert one Arrow record batch into records.
pub(crate) fn records_from_batch(batch: &RecordBatch) -> Result<Vec<Record>, SchemaError> {
    let year = int_column(batch, "ano")?;
    let seniority = string_column(batch, "senioridade")?;
    let contract = string_column(batch, "contrato")?;
    let company_size = string_column(batch, "tamanho_empresa")?;
    let job_title = string_column(batch, "cargo")?;
    let remote_mode = string_column(batch, "home_office")?;
    let residence_iso3 = string_column(batch, "residencia_iso3")?;
    let salary_usd = float_column(batch, "usd")?;

    Ok((0..batch.num_rows())
        .map(|row| Record {
            year: year[row],
            seniority: seniority[row].clone(),
            contract: contract[row].clone(),
            company_size: company_size[row].clone(),
            job_title: job_title[row].clone(),
            remote_mode: remote_mode[row].clone(),
            residence_iso3: residence_iso3[row].clone(),
            salary_usd: salary_usd[row],
        })
        .collect())
}

// -- Arrow helpers --

fn column<'a>(batch: &'a RecordBatch, name: &'static str) -> Result<&'a Arc<dyn Array>, SchemaError> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| SchemaError::MissingColumn(name))?;
    let col = batch.column(idx);
    if let Some(row) = (0..col.len()).find(|&row| col.is_null(row)) {
        return Err(SchemaError::NullValue { column: name, row });
    }
    Ok(col)
}

fn unsupported(name: &'static str, col: &Arc<dyn Array>) -> SchemaError {
    SchemaError::UnsupportedType {
        column: name,
        data_type: col.data_type().clone(),
    }
}

fn int_column(batch: &RecordBatch, name: &'static str) -> Result<Vec<i64>, SchemaError> {
    let col = column(batch, name)?;
    let any = col.as_any();
    if let Some(arr) = any.downcast_ref::<Int64Array>() {
        Ok(arr.values().to_vec())
    } else if let Some(arr) = any.downcast_ref::<Int32Array>() {
        Ok(arr.values().iter().map(|&v| v as i64).collect())
    } else if let Some(arr) = any.downcast_ref::<Float64Array>() {
        // Pandas writes integer columns with NaNs as float64.
        Ok(arr.values().iter().map(|&v| v as i64).collect())
    } else {
        Err(unsupported(name, col))
    }
}

fn float_column(batch: &RecordBatch, name: &'static str) -> Result<Vec<f64>, SchemaError> {
    let col = column(batch, name)?;
    let any = col.as_any();
    if let Some(arr) = any.downcast_ref::<Float64Array>() {
        Ok(arr.values().to_vec())
    } else if let Some(arr) = any.downcast_ref::<Float32Array>() {
        Ok(arr.values().iter().map(|&v| v as f64).collect())
    } else if let Some(arr) = any.downcast_ref::<Int64Array>() {
        Ok(arr.values().iter().map(|&v| v as f64).collect())
    } else if let Some(arr) = any.downcast_ref::<Int32Array>() {
        Ok(arr.values().iter().map(|&v| v as f64).collect())
    } else {
        Err(unsupported(name, col))
    }
}

fn string_column(batch: &RecordBatch, name: &'static str) -> Result<Vec<String>, SchemaError> {
    let col = column(batch, name)?;
    match col.data_type() {
        DataType::Utf8 => Ok(col
            .as_string::<i32>()
            .iter()
            .map(|v| v.unwrap_or_default().to_string())
            .collect()),
        DataType::LargeUtf8 => Ok(col
            .as_string::<i64>()
            .iter()
            .map(|v| v.unwrap_or_default().to_string())
            .collect()),
        _ => Err(unsupported(name, col)),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    use super::*;
    use crate::data::model::FilterValue;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_csv_and_ignores_extra_columns() {
        let file = write_temp(
            ".csv",
            "ano,senioridade,contrato,tamanho_empresa,cargo,salario,moeda,usd,residencia_iso3,home_office\n\
             2023,Senior,CLT,M,Data Scientist,150000,USD,150000,USA,Remote\n\
             2022,Junior,CLT,S,Analyst,200000,BRL,40000.5,BRA,Hybrid\n",
        );

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].job_title, "Data Scientist");
        assert_eq!(ds.records[1].salary_usd, 40000.5);
        assert_eq!(ds.records[1].residence_iso3, "BRA");
        assert!(ds
            .distinct(FilterColumn::Year)
            .unwrap()
            .contains(&FilterValue::Integer(2022)));
    }

    #[test]
    fn csv_missing_column_is_an_error() {
        let file = write_temp(".csv", "ano,cargo,usd\n2023,Analyst,10\n");
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("CSV line 2"));
    }

    #[test]
    fn csv_error_names_file_line_of_bad_row() {
        let file = write_temp(
            ".csv",
            "ano,senioridade,contrato,tamanho_empresa,cargo,home_office,residencia_iso3,usd\n\
             2023,Senior,CLT,M,Analyst,Remote,USA,100\n\
             2023,Senior,CLT,M,Analyst,Remote,USA,lots\n",
        );
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("CSV line 3"));
    }

    #[test]
    fn nan_salary_is_rejected() {
        let file = write_temp(
            ".csv",
            "ano,senioridade,contrato,tamanho_empresa,cargo,home_office,residencia_iso3,usd\n\
             2023,Senior,CLT,M,Analyst,Remote,USA,100\n\
             2023,Senior,CLT,M,Analyst,Remote,USA,NaN\n",
        );
        let err = load_file(file.path()).unwrap_err();
        let schema_err = err.downcast_ref::<SchemaError>().unwrap();
        assert!(matches!(schema_err, SchemaError::NonFiniteSalary { row: 1, .. }));
    }

    #[test]
    fn infinite_salary_fails_check() {
        let mut r = crate::data::model::tests::record(2023, "Senior", "A", "Remote", "USA", 1.0);
        assert!(check_salaries(std::slice::from_ref(&r)).is_ok());
        r.salary_usd = f64::INFINITY;
        assert!(check_salaries(&[r]).is_err());
    }

    #[test]
    fn loads_records_oriented_json() {
        let file = write_temp(
            ".json",
            r#"[{"ano": 2024, "senioridade": "Mid", "contrato": "PJ", "tamanho_empresa": "L",
                 "cargo": "Data Engineer", "home_office": "On-site", "residencia_iso3": "DEU",
                 "usd": 90000}]"#,
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].company_size, "L");
        assert_eq!(ds.records[0].salary_usd, 90000.0);
    }

    #[test]
    fn loads_parquet_with_integer_salary() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("ano", DataType::Int64, false),
            Field::new("senioridade", DataType::Utf8, false),
            Field::new("contrato", DataType::Utf8, false),
            Field::new("tamanho_empresa", DataType::Utf8, false),
            Field::new("cargo", DataType::Utf8, false),
            Field::new("home_office", DataType::Utf8, false),
            Field::new("residencia_iso3", DataType::Utf8, false),
            Field::new("usd", DataType::Int64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(vec![2023, 2024])),
                Arc::new(StringArray::from(vec!["Senior", "Junior"])),
                Arc::new(StringArray::from(vec!["CLT", "PJ"])),
                Arc::new(StringArray::from(vec!["M", "S"])),
                Arc::new(StringArray::from(vec!["Data Scientist", "Analyst"])),
                Arc::new(StringArray::from(vec!["Remote", "Hybrid"])),
                Arc::new(StringArray::from(vec!["USA", "BRA"])),
                Arc::new(Int64Array::from(vec![150_000, 40_000])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].salary_usd, 150_000.0);
        assert_eq!(ds.records[1].year, 2024);
    }

    #[test]
    fn batch_without_salary_column_reports_missing_column() {
        let schema = Arc::new(Schema::new(vec![Field::new("ano", DataType::Int64, false)]));
        let batch =
            RecordBatch::try_new(schema, vec![Arc::new(Int64Array::from(vec![2023]))]).unwrap();
        let err = records_from_batch(&batch).unwrap_err();
        assert!(matches!(err, SchemaError::MissingColumn("senioridade")));
    }

    #[test]
    fn float_year_column_is_accepted() {
        let schema = Arc::new(Schema::new(vec![Field::new("ano", DataType::Float64, false)]));
        let batch =
            RecordBatch::try_new(schema, vec![Arc::new(Float64Array::from(vec![2021.0]))]).unwrap();
        assert_eq!(int_column(&batch, "ano").unwrap(), vec![2021]);
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let file = write_temp(".xlsx", "");
        assert!(load_file(file.path()).is_err());
    }
}
