use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

#[derive(Serialize)]
struct Row {
    ano: i64,
    senioridade: &'static str,
    contrato: &'static str,
    tamanho_empresa: &'static str,
    cargo: &'static str,
    home_office: &'static str,
    residencia_iso3: &'static str,
    usd: f64,
}

const YEARS: [i64; 5] = [2020, 2021, 2022, 2023, 2024];
const SENIORITIES: [(&str, f64); 4] = [
    ("Junior", 0.55),
    ("Mid", 0.8),
    ("Senior", 1.0),
    ("Executive", 1.35),
];
const CONTRACTS: [&str; 4] = ["Full-time", "Part-time", "Contract", "Freelance"];
const COMPANY_SIZES: [&str; 3] = ["S", "M", "L"];
const JOBS: [(&str, f64); 8] = [
    ("Data Scientist", 145_000.0),
    ("Data Engineer", 140_000.0),
    ("Data Analyst", 100_000.0),
    ("Machine Learning Engineer", 160_000.0),
    ("Analytics Engineer", 150_000.0),
    ("Research Scientist", 170_000.0),
    ("BI Developer", 95_000.0),
    ("Data Architect", 165_000.0),
];
const REMOTE_MODES: [&str; 3] = ["Remote", "Hybrid", "On-site"];
const COUNTRIES: [(&str, f64); 8] = [
    ("USA", 1.0),
    ("CAN", 0.85),
    ("GBR", 0.75),
    ("DEU", 0.7),
    ("ESP", 0.5),
    ("BRA", 0.35),
    ("IND", 0.25),
    ("AUS", 0.8),
];

fn generate(rng: &mut SimpleRng, n: usize) -> Vec<Row> {
    (0..n)
        .map(|_| {
            let ano = *rng.pick(&YEARS);
            let (senioridade, level) = *rng.pick(&SENIORITIES);
            let (cargo, base) = *rng.pick(&JOBS);
            let (residencia_iso3, cost) = *rng.pick(&COUNTRIES);
            let growth = 1.0 + 0.04 * (ano - YEARS[0]) as f64;
            let usd = rng
                .gauss(base * level * cost * growth, 0.15 * base)
                .max(5_000.0)
                .round();

            Row {
                ano,
                senioridade,
                contrato: *rng.pick(&CONTRACTS),
                tamanho_empresa: *rng.pick(&COMPANY_SIZES),
                cargo,
                home_office: *rng.pick(&REMOTE_MODES),
                residencia_iso3,
                usd,
            }
        })
        .collect()
}

fn write_csv(path: &Path, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[Row]) -> Result<()> {
    fn strings(rows: &[Row], f: impl Fn(&Row) -> &'static str) -> Arc<StringArray> {
        Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    }

    let schema = Arc::new(Schema::new(vec![
        Field::new("ano", DataType::Int64, false),
        Field::new("senioridade", DataType::Utf8, false),
        Field::new("contrato", DataType::Utf8, false),
        Field::new("tamanho_empresa", DataType::Utf8, false),
        Field::new("cargo", DataType::Utf8, false),
        Field::new("home_office", DataType::Utf8, false),
        Field::new("residencia_iso3", DataType::Utf8, false),
        Field::new("usd", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(rows.iter().map(|r| r.ano).collect::<Vec<_>>())),
            strings(rows, |r| r.senioridade),
            strings(rows, |r| r.contrato),
            strings(rows, |r| r.tamanho_empresa),
            strings(rows, |r| r.cargo),
            strings(rows, |r| r.home_office),
            strings(rows, |r| r.residencia_iso3),
            Arc::new(Float64Array::from(rows.iter().map(|r| r.usd).collect::<Vec<_>>())),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "dados-final.csv".to_string());
    let output_path = Path::new(&output);

    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng, 2_000);

    match output_path.extension().and_then(|e| e.to_str()) {
        Some("parquet") | Some("pq") => write_parquet(output_path, &rows)?,
        _ => write_csv(output_path, &rows)?,
    }

    println!("Wrote {} salary records to {}", rows.len(), output_path.display());
    Ok(())
}
