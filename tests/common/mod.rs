//! Shared test utilities and fixture generators

#![allow(dead_code)]

use fraudsvm::pipeline::{
    Dataset, DerivedRecord, Label, TransactionRecord, FEATURE_NAMES, N_COMPONENTS,
};
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// Generate a separable synthetic transaction set.
///
/// Legit rows have components uniform in [-1, 1]. Fraud rows are shifted
/// strongly along V4, V10, V12 and V14, which keeps the classes linearly
/// separable. Fraud rows are appended after the legit rows. Elapsed time is
/// drawn uniformly over two days so the hour carries no class signal.
pub fn synthetic_transactions(legit: usize, fraud: usize, seed: u64) -> Vec<TransactionRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut records = Vec::with_capacity(legit + fraud);

    for i in 0..(legit + fraud) {
        let label = if i < legit { Label::Legit } else { Label::Fraud };
        let elapsed_seconds: i64 = rng.gen_range(0..172_800);
        let mut components = [0.0; N_COMPONENTS];
        for c in components.iter_mut() {
            *c = rng.gen_range(-1.0..1.0);
        }
        let amount = if label.is_fraud() {
            components[3] += 4.0;
            components[9] -= 4.0;
            components[11] -= 5.0;
            components[13] -= 6.0;
            rng.gen_range(0.0..500.0)
        } else {
            rng.gen_range(0.0..200.0)
        };

        records.push(TransactionRecord {
            elapsed_seconds,
            components,
            amount,
            label,
        });
    }

    records
}

/// Synthetic transactions run through feature derivation
pub fn synthetic_dataset(legit: usize, fraud: usize, seed: u64) -> Dataset {
    Dataset::from_transactions(&synthetic_transactions(legit, fraud, seed)).unwrap()
}

/// A derived record with V1 and amount set and every other component zero
pub fn derived_record(label: Label, v1: f64, amount: f64, hour: u8) -> DerivedRecord {
    let mut components = [0.0; N_COMPONENTS];
    components[0] = v1;
    DerivedRecord {
        components,
        amount,
        hour,
        label,
    }
}

/// Dataset with the given number of legit and fraud records of fixed shape
pub fn small_dataset(legit: usize, fraud: usize) -> Dataset {
    let mut records = Vec::new();
    for i in 0..legit {
        records.push(derived_record(Label::Legit, -1.0 - i as f64, 10.0 + i as f64, 9));
    }
    for i in 0..fraud {
        records.push(derived_record(Label::Fraud, 1.0 + i as f64, 900.0 + i as f64, 2));
    }
    Dataset::new(records).unwrap()
}

/// Build a DataFrame with the source schema: Time, V1..V28, Amount, Class
pub fn transactions_frame(records: &[TransactionRecord]) -> DataFrame {
    let mut columns: Vec<Column> = Vec::with_capacity(N_COMPONENTS + 3);

    let time: Vec<i64> = records.iter().map(|r| r.elapsed_seconds).collect();
    columns.push(Column::new("Time".into(), time));

    for (i, name) in FEATURE_NAMES[..N_COMPONENTS].iter().enumerate() {
        let values: Vec<f64> = records.iter().map(|r| r.components[i]).collect();
        columns.push(Column::new((*name).into(), values));
    }

    let amount: Vec<f64> = records.iter().map(|r| r.amount).collect();
    columns.push(Column::new("Amount".into(), amount));

    let class: Vec<i32> = records
        .iter()
        .map(|r| if r.label.is_fraud() { 1 } else { 0 })
        .collect();
    columns.push(Column::new("Class".into(), class));

    DataFrame::new(columns).unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("transactions.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("transactions.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Write a synthetic source to a temporary CSV
pub fn synthetic_csv(legit: usize, fraud: usize, seed: u64) -> (TempDir, PathBuf) {
    let mut df = transactions_frame(&synthetic_transactions(legit, fraud, seed));
    create_temp_csv(&mut df)
}

/// Write raw CSV lines to a temporary file with the given name
pub fn write_csv_lines(file_name: &str, lines: &[String]) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(file_name);

    let mut file = std::fs::File::create(&path).unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }

    (temp_dir, path)
}

/// CSV header in source order, optionally renaming the time column
pub fn csv_header(time_column: &str) -> String {
    let mut cols = vec![time_column.to_string()];
    cols.extend(FEATURE_NAMES[..N_COMPONENTS].iter().map(|s| s.to_string()));
    cols.push("Amount".to_string());
    cols.push("Class".to_string());
    cols.join(",")
}

/// One CSV row with every component set to `component`
pub fn csv_row(time: &str, component: f64, amount: f64, class: &str) -> String {
    let mut cols = vec![time.to_string()];
    cols.extend(std::iter::repeat(component.to_string()).take(N_COMPONENTS));
    cols.push(amount.to_string());
    cols.push(class.to_string());
    cols.join(",")
}

/// A 30-component vector resembling a synthetic fraud record
pub fn fraud_like_vector() -> Vec<f64> {
    let mut v = vec![0.0; FEATURE_NAMES.len()];
    v[3] = 4.0;
    v[9] = -4.0;
    v[11] = -5.0;
    v[13] = -6.0;
    v[28] = 250.0;
    v[29] = 3.0;
    v
}

/// A 30-component vector resembling a synthetic legit record
pub fn legit_like_vector() -> Vec<f64> {
    let mut v = vec![0.0; FEATURE_NAMES.len()];
    v[28] = 100.0;
    v[29] = 12.0;
    v
}
