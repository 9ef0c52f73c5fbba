//! Dataset loader for CSV and Parquet transaction sources

use std::path::Path;

use polars::prelude::*;

use super::dataset::Dataset;
use super::error::PipelineError;
use super::record::{Label, TransactionRecord};
use super::schema::{
    AMOUNT_COLUMN, CLASS_COLUMN, FEATURE_NAMES, N_COMPONENTS, TIME_COLUMN, TIME_COLUMN_ALIAS,
};

/// Shape and size of a loaded source
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadStats {
    pub rows: usize,
    pub columns: usize,
    pub memory_mb: f64,
}

fn load_error(context: impl std::fmt::Display, err: impl std::fmt::Display) -> PipelineError {
    PipelineError::DataLoad(format!("{}: {}", context, err))
}

/// Open a source lazily (CSV or Parquet based on extension)
fn scan(path: &Path, infer_schema_length: usize) -> Result<LazyFrame, PipelineError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    // 0 means full table scan
    let schema_length = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    match extension.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(schema_length)
            .finish()
            .map_err(|e| load_error(format!("Failed to load CSV file {}", path.display()), e)),
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .map_err(|e| load_error(format!("Failed to load Parquet file {}", path.display()), e)),
        _ => Err(PipelineError::DataLoad(format!(
            "Unsupported file format: '{}'. Supported formats: csv, parquet",
            extension
        ))),
    }
}

/// Read only the column names of a source
pub fn get_column_names(path: &Path) -> Result<Vec<String>, PipelineError> {
    if !path.exists() {
        return Err(PipelineError::DataLoad(format!(
            "File not found: {}",
            path.display()
        )));
    }
    let schema = scan(path, 100)?
        .collect_schema()
        .map_err(|e| load_error("Failed to read schema", e))?;
    Ok(schema.iter_names().map(|name| name.to_string()).collect())
}

/// Materialize a source into a DataFrame
pub fn load_frame(path: &Path, infer_schema_length: usize) -> Result<DataFrame, PipelineError> {
    if !path.exists() {
        return Err(PipelineError::DataLoad(format!(
            "File not found: {}",
            path.display()
        )));
    }
    scan(path, infer_schema_length)?
        .collect()
        .map_err(|e| load_error(format!("Failed to read {}", path.display()), e))
}

/// Extract a column as non-null f64 values
fn float_column(df: &DataFrame, name: &str) -> Result<Vec<f64>, PipelineError> {
    let column = df
        .column(name)
        .map_err(|_| PipelineError::DataLoad(format!("Missing required column '{}'", name)))?;
    let cast = column
        .cast(&DataType::Float64)
        .map_err(|e| load_error(format!("Column '{}' is not numeric", name), e))?;
    let ca = cast
        .f64()
        .map_err(|e| load_error(format!("Column '{}' is not numeric", name), e))?;

    ca.into_iter()
        .enumerate()
        .map(|(row, value)| match value {
            Some(v) if v.is_finite() => Ok(v),
            Some(v) => Err(PipelineError::DataLoad(format!(
                "Column '{}' has non-finite value {} at row {}",
                name, v, row
            ))),
            None => Err(PipelineError::DataLoad(format!(
                "Column '{}' has a missing or non-numeric value at row {}",
                name, row
            ))),
        })
        .collect()
}

fn time_column_name(df: &DataFrame) -> Result<&'static str, PipelineError> {
    let names = df.get_column_names();
    [TIME_COLUMN, TIME_COLUMN_ALIAS]
        .into_iter()
        .find(|c| names.iter().any(|n| n.as_str() == *c))
        .ok_or_else(|| {
            PipelineError::DataLoad(format!(
                "Missing required column '{}' (or '{}')",
                TIME_COLUMN, TIME_COLUMN_ALIAS
            ))
        })
}

/// Convert a DataFrame with the transaction schema into records
pub fn transactions_from_frame(df: &DataFrame) -> Result<Vec<TransactionRecord>, PipelineError> {
    let time = float_column(df, time_column_name(df)?)?;

    let components: Vec<Vec<f64>> = FEATURE_NAMES[..N_COMPONENTS]
        .iter()
        .map(|name| float_column(df, name))
        .collect::<Result<_, _>>()?;

    let amount = float_column(df, AMOUNT_COLUMN)?;
    let class = float_column(df, CLASS_COLUMN)?;

    (0..df.height())
        .map(|row| {
            let label = Label::from_value(class[row]).ok_or_else(|| {
                PipelineError::DataLoad(format!(
                    "Column '{}' must be 0 or 1, found {} at row {}",
                    CLASS_COLUMN, class[row], row
                ))
            })?;

            if amount[row] < 0.0 {
                return Err(PipelineError::DataLoad(format!(
                    "Column '{}' has negative value {} at row {}",
                    AMOUNT_COLUMN, amount[row], row
                )));
            }

            let mut values = [0.0; N_COMPONENTS];
            for (slot, column) in values.iter_mut().zip(components.iter()) {
                *slot = column[row];
            }

            Ok(TransactionRecord {
                elapsed_seconds: time[row].floor() as i64,
                components: values,
                amount: amount[row],
                label,
            })
        })
        .collect()
}

/// Load raw transaction records from a CSV or Parquet file
pub fn load_transactions(
    path: &Path,
    infer_schema_length: usize,
) -> Result<Vec<TransactionRecord>, PipelineError> {
    let df = load_frame(path, infer_schema_length)?;
    transactions_from_frame(&df)
}

/// Load, derive and validate a dataset, returning source statistics alongside
pub fn load_dataset_with_stats(
    path: &Path,
    infer_schema_length: usize,
) -> Result<(Dataset, LoadStats), PipelineError> {
    let df = load_frame(path, infer_schema_length)?;
    let (rows, columns) = df.shape();
    let memory_mb = df.estimated_size() as f64 / (1024.0 * 1024.0);

    let records = transactions_from_frame(&df)?;
    let dataset = Dataset::from_transactions(&records)?;
    dataset.require_both_classes()?;

    Ok((
        dataset,
        LoadStats {
            rows,
            columns,
            memory_mb,
        },
    ))
}

/// Load, derive and validate a dataset. The result is non-empty and holds both classes.
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<Dataset, PipelineError> {
    load_dataset_with_stats(path, infer_schema_length).map(|(dataset, _)| dataset)
}
