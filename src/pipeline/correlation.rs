//! Pearson correlation matrix over the derived dataset

use faer::Mat;
use rayon::prelude::*;
use serde::Serialize;

use super::dataset::Dataset;
use super::schema::{CLASS_COLUMN, FEATURE_NAMES, HOUR_INDEX};

/// Symmetric correlation matrix with its column labels
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i][j])
    }

    /// Correlations of every other column with `column`, strongest first
    pub fn ranked_against(&self, column: &str) -> Vec<(String, f64)> {
        let Some(i) = self.columns.iter().position(|c| c == column) else {
            return Vec::new();
        };

        let mut ranked: Vec<(String, f64)> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(j, name)| (name.clone(), self.values[i][j]))
            .collect();
        ranked.sort_by(|a, b| {
            b.1.abs()
                .partial_cmp(&a.1.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked
    }
}

/// Column names in the derived frame order: V1..V28, Amount, Class, hour
fn derived_columns() -> Vec<&'static str> {
    let mut cols: Vec<&'static str> = FEATURE_NAMES[..HOUR_INDEX].to_vec();
    cols.push(CLASS_COLUMN);
    cols.push(FEATURE_NAMES[HOUR_INDEX]);
    cols
}

fn column_values(dataset: &Dataset, column: usize) -> Vec<f64> {
    // Class sits between Amount and hour in the derived frame
    dataset
        .iter()
        .map(|r| match column {
            c if c < HOUR_INDEX => r.features()[c],
            c if c == HOUR_INDEX => r.label.as_value(),
            _ => f64::from(r.hour),
        })
        .collect()
}

/// Compute the correlation matrix using a single matrix product.
///
/// 1. Standardize each column: Z = (X - mean) / (std * sqrt(n))
/// 2. R = Zᵀ Z
///
/// Constant columns have no defined correlation and are left out.
/// Returns None when fewer than two columns vary.
pub fn correlation_matrix(dataset: &Dataset) -> Option<CorrelationMatrix> {
    let names = derived_columns();
    let n_rows = dataset.len();
    if n_rows == 0 {
        return None;
    }
    let n = n_rows as f64;

    let standardized: Vec<Option<Vec<f64>>> = (0..names.len())
        .into_par_iter()
        .map(|c| {
            let values = column_values(dataset, c);
            let mean = values.iter().sum::<f64>() / n;
            let var = values.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / n;
            let std = var.sqrt();
            if std == 0.0 || !std.is_finite() {
                return None;
            }
            let denom = std * n.sqrt();
            Some(values.iter().map(|x| (x - mean) / denom).collect())
        })
        .collect();

    let valid: Vec<(&str, Vec<f64>)> = names
        .iter()
        .zip(standardized)
        .filter_map(|(name, col)| col.map(|c| (*name, c)))
        .collect();

    if valid.len() < 2 {
        return None;
    }

    let mut z = Mat::<f64>::zeros(n_rows, valid.len());
    for (col_idx, (_, col)) in valid.iter().enumerate() {
        for (row_idx, &v) in col.iter().enumerate() {
            z[(row_idx, col_idx)] = v;
        }
    }

    let corr = z.transpose() * &z;

    let k = valid.len();
    let values = (0..k)
        .map(|i| (0..k).map(|j| corr[(i, j)].clamp(-1.0, 1.0)).collect())
        .collect();

    Some(CorrelationMatrix {
        columns: valid.iter().map(|(name, _)| name.to_string()).collect(),
        values,
    })
}
