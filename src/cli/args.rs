//! Command-line argument definitions using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::pipeline::{PipelineConfig, SvmConfig, DEFAULT_SAMPLE_SIZE, DEFAULT_SEED};

/// fraudsvm - Classify card transactions as fraud or legit with a balanced linear SVM
#[derive(Parser, Debug)]
#[command(name = "fraudsvm")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Input file path (CSV or Parquet) with Time, V1..V28, Amount and Class columns
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub training: TrainingArgs,

    /// Write accuracy, confusion matrix and model coefficients to this JSON file
    #[arg(short, long)]
    pub export: Option<PathBuf>,

    /// Skip the correlation matrix computation
    #[arg(long, default_value = "false")]
    pub no_correlation: bool,

    /// Set one prediction form field, e.g. --set V14=-5.2 (repeatable).
    /// Unset fields keep their defaults (0, Amount 1, hour 12).
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    pub assignments: Vec<(String, f64)>,

    /// Predict the transaction described by the form after training
    #[arg(long, default_value = "false")]
    pub predict: bool,

    /// Predict a raw comma-separated vector in training order (V1..V28, Amount, hour)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub vector: Option<Vec<f64>>,

    /// Print the prediction result as JSON
    #[arg(long, default_value = "false")]
    pub json: bool,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan (very slow for large files).
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

/// Class balancing and SVM settings
#[derive(Args, Debug, Clone)]
pub struct TrainingArgs {
    /// Records drawn per class for the balanced training set
    #[arg(long, default_value_t = DEFAULT_SAMPLE_SIZE, value_parser = validate_sample_size)]
    pub sample_size: usize,

    /// Seed for sampling legitimate records and for the solver visiting order
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Soft-margin regularization strength (C)
    #[arg(long, default_value = "1.0", value_parser = validate_positive)]
    pub svm_c: f64,

    /// Solver stopping tolerance
    #[arg(long, default_value = "0.001", value_parser = validate_positive)]
    pub tolerance: f64,

    /// Maximum solver passes over the training set
    #[arg(long, default_value = "1000")]
    pub max_iter: usize,
}

impl TrainingArgs {
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            sample_size: self.sample_size,
            seed: self.seed,
            svm: SvmConfig {
                c: self.svm_c,
                tolerance: self.tolerance,
                max_iter: self.max_iter,
                seed: self.seed,
            },
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the prediction form (bounds, defaults and values) for an input file
    Controls {
        /// Input file path (CSV or Parquet)
        input: PathBuf,

        /// Set one form field, e.g. --set Amount=120 (repeatable)
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        assignments: Vec<(String, f64)>,

        /// Number of rows to use for schema inference (CSV only)
        #[arg(long, default_value = "10000")]
        infer_schema_length: usize,
    },
}

impl Cli {
    pub fn input(&self) -> Option<&PathBuf> {
        self.input.as_ref()
    }

    /// Whether a prediction was requested in any form
    pub fn wants_prediction(&self) -> bool {
        self.predict || self.vector.is_some()
    }
}

/// Parse a FIELD=VALUE form assignment
pub fn parse_assignment(s: &str) -> Result<(String, f64), String> {
    let (field, value) = s
        .split_once('=')
        .ok_or_else(|| format!("'{}' is not of the form FIELD=VALUE", s))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("'{}' has an empty field name", s));
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", value.trim()))?;
    Ok((field.to_string(), value))
}

/// Validator for sample_size parameter
fn validate_sample_size(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid count", s))?;
    if value == 0 {
        Err("sample_size must be at least 1".to_string())
    } else {
        Ok(value)
    }
}

/// Validator for strictly positive floats
fn validate_positive(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(format!("value must be positive, got {}", value))
    }
}
