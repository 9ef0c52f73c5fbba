//! Data-driven prediction form: per-feature bounds, defaults and current values
//!
//! Each feature is addressed by name through one generic `set` call instead of
//! a dedicated handler per field.

use serde::Serialize;

use super::dataset::Dataset;
use super::error::PipelineError;
use super::inference::InferenceRequest;
use super::schema::{feature_index, AMOUNT_INDEX, FEATURE_DIM, FEATURE_NAMES, HOUR_INDEX};

const CONTINUOUS_STEP: f64 = 0.1;
const HOUR_STEP: f64 = 1.0;
const AMOUNT_DEFAULT: f64 = 1.0;
const HOUR_DEFAULT: f64 = 12.0;

/// Bounds and default for a single feature
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureControl {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl FeatureControl {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// The full form: one control and one current value per feature
#[derive(Debug, Clone)]
pub struct FeatureControls {
    controls: Vec<FeatureControl>,
    values: Vec<f64>,
}

impl FeatureControls {
    /// Derive bounds from the dataset: floor of the minimum, ceiling of the maximum
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut mins = [f64::INFINITY; FEATURE_DIM];
        let mut maxs = [f64::NEG_INFINITY; FEATURE_DIM];
        for record in dataset {
            for (i, v) in record.features().into_iter().enumerate() {
                mins[i] = mins[i].min(v);
                maxs[i] = maxs[i].max(v);
            }
        }

        let controls: Vec<FeatureControl> = FEATURE_NAMES
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let (step, default) = match i {
                    HOUR_INDEX => (HOUR_STEP, HOUR_DEFAULT),
                    AMOUNT_INDEX => (CONTINUOUS_STEP, AMOUNT_DEFAULT),
                    _ => (CONTINUOUS_STEP, 0.0),
                };
                FeatureControl {
                    name,
                    min: mins[i].floor(),
                    max: maxs[i].ceil(),
                    step,
                    default,
                }
            })
            .collect();

        let values = controls.iter().map(|c| c.default).collect();
        Self { controls, values }
    }

    pub fn controls(&self) -> &[FeatureControl] {
        &self.controls
    }

    /// Set one field by name
    pub fn set(&mut self, field: &str, value: f64) -> Result<(), PipelineError> {
        let i = Self::index_of(field)?;
        self.values[i] = value;
        Ok(())
    }

    pub fn get(&self, field: &str) -> Result<f64, PipelineError> {
        Ok(self.values[Self::index_of(field)?])
    }

    /// Human-readable status line for one field
    pub fn describe(&self, field: &str) -> Result<String, PipelineError> {
        let value = self.get(field)?;
        Ok(format!("{} is set to {}", field, value))
    }

    /// Restore every field to its default
    pub fn reset(&mut self) {
        for (v, c) in self.values.iter_mut().zip(self.controls.iter()) {
            *v = c.default;
        }
    }

    /// Fields currently holding a value outside their bounds
    pub fn out_of_bounds(&self) -> Vec<&'static str> {
        self.controls
            .iter()
            .zip(self.values.iter())
            .filter(|(c, v)| !c.contains(**v))
            .map(|(c, _)| c.name)
            .collect()
    }

    /// Current values in training order
    pub fn vector(&self) -> Vec<f64> {
        self.values.clone()
    }

    pub fn request(&self) -> InferenceRequest {
        InferenceRequest::new(self.vector())
    }

    fn index_of(field: &str) -> Result<usize, PipelineError> {
        feature_index(field).ok_or_else(|| PipelineError::UnknownFeature(field.to_string()))
    }
}
