//! Error types for the fraud classification pipeline.
//!
//! Startup-phase errors (`DataLoad`, `InsufficientData`, `Configuration`) abort
//! the run before any prediction is served. Request-phase errors
//! (`SchemaMismatch`, `ModelNotTrained`, `UnknownFeature`) are returned to the
//! caller and leave the shared pipeline state untouched.

use thiserror::Error;

use super::record::Label;

/// Errors that can occur while building or querying the pipeline.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PipelineError {
    /// The transaction source is missing, malformed, or violates the dataset invariants.
    #[error("Failed to load dataset: {0}")]
    DataLoad(String),

    /// Not enough records of one class to satisfy the requested sample size.
    #[error("Insufficient {class} records: need {required}, found {available}")]
    InsufficientData {
        /// Class that ran short
        class: Label,
        /// Records requested
        required: usize,
        /// Records present in the dataset
        available: usize,
    },

    /// The pipeline was configured in a way that cannot produce a model.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// An inference vector has the wrong number of components.
    #[error("Feature vector has {actual} components, expected {expected}")]
    SchemaMismatch {
        /// Components required by the trained model
        expected: usize,
        /// Components supplied by the caller
        actual: usize,
    },

    /// A prediction was requested before the pipeline finished training.
    #[error("Model has not been trained yet")]
    ModelNotTrained,

    /// A feature control was addressed by a name outside the schema.
    #[error("Unknown feature '{0}'")]
    UnknownFeature(String),

    /// A feature value is NaN or infinite
    #[error("Feature '{feature}' has non-finite value {value}")]
    NonFiniteFeature { feature: String, value: f64 },
}

impl PipelineError {
    /// Whether this error belongs to a single request rather than to startup.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            PipelineError::SchemaMismatch { .. }
                | PipelineError::ModelNotTrained
                | PipelineError::UnknownFeature(_)
                | PipelineError::NonFiniteFeature { .. }
        )
    }
}
