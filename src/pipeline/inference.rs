//! Single-sample inference against the trained model
//!
//! `InferenceService` is the entry point for callers outside the startup
//! pipeline. It holds the pipeline context in a `OnceLock`, so the context is
//! installed exactly once and every prediction issued before that fails with
//! `ModelNotTrained`.

use std::sync::{Arc, OnceLock};

use serde::Serialize;

use super::context::PipelineContext;
use super::error::PipelineError;
use super::record::Label;
use super::schema::FEATURE_NAMES;
use super::svm::LinearSvm;

/// Binary outcome of a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Fraud,
    Legit,
}

impl Verdict {
    pub fn is_fraud(self) -> bool {
        self == Verdict::Fraud
    }
}

impl From<Label> for Verdict {
    fn from(label: Label) -> Self {
        match label {
            Label::Fraud => Verdict::Fraud,
            Label::Legit => Verdict::Legit,
        }
    }
}

/// A caller-supplied feature vector in training order (V1..V28, Amount, hour)
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceRequest {
    pub features: Vec<f64>,
}

impl InferenceRequest {
    pub fn new(features: Vec<f64>) -> Self {
        Self { features }
    }
}

/// Verdict plus the input echoed back as (name, value) pairs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InferenceResult {
    pub verdict: Verdict,
    pub echoed_features: Vec<(String, f64)>,
}

impl InferenceResult {
    /// One-line description suitable for display
    pub fn message(&self) -> String {
        let params = self
            .echoed_features
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join(", ");
        match self.verdict {
            Verdict::Fraud => format!(
                "The transaction with parameters [{}] is a fraudulent transaction",
                params
            ),
            Verdict::Legit => format!(
                "The transaction with parameters [{}] is not a fraudulent transaction",
                params
            ),
        }
    }
}

/// Classify one vector.
///
/// # Errors
/// * `SchemaMismatch` unless the vector has exactly as many components as the
///   model was trained on
/// * `NonFiniteFeature` for the first NaN or infinite component
pub fn predict(model: &LinearSvm, vector: &[f64]) -> Result<Verdict, PipelineError> {
    let expected = model.dimension();
    if vector.len() != expected {
        return Err(PipelineError::SchemaMismatch {
            expected,
            actual: vector.len(),
        });
    }
    if let Some((name, value)) = FEATURE_NAMES
        .iter()
        .zip(vector.iter())
        .find(|(_, v)| !v.is_finite())
    {
        return Err(PipelineError::NonFiniteFeature {
            feature: name.to_string(),
            value: *value,
        });
    }
    Ok(model.predict_label(vector).into())
}

/// Classify a request and echo its features
pub fn infer(
    model: &LinearSvm,
    request: &InferenceRequest,
) -> Result<InferenceResult, PipelineError> {
    let verdict = predict(model, &request.features)?;
    let echoed_features = FEATURE_NAMES
        .iter()
        .zip(request.features.iter())
        .map(|(name, value)| (name.to_string(), *value))
        .collect();
    Ok(InferenceResult {
        verdict,
        echoed_features,
    })
}

/// Thread-safe prediction front end over a once-installed pipeline context
#[derive(Debug, Default)]
pub struct InferenceService {
    context: OnceLock<Arc<PipelineContext>>,
}

impl InferenceService {
    /// A service with no model yet; predictions fail until `install` is called
    pub fn new() -> Self {
        Self::default()
    }

    /// A service that is ready immediately
    pub fn ready(context: Arc<PipelineContext>) -> Self {
        let service = Self::new();
        let _ = service.context.set(context);
        service
    }

    /// Install the pipeline context. Only the first call succeeds.
    pub fn install(&self, context: Arc<PipelineContext>) -> Result<(), PipelineError> {
        self.context.set(context).map_err(|_| {
            PipelineError::Configuration("pipeline context is already installed".to_string())
        })
    }

    pub fn is_ready(&self) -> bool {
        self.context.get().is_some()
    }

    pub fn context(&self) -> Result<&Arc<PipelineContext>, PipelineError> {
        self.context.get().ok_or(PipelineError::ModelNotTrained)
    }

    pub fn predict(&self, vector: &[f64]) -> Result<Verdict, PipelineError> {
        predict(self.context()?.model(), vector)
    }

    pub fn infer(&self, request: &InferenceRequest) -> Result<InferenceResult, PipelineError> {
        infer(self.context()?.model(), request)
    }
}
