//! JSON export of evaluation metrics and the fitted hyperplane

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{
    ClassFrequency, ConfusionMatrix, CorrelationMatrix, Hyperplane, PipelineConfig,
    PipelineContext,
};

/// Metadata about the run
#[derive(Serialize)]
pub struct RunMetadata {
    /// Timestamp of the run (ISO 8601 format)
    pub timestamp: String,
    /// fraudsvm version
    pub fraudsvm_version: String,
    pub input_file: String,
    pub sample_size: usize,
    pub seed: u64,
    pub svm_c: f64,
    pub svm_tolerance: f64,
}

/// Composition of the balanced training set
#[derive(Serialize)]
pub struct TrainingComposition {
    pub fraud: usize,
    pub legit: usize,
}

/// Accuracy plus the confusion-matrix derived rates
#[derive(Serialize)]
pub struct MetricsSection {
    pub confusion_matrix: ConfusionMatrix,
    /// Percentage in [0, 100]
    pub accuracy: f64,
    pub precision: Option<f64>,
    pub recall: Option<f64>,
    pub specificity: Option<f64>,
    pub f1: Option<f64>,
}

/// Fitted model description
#[derive(Serialize)]
pub struct ModelSection {
    pub hyperplane: Hyperplane,
    pub support_vectors: usize,
    pub solver_iterations: usize,
    pub solver_converged: bool,
}

/// Complete metrics export
#[derive(Serialize)]
pub struct MetricsExport {
    pub metadata: RunMetadata,
    pub class_frequency: ClassFrequency,
    pub training_set: TrainingComposition,
    pub metrics: MetricsSection,
    pub model: ModelSection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation: Option<CorrelationMatrix>,
}

impl MetricsExport {
    pub fn from_context(
        context: &PipelineContext,
        config: &PipelineConfig,
        input_file: &str,
        correlation: Option<CorrelationMatrix>,
    ) -> Self {
        let eval = context.evaluation();
        let cm = eval.confusion;
        let model = context.model();

        Self {
            metadata: RunMetadata {
                timestamp: Utc::now().to_rfc3339(),
                fraudsvm_version: env!("CARGO_PKG_VERSION").to_string(),
                input_file: input_file.to_string(),
                sample_size: config.sample_size,
                seed: config.seed,
                svm_c: config.svm.c,
                svm_tolerance: config.svm.tolerance,
            },
            class_frequency: context.class_frequency(),
            training_set: TrainingComposition {
                fraud: context.training_set().fraud_count(),
                legit: context.training_set().legit_count(),
            },
            metrics: MetricsSection {
                confusion_matrix: cm,
                accuracy: eval.accuracy,
                precision: cm.precision(),
                recall: cm.recall(),
                specificity: cm.specificity(),
                f1: cm.f1(),
            },
            model: ModelSection {
                hyperplane: model.hyperplane(),
                support_vectors: model.support_vectors(),
                solver_iterations: model.iterations(),
                solver_converged: model.converged(),
            },
            correlation,
        }
    }
}

/// Write the export as pretty-printed JSON
pub fn export_metrics(export: &MetricsExport, output_path: &Path) -> Result<()> {
    let json =
        serde_json::to_string_pretty(export).context("Failed to serialize metrics to JSON")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write metrics to {}", output_path.display()))?;

    Ok(())
}
