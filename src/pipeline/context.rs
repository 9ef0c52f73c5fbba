//! Immutable pipeline context built once at startup
//!
//! Holds the dataset, training set, trained model and evaluation. Nothing in
//! the context changes after `build` returns, so it can be shared behind an
//! `Arc` with any number of readers.

use std::time::{Duration, Instant};

use super::balance::{balance, TrainingSet, DEFAULT_SAMPLE_SIZE, DEFAULT_SEED};
use super::dataset::{ClassFrequency, Dataset};
use super::error::PipelineError;
use super::evaluate::{evaluate, Evaluation};
use super::svm::{train, LinearSvm, SvmConfig};

/// Startup pipeline settings
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Records drawn per class for the training set
    pub sample_size: usize,
    /// Seed for legitimate-record sampling
    pub seed: u64,
    pub svm: SvmConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            seed: DEFAULT_SEED,
            svm: SvmConfig::default(),
        }
    }
}

/// Stages run by `PipelineContext::build`, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Balance,
    Train,
    Evaluate,
}

impl Stage {
    pub fn title(self) -> &'static str {
        match self {
            Stage::Balance => "Class Balancing",
            Stage::Train => "SVM Training",
            Stage::Evaluate => "Evaluation",
        }
    }
}

/// Everything downstream consumers read
#[derive(Debug)]
pub struct PipelineContext {
    dataset: Dataset,
    training_set: TrainingSet,
    model: LinearSvm,
    evaluation: Evaluation,
    class_frequency: ClassFrequency,
}

impl PipelineContext {
    /// Balance, train and evaluate over a derived dataset
    pub fn build(dataset: Dataset, config: &PipelineConfig) -> Result<Self, PipelineError> {
        Self::build_observed(dataset, config, |_, _| {})
    }

    /// Same as `build`, reporting each completed stage and its duration
    pub fn build_observed<F>(
        dataset: Dataset,
        config: &PipelineConfig,
        mut observe: F,
    ) -> Result<Self, PipelineError>
    where
        F: FnMut(Stage, Duration),
    {
        let start = Instant::now();
        let training_set = balance(&dataset, config.sample_size, config.seed)?;
        observe(Stage::Balance, start.elapsed());

        let start = Instant::now();
        let model = train(&training_set, &config.svm)?;
        observe(Stage::Train, start.elapsed());

        let start = Instant::now();
        let evaluation = evaluate(&model, &dataset);
        observe(Stage::Evaluate, start.elapsed());

        let class_frequency = dataset.class_frequency();

        Ok(Self {
            dataset,
            training_set,
            model,
            evaluation,
            class_frequency,
        })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn training_set(&self) -> &TrainingSet {
        &self.training_set
    }

    pub fn model(&self) -> &LinearSvm {
        &self.model
    }

    pub fn evaluation(&self) -> &Evaluation {
        &self.evaluation
    }

    pub fn class_frequency(&self) -> ClassFrequency {
        self.class_frequency
    }
}
