//! Soft-margin linear SVM trained on the balanced subset
//!
//! Features are standardized with statistics from the training set before the
//! dual coordinate descent solver runs. The scaler travels with the model so
//! callers always score raw feature vectors.

mod scaler;
mod solver;

use serde::Serialize;

use super::balance::TrainingSet;
use super::error::PipelineError;
use super::record::Label;
use super::schema::{FEATURE_DIM, FEATURE_NAMES};

pub use scaler::StandardScaler;

/// Configuration for SVM training
#[derive(Debug, Clone)]
pub struct SvmConfig {
    /// Soft-margin regularization strength
    pub c: f64,
    /// Stop when the projected-gradient spread falls below this value
    pub tolerance: f64,
    /// Maximum passes over the training set
    pub max_iter: usize,
    /// Seed for the coordinate visiting order
    pub seed: u64,
}

impl Default for SvmConfig {
    fn default() -> Self {
        Self {
            c: 1.0,
            tolerance: 1e-3,
            max_iter: 1000,
            seed: 0,
        }
    }
}

/// Fitted linear decision boundary. Immutable once trained.
#[derive(Debug, Clone)]
pub struct LinearSvm {
    weights: Vec<f64>,
    bias: f64,
    scaler: StandardScaler,
    iterations: usize,
    converged: bool,
    support_vectors: usize,
}

/// Hyperplane coefficients expressed on raw (unscaled) features
#[derive(Debug, Clone, Serialize)]
pub struct Hyperplane {
    pub weights: Vec<(String, f64)>,
    pub bias: f64,
}

impl LinearSvm {
    /// Number of features the model expects
    pub fn dimension(&self) -> usize {
        self.weights.len()
    }

    /// Signed distance-like score; positive means fraud.
    /// The caller guarantees `features.len() == self.dimension()`.
    pub fn decision_value(&self, features: &[f64]) -> f64 {
        let z = self.scaler.transform(features);
        z.iter()
            .zip(self.weights.iter())
            .map(|(x, w)| x * w)
            .sum::<f64>()
            + self.bias
    }

    pub fn predict_label(&self, features: &[f64]) -> Label {
        if self.decision_value(features) > 0.0 {
            Label::Fraud
        } else {
            Label::Legit
        }
    }

    /// Undo the standardization so the boundary reads in source units
    pub fn hyperplane(&self) -> Hyperplane {
        let mut bias = self.bias;
        let weights = FEATURE_NAMES
            .iter()
            .zip(self.weights.iter())
            .zip(self.scaler.means().iter().zip(self.scaler.scales().iter()))
            .map(|((name, &w), (&mean, &scale))| {
                let raw = w / scale;
                bias -= raw * mean;
                (name.to_string(), raw)
            })
            .collect();
        Hyperplane { weights, bias }
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn converged(&self) -> bool {
        self.converged
    }

    pub fn support_vectors(&self) -> usize {
        self.support_vectors
    }
}

/// Fit a soft-margin linear SVM over the training set.
///
/// # Errors
/// * `Configuration` if the training set holds fewer than two label classes
///   or the configuration is out of range
pub fn train(training_set: &TrainingSet, config: &SvmConfig) -> Result<LinearSvm, PipelineError> {
    if !training_set.has_both_classes() {
        return Err(PipelineError::Configuration(format!(
            "training set needs both classes, found {} legit and {} fraud",
            training_set.legit_count(),
            training_set.fraud_count()
        )));
    }
    if !(config.c > 0.0 && config.c.is_finite()) {
        return Err(PipelineError::Configuration(format!(
            "regularization strength must be positive, got {}",
            config.c
        )));
    }
    if config.max_iter == 0 {
        return Err(PipelineError::Configuration(
            "max_iter must be at least 1".to_string(),
        ));
    }

    let raw: Vec<[f64; FEATURE_DIM]> = training_set
        .records()
        .iter()
        .map(|r| r.features())
        .collect();
    let targets: Vec<f64> = training_set
        .records()
        .iter()
        .map(|r| r.label.sign())
        .collect();

    let scaler = StandardScaler::fit(&raw);
    let rows: Vec<Vec<f64>> = raw.iter().map(|x| scaler.transform(x)).collect();

    // Hitting max_iter is not an error; callers inspect `converged()`
    let solution = solver::solve_dual(&rows, &targets, config);

    Ok(LinearSvm {
        weights: solution.weights,
        bias: solution.bias,
        scaler,
        iterations: solution.iterations,
        converged: solution.converged,
        support_vectors: solution.support_vectors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::record::DerivedRecord;
    use crate::pipeline::schema::N_COMPONENTS;

    fn record(v1: f64, label: Label) -> DerivedRecord {
        let mut components = [0.0; N_COMPONENTS];
        components[0] = v1;
        DerivedRecord {
            components,
            amount: 10.0,
            hour: 12,
            label,
        }
    }

    fn separable_set() -> TrainingSet {
        TrainingSet::from(vec![
            record(-3.0, Label::Legit),
            record(-2.0, Label::Legit),
            record(-2.5, Label::Legit),
            record(2.0, Label::Fraud),
            record(3.0, Label::Fraud),
            record(2.5, Label::Fraud),
        ])
    }

    #[test]
    fn test_single_class_rejected() {
        let ts = TrainingSet::from(vec![record(1.0, Label::Legit), record(2.0, Label::Legit)]);
        let err = train(&ts, &SvmConfig::default()).unwrap_err();
        assert!(matches!(err, PipelineError::Configuration(_)));
    }

    #[test]
    fn test_invalid_c_rejected() {
        let config = SvmConfig {
            c: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            train(&separable_set(), &config),
            Err(PipelineError::Configuration(_))
        ));
    }

    #[test]
    fn test_fits_separable_data() {
        let model = train(&separable_set(), &SvmConfig::default()).unwrap();
        assert_eq!(model.dimension(), FEATURE_DIM);
        assert!(model.converged());

        for r in separable_set().records() {
            assert_eq!(model.predict_label(&r.features()), r.label);
        }
    }

    #[test]
    fn test_iteration_limit_reported_on_model() {
        let config = SvmConfig {
            max_iter: 1,
            tolerance: 1e-12,
            ..Default::default()
        };
        let model = train(&separable_set(), &config).unwrap();
        assert_eq!(model.iterations(), 1);
        assert!(!model.converged());
    }

    #[test]
    fn test_hyperplane_matches_scaled_decision() {
        let model = train(&separable_set(), &SvmConfig::default()).unwrap();
        let plane = model.hyperplane();
        assert_eq!(plane.weights.len(), FEATURE_DIM);
        assert_eq!(plane.weights[0].0, "V1");

        let x = record(0.7, Label::Legit).features();
        let raw: f64 = plane
            .weights
            .iter()
            .zip(x.iter())
            .map(|((_, w), v)| w * v)
            .sum::<f64>()
            + plane.bias;
        assert!((raw - model.decision_value(&x)).abs() < 1e-9);
    }
}
