//! Model evaluation against the full dataset

use rayon::prelude::*;
use serde::Serialize;

use super::dataset::Dataset;
use super::record::Label;
use super::svm::LinearSvm;

/// 2x2 tally of actual vs predicted labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ConfusionMatrix {
    /// Actual legit, predicted legit (true negatives)
    pub legit_as_legit: usize,
    /// Actual legit, predicted fraud (false positives)
    pub legit_as_fraud: usize,
    /// Actual fraud, predicted legit (false negatives)
    pub fraud_as_legit: usize,
    /// Actual fraud, predicted fraud (true positives)
    pub fraud_as_fraud: usize,
}

impl ConfusionMatrix {
    pub fn record(&mut self, actual: Label, predicted: Label) {
        match (actual, predicted) {
            (Label::Legit, Label::Legit) => self.legit_as_legit += 1,
            (Label::Legit, Label::Fraud) => self.legit_as_fraud += 1,
            (Label::Fraud, Label::Legit) => self.fraud_as_legit += 1,
            (Label::Fraud, Label::Fraud) => self.fraud_as_fraud += 1,
        }
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            legit_as_legit: self.legit_as_legit + other.legit_as_legit,
            legit_as_fraud: self.legit_as_fraud + other.legit_as_fraud,
            fraud_as_legit: self.fraud_as_legit + other.fraud_as_legit,
            fraud_as_fraud: self.fraud_as_fraud + other.fraud_as_fraud,
        }
    }

    pub fn total(&self) -> usize {
        self.legit_as_legit + self.legit_as_fraud + self.fraud_as_legit + self.fraud_as_fraud
    }

    pub fn correct(&self) -> usize {
        self.legit_as_legit + self.fraud_as_fraud
    }

    /// Rows are actual (legit, fraud), columns are predicted (legit, fraud)
    pub fn as_rows(&self) -> [[usize; 2]; 2] {
        [
            [self.legit_as_legit, self.legit_as_fraud],
            [self.fraud_as_legit, self.fraud_as_fraud],
        ]
    }

    /// Percentage of correct predictions, 0.0 for an empty tally
    pub fn accuracy(&self) -> f64 {
        ratio(self.correct(), self.total()).map_or(0.0, |r| r * 100.0)
    }

    /// TP / (TP + FP)
    pub fn precision(&self) -> Option<f64> {
        ratio(self.fraud_as_fraud, self.fraud_as_fraud + self.legit_as_fraud)
    }

    /// TP / (TP + FN)
    pub fn recall(&self) -> Option<f64> {
        ratio(self.fraud_as_fraud, self.fraud_as_fraud + self.fraud_as_legit)
    }

    /// TN / (TN + FP)
    pub fn specificity(&self) -> Option<f64> {
        ratio(self.legit_as_legit, self.legit_as_legit + self.legit_as_fraud)
    }

    pub fn f1(&self) -> Option<f64> {
        let p = self.precision()?;
        let r = self.recall()?;
        if p + r == 0.0 {
            None
        } else {
            Some(2.0 * p * r / (p + r))
        }
    }
}

fn ratio(num: usize, den: usize) -> Option<f64> {
    if den == 0 {
        None
    } else {
        Some(num as f64 / den as f64)
    }
}

/// Confusion matrix and accuracy of a model over a dataset
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Evaluation {
    pub confusion: ConfusionMatrix,
    /// Accuracy as a percentage in [0, 100]
    pub accuracy: f64,
}

/// Score every record in the dataset and tally predicted vs actual labels
pub fn evaluate(model: &LinearSvm, dataset: &Dataset) -> Evaluation {
    let confusion = dataset
        .records()
        .par_iter()
        .fold(ConfusionMatrix::default, |mut cm, r| {
            cm.record(r.label, model.predict_label(&r.features()));
            cm
        })
        .reduce(ConfusionMatrix::default, ConfusionMatrix::merge);

    Evaluation {
        accuracy: confusion.accuracy(),
        confusion,
    }
}
