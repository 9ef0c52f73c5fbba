//! The derived dataset shared by every pipeline stage

use serde::Serialize;

use super::error::PipelineError;
use super::features::derive_all;
use super::record::{DerivedRecord, Label, TransactionRecord};

/// Record counts per class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ClassFrequency {
    pub legit: usize,
    pub fraud: usize,
}

impl ClassFrequency {
    pub fn total(&self) -> usize {
        self.legit + self.fraud
    }

    /// Fraction of records labelled fraud, 0.0 for an empty tally
    pub fn fraud_ratio(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.fraud as f64 / self.total() as f64
        }
    }

    pub fn count(&self, label: Label) -> usize {
        match label {
            Label::Legit => self.legit,
            Label::Fraud => self.fraud,
        }
    }
}

/// Ordered, immutable collection of derived records. Never empty.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<DerivedRecord>,
}

impl Dataset {
    /// Wrap derived records, rejecting an empty collection
    pub fn new(records: Vec<DerivedRecord>) -> Result<Self, PipelineError> {
        if records.is_empty() {
            return Err(PipelineError::DataLoad(
                "dataset contains no records".to_string(),
            ));
        }
        Ok(Self { records })
    }

    /// Run feature derivation over raw transactions and wrap the result
    pub fn from_transactions(records: &[TransactionRecord]) -> Result<Self, PipelineError> {
        Self::new(derive_all(records))
    }

    /// Fail unless both classes are present
    pub fn require_both_classes(&self) -> Result<(), PipelineError> {
        let freq = self.class_frequency();
        for label in [Label::Legit, Label::Fraud] {
            if freq.count(label) == 0 {
                return Err(PipelineError::DataLoad(format!(
                    "dataset contains no {} records",
                    label
                )));
            }
        }
        Ok(())
    }

    pub fn records(&self) -> &[DerivedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DerivedRecord> {
        self.records.iter()
    }

    /// Records of one class in dataset order
    pub fn with_label(&self, label: Label) -> impl Iterator<Item = &DerivedRecord> {
        self.records.iter().filter(move |r| r.label == label)
    }

    pub fn class_frequency(&self) -> ClassFrequency {
        self.records
            .iter()
            .fold(ClassFrequency::default(), |mut acc, r| {
                match r.label {
                    Label::Legit => acc.legit += 1,
                    Label::Fraud => acc.fraud += 1,
                }
                acc
            })
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a DerivedRecord;
    type IntoIter = std::slice::Iter<'a, DerivedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
