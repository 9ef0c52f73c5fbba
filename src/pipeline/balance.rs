//! Class balancing: build a training subset that offsets the fraud/legit skew

use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;

use super::dataset::Dataset;
use super::error::PipelineError;
use super::record::{DerivedRecord, Label};

/// Default number of records drawn per class
pub const DEFAULT_SAMPLE_SIZE: usize = 300;

/// Default seed for legitimate-record sampling
pub const DEFAULT_SEED: u64 = 42;

/// Balanced subset used only for fitting. Ordering carries no meaning.
#[derive(Debug, Clone)]
pub struct TrainingSet {
    records: Vec<DerivedRecord>,
    fraud: usize,
    legit: usize,
}

impl TrainingSet {
    pub fn records(&self) -> &[DerivedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn fraud_count(&self) -> usize {
        self.fraud
    }

    pub fn legit_count(&self) -> usize {
        self.legit
    }

    /// Whether both label classes are represented
    pub fn has_both_classes(&self) -> bool {
        self.fraud > 0 && self.legit > 0
    }
}

impl From<Vec<DerivedRecord>> for TrainingSet {
    fn from(records: Vec<DerivedRecord>) -> Self {
        let fraud = records.iter().filter(|r| r.label.is_fraud()).count();
        let legit = records.len() - fraud;
        Self {
            records,
            fraud,
            legit,
        }
    }
}

/// Build a balanced training set.
///
/// Takes every fraud record (only the first `sample_size` in dataset order if
/// there are more) and `sample_size` legitimate records drawn uniformly
/// without replacement. The draw is fully determined by `seed`.
///
/// # Errors
/// * `Configuration` if `sample_size` is zero
/// * `InsufficientData` if fewer than `sample_size` legitimate records exist
pub fn balance(
    dataset: &Dataset,
    sample_size: usize,
    seed: u64,
) -> Result<TrainingSet, PipelineError> {
    if sample_size == 0 {
        return Err(PipelineError::Configuration(
            "sample size must be at least 1".to_string(),
        ));
    }

    let legit: Vec<&DerivedRecord> = dataset.with_label(Label::Legit).collect();
    if legit.len() < sample_size {
        return Err(PipelineError::InsufficientData {
            class: Label::Legit,
            required: sample_size,
            available: legit.len(),
        });
    }

    let mut records: Vec<DerivedRecord> = dataset
        .with_label(Label::Fraud)
        .take(sample_size)
        .cloned()
        .collect();
    let fraud = records.len();

    let mut rng = StdRng::seed_from_u64(seed);
    let picked = index::sample(&mut rng, legit.len(), sample_size);
    records.extend(picked.into_iter().map(|i| legit[i].clone()));

    Ok(TrainingSet {
        records,
        fraud,
        legit: sample_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::schema::N_COMPONENTS;

    fn dataset(legit: usize, fraud: usize) -> Dataset {
        let mut records = Vec::new();
        for i in 0..legit {
            records.push(DerivedRecord {
                components: [i as f64; N_COMPONENTS],
                amount: i as f64,
                hour: 0,
                label: Label::Legit,
            });
        }
        for i in 0..fraud {
            records.push(DerivedRecord {
                components: [-(i as f64) - 1.0; N_COMPONENTS],
                amount: 1000.0 + i as f64,
                hour: 3,
                label: Label::Fraud,
            });
        }
        Dataset::new(records).unwrap()
    }

    #[test]
    fn test_zero_sample_size_rejected() {
        let ds = dataset(5, 2);
        assert!(matches!(
            balance(&ds, 0, 1),
            Err(PipelineError::Configuration(_))
        ));
    }

    #[test]
    fn test_fraud_capped_to_first_encountered() {
        let ds = dataset(10, 6);
        let ts = balance(&ds, 4, 7).unwrap();

        assert_eq!(ts.fraud_count(), 4);
        assert_eq!(ts.legit_count(), 4);
        let amounts: Vec<f64> = ts
            .records()
            .iter()
            .filter(|r| r.label.is_fraud())
            .map(|r| r.amount)
            .collect();
        assert_eq!(amounts, vec![1000.0, 1001.0, 1002.0, 1003.0]);
    }

    #[test]
    fn test_legit_sample_has_no_duplicates() {
        let ds = dataset(50, 1);
        let ts = balance(&ds, 50, 3).unwrap();

        let mut amounts: Vec<i64> = ts
            .records()
            .iter()
            .filter(|r| !r.label.is_fraud())
            .map(|r| r.amount as i64)
            .collect();
        amounts.sort_unstable();
        amounts.dedup();
        assert_eq!(amounts.len(), 50);
    }

    #[test]
    fn test_training_set_from_records_counts_classes() {
        let ds = dataset(3, 2);
        let ts = TrainingSet::from(ds.records().to_vec());
        assert_eq!(ts.legit_count(), 3);
        assert_eq!(ts.fraud_count(), 2);
        assert!(ts.has_both_classes());
    }
}
