//! Transaction records and their binary label

use std::fmt;

use serde::{Deserialize, Serialize};

use super::schema::{FEATURE_DIM, N_COMPONENTS};

/// Tolerance for floating point comparison when checking binary 0/1 labels
const TOLERANCE: f64 = 1e-9;

/// The two transaction classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Legit,
    Fraud,
}

impl Label {
    /// Map a raw 0/1 class value to a label, rejecting anything else
    pub fn from_value(value: f64) -> Option<Self> {
        if value.abs() < TOLERANCE {
            Some(Label::Legit)
        } else if (value - 1.0).abs() < TOLERANCE {
            Some(Label::Fraud)
        } else {
            None
        }
    }

    pub fn is_fraud(self) -> bool {
        self == Label::Fraud
    }

    /// Signed class used by the SVM: +1 for fraud, -1 for legit
    pub fn sign(self) -> f64 {
        match self {
            Label::Fraud => 1.0,
            Label::Legit => -1.0,
        }
    }

    /// The 0/1 encoding used by the source
    pub fn as_value(self) -> f64 {
        match self {
            Label::Fraud => 1.0,
            Label::Legit => 0.0,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Legit => write!(f, "legit"),
            Label::Fraud => write!(f, "fraud"),
        }
    }
}

/// A transaction as read from the source, before feature derivation
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    /// Seconds elapsed since the first transaction in the source
    pub elapsed_seconds: i64,
    /// Anonymized components V1..V28
    pub components: [f64; N_COMPONENTS],
    pub amount: f64,
    pub label: Label,
}

/// A transaction with its elapsed time replaced by an hour-of-day bucket
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedRecord {
    pub components: [f64; N_COMPONENTS],
    pub amount: f64,
    /// Hour of day in [0, 23]
    pub hour: u8,
    pub label: Label,
}

impl DerivedRecord {
    /// Feature vector in training order: V1..V28, Amount, hour
    pub fn features(&self) -> [f64; FEATURE_DIM] {
        let mut out = [0.0; FEATURE_DIM];
        out[..N_COMPONENTS].copy_from_slice(&self.components);
        out[N_COMPONENTS] = self.amount;
        out[N_COMPONENTS + 1] = f64::from(self.hour);
        out
    }
}
