//! Column and feature schema for the transaction source

/// Number of anonymized numeric components (V1..V28)
pub const N_COMPONENTS: usize = 28;

/// Model feature dimensionality: components + amount + hour bucket
pub const FEATURE_DIM: usize = N_COMPONENTS + 2;

/// Elapsed-time column name in the source
pub const TIME_COLUMN: &str = "Time";

/// Alternate elapsed-time column name accepted by the loader
pub const TIME_COLUMN_ALIAS: &str = "elapsed_seconds";

pub const AMOUNT_COLUMN: &str = "Amount";

pub const CLASS_COLUMN: &str = "Class";

/// Derived hour-of-day column name
pub const HOUR_COLUMN: &str = "hour";

/// Feature names in training order. Inference vectors must follow this order.
pub const FEATURE_NAMES: [&str; FEATURE_DIM] = [
    "V1", "V2", "V3", "V4", "V5", "V6", "V7", "V8", "V9", "V10", "V11", "V12", "V13", "V14",
    "V15", "V16", "V17", "V18", "V19", "V20", "V21", "V22", "V23", "V24", "V25", "V26", "V27",
    "V28", AMOUNT_COLUMN, HOUR_COLUMN,
];

/// Index of the amount feature within a feature vector
pub const AMOUNT_INDEX: usize = N_COMPONENTS;

/// Index of the hour feature within a feature vector
pub const HOUR_INDEX: usize = N_COMPONENTS + 1;

/// Position of a feature name in the training order
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_NAMES.iter().position(|f| *f == name)
}
