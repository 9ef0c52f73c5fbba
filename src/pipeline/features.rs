//! Feature derivation: elapsed seconds to UTC hour-of-day

use chrono::{DateTime, Timelike, Utc};
use rayon::prelude::*;

use super::record::{DerivedRecord, TransactionRecord};

const SECONDS_PER_HOUR: i64 = 3600;
const HOURS_PER_DAY: i64 = 24;

/// Hour-of-day bucket for an elapsed-time offset.
///
/// The offset is read as UTC seconds since the Unix epoch, so the result is
/// `floor(offset / 3600) mod 24` and always lies in [0, 23]. Offsets beyond
/// the range chrono can represent fall back to the same modular arithmetic.
pub fn derive_hour(offset_seconds: i64) -> u8 {
    let hour = match DateTime::<Utc>::from_timestamp(offset_seconds, 0) {
        Some(dt) => dt.hour() as i64,
        None => offset_seconds
            .div_euclid(SECONDS_PER_HOUR)
            .rem_euclid(HOURS_PER_DAY),
    };
    hour as u8
}

/// Replace a record's elapsed time with its hour-of-day bucket
pub fn derive(record: &TransactionRecord) -> DerivedRecord {
    DerivedRecord {
        components: record.components,
        amount: record.amount,
        hour: derive_hour(record.elapsed_seconds),
        label: record.label,
    }
}

/// Derive every record, preserving input order
pub fn derive_all(records: &[TransactionRecord]) -> Vec<DerivedRecord> {
    records.par_iter().map(derive).collect()
}
