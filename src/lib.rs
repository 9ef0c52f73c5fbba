//! fraudsvm: Credit Card Fraud Classification Library
//!
//! A library for classifying card transactions as fraudulent or legitimate
//! using hour-of-day feature derivation, class balancing, a soft-margin linear
//! SVM and confusion-matrix evaluation.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
