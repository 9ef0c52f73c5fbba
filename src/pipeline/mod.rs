//! Pipeline module - load, derive, balance, train, evaluate and predict

pub mod balance;
pub mod context;
pub mod controls;
pub mod correlation;
pub mod dataset;
pub mod error;
pub mod evaluate;
pub mod features;
pub mod inference;
pub mod loader;
pub mod record;
pub mod schema;
pub mod svm;

pub use balance::*;
pub use context::*;
pub use controls::*;
pub use correlation::*;
pub use dataset::*;
pub use error::*;
pub use evaluate::*;
pub use features::*;
pub use inference::*;
pub use loader::*;
pub use record::*;
pub use schema::*;
pub use svm::{train, Hyperplane, LinearSvm, StandardScaler, SvmConfig};
