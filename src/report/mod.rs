//! Report module - run summaries, feature controls and metrics export

pub mod controls;
pub mod metrics_export;
pub mod summary;

pub use controls::*;
pub use metrics_export::*;
pub use summary::*;
