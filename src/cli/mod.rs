//! CLI module - argument parsing and the prediction form

mod args;
pub mod predict;

pub use args::*;
