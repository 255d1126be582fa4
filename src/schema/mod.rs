//! Schema module - Configuration and result types for seed breeding runs.

mod config;
mod evolution;

pub use config::*;
pub use evolution::*;
