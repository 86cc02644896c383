//! Benchmark setup error type.
//!
//! Aggregates the errors that may arise while preparing benchmark inputs so
//! setup functions can propagate failures with `?`.

use crate::source::SyntheticError;
use cotrack_core::CotrackError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic corpus generation failed.
    #[error("synthetic corpus generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// Pipeline configuration or a pipeline stage failed.
    #[error("pipeline stage failed: {0}")]
    Core(#[from] CotrackError),
}
