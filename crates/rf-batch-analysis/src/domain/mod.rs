//! Domain layer: run state, the run-completion guard, errors, and the
//! duration estimator.

pub mod errors;
pub mod estimator;
pub mod state;

pub use errors::{AnalysisError, BatchError};
pub use estimator::DurationEstimator;
pub use state::{BatchState, RunGuard};
