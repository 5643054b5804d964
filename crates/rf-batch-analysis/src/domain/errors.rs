//! Batch analysis error types.

use shared_bus::MediatorError;
use thiserror::Error;

/// Failure reported by the analysis backend for a single item.
///
/// Per-item failures are logged and the item is marked done; they never
/// abort the surrounding run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// The backend could not be reached.
    #[error("analysis backend unavailable: {0}")]
    Unavailable(String),

    /// The backend rejected this requirement.
    #[error("analysis rejected for {key}: {reason}")]
    Rejected {
        /// Key of the rejected requirement.
        key: String,
        /// Backend-supplied reason.
        reason: String,
    },
}

/// Failure of a batch request as a whole.
///
/// Distinct from per-item failures: these indicate wiring bugs and are
/// surfaced to the caller instead of being swallowed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BatchError {
    /// The coordinator's mediator is not registered.
    #[error(transparent)]
    Mediator(#[from] MediatorError),
}
