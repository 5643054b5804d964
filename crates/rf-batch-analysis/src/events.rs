//! # Batch Analysis Events
//!
//! Advisory notifications broadcast while a run proceeds. UI feedback
//! only; not part of the correctness contract.

use serde::{Deserialize, Serialize};

/// A batch run claimed ownership and is about to process its first item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchAnalysisStarted {
    /// Number of items that survived filtering.
    pub total: usize,
}

/// Published before each item is sent to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchAnalysisProgress {
    /// Items finished so far in this run.
    pub completed: usize,
    /// Total items in this run.
    pub total: usize,
    /// Projected remaining time, rounded up to whole minutes.
    pub eta_minutes: u64,
}

/// The run finished; ownership has been released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchAnalysisCompleted {
    /// Items the backend analyzed successfully.
    pub processed: usize,
    /// Items whose analysis call failed (still marked done for this
    /// coordinator's lifetime).
    pub failed: usize,
}
