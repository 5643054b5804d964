//! # Batch Run State
//!
//! The triple `(in_progress, currently_analyzing, already_analyzed)` is
//! the only mutable shared state in this subsystem. Every go/no-go read
//! and every write happens inside one mutex; check-then-act races are the
//! bug class this layout exists to prevent.

use shared_types::RequirementKey;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Mutable state of the batch coordinator, guarded by one mutex.
#[derive(Debug, Default)]
pub struct BatchState {
    /// Whether a run currently owns the coordinator.
    pub in_progress: bool,

    /// Keys in flight within the current run. Cleared when the run ends.
    pub currently_analyzing: HashSet<RequirementKey>,

    /// Durable "seen" memo: keys analyzed in any run over this
    /// coordinator's lifetime. Survives run completion; cleared only by
    /// an explicit external reset.
    pub already_analyzed: HashSet<RequirementKey>,
}

/// Lock helper that recovers the guard from a poisoned mutex.
///
/// The state stays consistent under poisoning: `RunGuard` resets the run
/// fields, and the membership sets are valid at every step.
pub fn lock_state(state: &Mutex<BatchState>) -> MutexGuard<'_, BatchState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Releases batch ownership when dropped.
///
/// Clears `in_progress` and `currently_analyzing` (never
/// `already_analyzed`) however the run exits: completion, early error, or
/// panic. The coordinator can therefore never be left permanently stuck
/// in progress.
pub struct RunGuard {
    state: Arc<Mutex<BatchState>>,
}

impl RunGuard {
    /// Take over an already-claimed run; `in_progress` must be true.
    #[must_use]
    pub fn new(state: Arc<Mutex<BatchState>>) -> Self {
        debug_assert!(lock_state(&state).in_progress);
        Self { state }
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        let mut state = lock_state(&self.state);
        state.in_progress = false;
        state.currently_analyzing.clear();
        debug!(
            analyzed_total = state.already_analyzed.len(),
            "batch run ownership released"
        );
    }
}
