//! # Batch Analysis Coordinator
//!
//! Owns the batch run state machine:
//!
//! ```text
//! Idle ──request──▶ Claiming ──already in progress──▶ Rejected (dropped)
//!                      │
//!                      ▼
//!                  Filtering ──nothing survives──▶ Idle
//!                      │
//!                      ▼
//!                  Processing (strictly sequential) ──▶ Idle
//! ```
//!
//! Claiming and filtering happen inside one critical section on the state
//! mutex; the processing loop holds no lock across the backend await and
//! releases ownership through a drop guard however it exits.

use crate::domain::errors::BatchError;
use crate::domain::estimator::DurationEstimator;
use crate::domain::state::{lock_state, BatchState, RunGuard};
use crate::events::{BatchAnalysisCompleted, BatchAnalysisProgress, BatchAnalysisStarted};
use crate::ports::outbound::{AnalysisService, OrderingSource};
use shared_bus::{DomainMediator, MediatorError};
use shared_types::{Requirement, RequirementKey};
use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// How a batch request ended.
///
/// `Rejected` and `NothingToDo` are normal outcomes, not errors; a
/// rejected request receives no started/progress/completed events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchRunOutcome {
    /// Another run was in progress; this request was dropped, not queued.
    Rejected,
    /// Filtering removed every candidate; no run took place.
    NothingToDo,
    /// The run processed its filtered set to the end.
    Completed {
        /// Items analyzed successfully.
        processed: usize,
        /// Items whose analysis call failed.
        failed: usize,
    },
}

/// Serializes analysis work over requirement sets.
///
/// One instance per session, injected wherever batch analysis can be
/// requested. All mutable state lives behind one mutex; the "at most one
/// concurrent batch" policy is a property of this object, not of a
/// process-wide flag.
pub struct BatchAnalysisCoordinator {
    mediator: Arc<DomainMediator>,
    analysis: Arc<dyn AnalysisService>,
    ordering: Arc<dyn OrderingSource>,
    state: Arc<Mutex<BatchState>>,
    estimator: Mutex<DurationEstimator>,
}

impl BatchAnalysisCoordinator {
    /// Create an idle coordinator.
    #[must_use]
    pub fn new(
        mediator: Arc<DomainMediator>,
        analysis: Arc<dyn AnalysisService>,
        ordering: Arc<dyn OrderingSource>,
    ) -> Self {
        Self {
            mediator,
            analysis,
            ordering,
            state: Arc::new(Mutex::new(BatchState::default())),
            estimator: Mutex::new(DurationEstimator::new()),
        }
    }

    /// Request a batch run over `candidates`.
    ///
    /// Filters out items that are unkeyed, already analyzed, already in
    /// flight, or have nothing to analyze; processes the survivors
    /// strictly one at a time in display order (input order when no
    /// display ordering exists). A request arriving while a run is in
    /// progress is logged and dropped.
    ///
    /// Fails only on wiring bugs (unregistered mediator); per-item
    /// analysis failures are contained within the run.
    pub async fn request_batch(
        &self,
        candidates: Vec<Requirement>,
    ) -> Result<BatchRunOutcome, BatchError> {
        if !self.mediator.is_registered() {
            return Err(MediatorError::NotRegistered.into());
        }

        // Claim and filter in one critical section: the go/no-go decision
        // and the membership reads must not be separable from the claim.
        let queue = {
            let mut state = lock_state(&self.state);
            if state.in_progress {
                warn!(
                    candidates = candidates.len(),
                    "batch analysis already in progress; request dropped"
                );
                return Ok(BatchRunOutcome::Rejected);
            }
            state.in_progress = true;

            let queue = filter_candidates(&candidates, &mut state);
            if queue.is_empty() {
                state.in_progress = false;
                debug!("no candidates survived filtering; nothing to analyze");
                return Ok(BatchRunOutcome::NothingToDo);
            }
            queue
        };

        let _guard = RunGuard::new(Arc::clone(&self.state));
        let queue = self.order_queue(queue);
        let total = queue.len();

        info!(total, "batch analysis run starting");
        self.broadcast(&BatchAnalysisStarted { total });

        let mut processed = 0_usize;
        let mut failed = 0_usize;

        for (index, key) in queue.iter().enumerate() {
            lock_state(&self.state)
                .currently_analyzing
                .insert(key.clone());

            let eta_minutes = self.lock_estimator().eta_minutes(total - index);
            self.broadcast(&BatchAnalysisProgress {
                completed: index,
                total,
                eta_minutes,
            });

            let started_at = Instant::now();
            match self.analysis.analyze(key).await {
                Ok(_) => {
                    debug!(key = %key, "requirement analyzed");
                    processed += 1;
                }
                Err(e) => {
                    // Best-effort batch: the item is marked done below so a
                    // systemically-failing row cannot block the rest.
                    warn!(key = %key, error = %e, "analysis failed; item skipped for this run");
                    failed += 1;
                }
            }
            self.lock_estimator().record(started_at.elapsed());

            let mut state = lock_state(&self.state);
            state.currently_analyzing.remove(key);
            state.already_analyzed.insert(key.clone());
        }

        self.broadcast(&BatchAnalysisCompleted { processed, failed });
        info!(processed, failed, "batch analysis run finished");

        Ok(BatchRunOutcome::Completed { processed, failed })
    }

    /// Whether a run currently owns the coordinator.
    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        lock_state(&self.state).in_progress
    }

    /// Snapshot of the durable "seen" memo.
    #[must_use]
    pub fn analyzed_memo(&self) -> HashSet<RequirementKey> {
        lock_state(&self.state).already_analyzed.clone()
    }

    /// Clear the durable memo so previously analyzed keys become eligible
    /// again. The external reset path; never invoked by runs themselves.
    pub fn reset_analyzed_memo(&self) {
        let mut state = lock_state(&self.state);
        let cleared = state.already_analyzed.len();
        state.already_analyzed.clear();
        info!(cleared, "analyzed memo reset");
    }

    /// Order survivors by display position, keeping input order for keys
    /// the ordering source does not know and when no ordering exists.
    fn order_queue(&self, mut queue: Vec<RequirementKey>) -> Vec<RequirementKey> {
        if let Some(order) = self.ordering.display_order() {
            let position: HashMap<&RequirementKey, usize> =
                order.iter().enumerate().map(|(i, k)| (k, i)).collect();
            // Stable sort: unknown keys keep input order after the known ones.
            queue.sort_by_key(|k| position.get(k).copied().unwrap_or(usize::MAX));
        }
        queue
    }

    fn broadcast<T: Any + Send + Sync>(&self, event: &T) {
        // Advisory only; a publish failure must never break the run.
        if let Err(e) = self.mediator.broadcast_to_all_domains(event) {
            warn!(error = %e, "failed to broadcast batch notification");
        }
    }

    fn lock_estimator(&self) -> std::sync::MutexGuard<'_, DurationEstimator> {
        self.estimator.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Reduce candidates to the keys this run will process.
///
/// Runs inside the claim's critical section. Drop order per item:
/// (a) no identifying key, (b) already in flight or already seen,
/// (c) already flagged analyzed, which memoizes the key into the durable
/// set as a side effect, (d) nothing to analyze.
fn filter_candidates(candidates: &[Requirement], state: &mut BatchState) -> Vec<RequirementKey> {
    let mut queue = Vec::new();
    let mut queued: HashSet<&RequirementKey> = HashSet::new();

    for requirement in candidates {
        let Some(key) = requirement.key.as_ref() else {
            continue;
        };
        if state.currently_analyzing.contains(key)
            || state.already_analyzed.contains(key)
            || queued.contains(key)
        {
            continue;
        }
        if requirement.is_analyzed() {
            state.already_analyzed.insert(key.clone());
            continue;
        }
        if !requirement.has_description() {
            continue;
        }
        queued.insert(key);
        queue.push(key.clone());
    }

    queue
}
