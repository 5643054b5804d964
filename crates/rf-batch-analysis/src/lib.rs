//! # Batch Analysis Subsystem
//!
//! **Domain:** batch-analysis
//!
//! ## Purpose
//!
//! Serializes long-running requirement analysis over a collection of rows
//! while preventing duplicate or overlapping execution. Callers hand in a
//! candidate list; the coordinator deduplicates against its membership
//! sets, claims exclusive batch ownership, and drives the survivors one at
//! a time through the external analysis backend.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | At most one run `in_progress` at a time | `coordinator.rs` - claim inside the state lock |
//! | Claim and filter share one critical section | `coordinator.rs` - `claim_and_filter()` |
//! | A key in `currently_analyzing` is never eligible for a second run | `domain/state.rs` membership sets |
//! | `already_analyzed` persists across runs, `currently_analyzing` does not | `domain/state.rs` - `RunGuard` |
//! | Run state is reset however the loop exits | `domain/state.rs` - `RunGuard::drop` |
//! | One failing item never aborts the run | `coordinator.rs` - per-item catch |
//!
//! ## Outbound Dependencies
//!
//! | Collaborator | Trait | Purpose |
//! |--------------|-------|---------|
//! | Analysis backend | `AnalysisService` | One opaque async call per item |
//! | Document grid | `OrderingSource` | Display order for deterministic processing |
//!
//! There is no cancellation path for an in-flight run; a host wanting
//! shutdown must wait the run out.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod coordinator;
pub mod domain;
pub mod events;
pub mod ports;

// Re-export main types
pub use coordinator::{BatchAnalysisCoordinator, BatchRunOutcome};
pub use domain::errors::{AnalysisError, BatchError};
pub use events::{BatchAnalysisCompleted, BatchAnalysisProgress, BatchAnalysisStarted};
pub use ports::outbound::{AnalysisService, NoDisplayOrder, OrderingSource};
