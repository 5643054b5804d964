//! # View Coordination Subsystem
//!
//! **Domain:** view-coordination
//!
//! ## Purpose
//!
//! Decides whether a requested UI update is actually new. Domains publish
//! [`ApplyViewConfiguration`] requests on the mediator; this subsystem
//! routes the request to the four view areas (content, header, navigation,
//! notification), each of which applies its own idempotency check and
//! acknowledges with [`ViewConfigurationApplied`].
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Slot equivalence is reference identity, never value equality | `configuration.rs` - `slots_identical()` |
//! | Exactly one ack per request per area | `coordinator.rs` - `apply()` loop |
//! | Areas are independent: each compares only its own slot | `coordinator.rs` - per-area `AreaState` |
//! | Displayed-state mutation is marshalled through `UiExecutor` | `coordinator.rs` - `apply()` |
//!
//! Identity comparison is a deliberate design choice, not a shortcut:
//! payloads are expensive stateful view-models, and re-assigning one
//! destroys selection, scroll position, and focus even when nothing
//! logically changed. Do not "improve" this to deep equality.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod configuration;
pub mod coordinator;
pub mod events;

pub use configuration::{payload, AreaKind, ViewConfiguration, ViewPayload};
pub use coordinator::ViewAreaCoordinator;
pub use events::{ApplyViewConfiguration, ViewConfigurationApplied};
