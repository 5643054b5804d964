//! # Shared Bus - Event Channel for Cross-Domain Communication
//!
//! Independent feature areas ("domains") of ReqForge never hold direct
//! references to each other. All communication flows through one shared
//! [`EventChannel`], fronted per domain by a [`DomainMediator`].
//!
//! ## Communication Rules
//!
//! - **All cross-domain communication via the mediator ONLY**
//! - **Direct calls between domains are FORBIDDEN**
//! - A domain must be marked registered before it may use its mediator
//!
//! ```text
//! ┌──────────────┐                      ┌──────────────┐
//! │  Domain A    │                      │  Domain B    │
//! │  (mediator)  │   publish::<T>()     │  (mediator)  │
//! │              │ ──────┐              │              │
//! └──────────────┘       │              └──────────────┘
//!                        ▼                      ↑
//!                  ┌──────────────┐            │
//!                  │ EventChannel │ ───────────┘
//!                  │ (per-type    │  subscribe::<T>()
//!                  │  handlers)   │
//!                  └──────────────┘
//! ```
//!
//! Subscriptions are keyed by the payload's concrete type: publishing a
//! value of type `T` invokes exactly the handlers registered for `T`,
//! synchronously, on the publishing thread. There is no replay and no
//! sub/supertype fan-out.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod channel;
pub mod mediator;

// Re-export main types
pub use channel::{EventChannel, SubscriptionToken};
pub use mediator::{DomainMediator, MediatorError};
