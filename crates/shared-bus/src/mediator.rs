//! # Cross-Domain Mediator
//!
//! Per-domain front for the shared [`EventChannel`]. Adds the domain
//! registration gate and the two cross-domain distribution patterns:
//! point-to-point requests and broadcast notifications.
//!
//! A mediator must be marked registered exactly once, at domain
//! construction, before any other operation. Using an unregistered
//! mediator is a wiring bug and fails loudly; publishing to zero
//! subscribers is a normal outcome and never an error.

use crate::channel::{EventChannel, SubscriptionToken};
use std::any::{type_name, Any};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors from mediator operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MediatorError {
    /// The mediator was used before `mark_as_registered`.
    #[error("mediator used before domain registration; call mark_as_registered at domain construction")]
    NotRegistered,

    /// `mark_as_registered` was called a second time.
    #[error("mediator already registered; mark_as_registered must be called exactly once")]
    AlreadyRegistered,
}

/// Mediator instance owned by one domain.
///
/// All instances share one [`EventChannel`]; the distinction between the
/// operation variants is conventional audience, not mechanics:
///
/// | Operation | Convention |
/// |-----------|------------|
/// | `request_cross_domain_action` | exactly one handler expected |
/// | `broadcast_to_all_domains` | any number of handlers |
/// | `publish_event` / `subscribe` | intra-domain audience |
pub struct DomainMediator {
    /// Domain name, for log context only.
    domain: String,

    /// The channel shared by every domain in the application.
    channel: Arc<EventChannel>,

    /// Registration gate, set exactly once.
    registered: AtomicBool,
}

impl DomainMediator {
    /// Create an unregistered mediator for `domain` on the shared channel.
    #[must_use]
    pub fn new(domain: impl Into<String>, channel: Arc<EventChannel>) -> Self {
        Self {
            domain: domain.into(),
            channel,
            registered: AtomicBool::new(false),
        }
    }

    /// Mark this domain as registered. Must be called exactly once, at
    /// domain construction, before any other mediator operation.
    pub fn mark_as_registered(&self) -> Result<(), MediatorError> {
        self.registered
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| MediatorError::AlreadyRegistered)?;
        info!(domain = %self.domain, "domain registered on mediator");
        Ok(())
    }

    /// Whether `mark_as_registered` has been called.
    #[must_use]
    pub fn is_registered(&self) -> bool {
        self.registered.load(Ordering::Acquire)
    }

    /// Ask another domain to act on `payload`.
    ///
    /// Point-to-point by convention: exactly one handler is expected to
    /// exist for `T`, but cardinality is not enforced here. Returns the
    /// number of handlers that received the request; zero is not an error.
    pub fn request_cross_domain_action<T>(&self, payload: &T) -> Result<usize, MediatorError>
    where
        T: Any + Send + Sync,
    {
        self.ensure_registered()?;
        let receivers = self.channel.publish(payload);
        if receivers == 0 {
            debug!(
                domain = %self.domain,
                payload_type = type_name::<T>(),
                "cross-domain action had no handler"
            );
        }
        Ok(receivers)
    }

    /// Notify every interested domain of `notification`.
    pub fn broadcast_to_all_domains<T>(&self, notification: &T) -> Result<usize, MediatorError>
    where
        T: Any + Send + Sync,
    {
        self.ensure_registered()?;
        Ok(self.channel.publish(notification))
    }

    /// Publish an event with an intra-domain audience.
    ///
    /// Identical mechanics to [`Self::broadcast_to_all_domains`]; the
    /// narrower audience is a naming convention for readers.
    pub fn publish_event<T>(&self, event: &T) -> Result<usize, MediatorError>
    where
        T: Any + Send + Sync,
    {
        self.ensure_registered()?;
        Ok(self.channel.publish(event))
    }

    /// Subscribe to payloads of type `T`.
    pub fn subscribe<T, F>(&self, handler: F) -> Result<SubscriptionToken, MediatorError>
    where
        T: Any + Send + Sync,
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.ensure_registered()?;
        Ok(self.channel.subscribe(handler))
    }

    /// Remove a previously registered handler. No-op for unknown tokens.
    pub fn unsubscribe(&self, token: SubscriptionToken) -> Result<(), MediatorError> {
        self.ensure_registered()?;
        self.channel.unsubscribe(token);
        Ok(())
    }

    /// Domain name this mediator was built for.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    fn ensure_registered(&self) -> Result<(), MediatorError> {
        if self.is_registered() {
            Ok(())
        } else {
            Err(MediatorError::NotRegistered)
        }
    }
}

impl std::fmt::Debug for DomainMediator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomainMediator")
            .field("domain", &self.domain)
            .field("registered", &self.is_registered())
            .finish_non_exhaustive()
    }
}
