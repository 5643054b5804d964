//! # Event Channel
//!
//! Typed publish/subscribe primitive. Handlers are registered per concrete
//! payload type and invoked synchronously, in registration order, on the
//! publishing thread.
//!
//! Dispatch snapshots the handler list before invoking anything, so a
//! handler may subscribe or unsubscribe re-entrantly; the mutation takes
//! effect from the next publish onward. A panicking handler is caught and
//! logged so it cannot break the bus for the remaining subscribers.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, error};
use uuid::Uuid;

/// Handle returned by [`EventChannel::subscribe`].
///
/// Subscribers must keep the token and unsubscribe on disposal; the
/// channel holds the handler alive until then.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionToken {
    type_id: TypeId,
    id: Uuid,
}

/// Type-erased handler wrapper. The outer closure downcasts back to the
/// concrete payload type the subscriber registered for.
type ErasedHandler = Arc<dyn Fn(&(dyn Any + Send + Sync)) + Send + Sync>;

struct RegisteredHandler {
    id: Uuid,
    callback: ErasedHandler,
}

/// In-process typed publish/subscribe channel.
///
/// One instance is shared by every domain mediator in the application.
pub struct EventChannel {
    handlers: RwLock<HashMap<TypeId, Vec<RegisteredHandler>>>,
}

impl EventChannel {
    /// Create an empty channel.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Register `handler` for payloads of exactly type `T`.
    ///
    /// Handlers registered for `T` run in registration order when a `T`
    /// is published. Events published before this call are not replayed.
    pub fn subscribe<T, F>(&self, handler: F) -> SubscriptionToken
    where
        T: Any + Send + Sync,
        F: Fn(&T) + Send + Sync + 'static,
    {
        let token = SubscriptionToken {
            type_id: TypeId::of::<T>(),
            id: Uuid::new_v4(),
        };

        let callback: ErasedHandler = Arc::new(move |payload| {
            // The map key guarantees the downcast succeeds; a miss means a
            // payload of the wrong type reached this bucket.
            if let Some(value) = payload.downcast_ref::<T>() {
                handler(value);
            }
        });

        self.write_handlers()
            .entry(token.type_id)
            .or_default()
            .push(RegisteredHandler {
                id: token.id,
                callback,
            });

        debug!(payload_type = type_name::<T>(), "subscription registered");
        token
    }

    /// Remove the handler identified by `token`.
    ///
    /// Unsubscribing a token that is not currently registered is a silent
    /// no-op.
    pub fn unsubscribe(&self, token: SubscriptionToken) {
        let mut handlers = self.write_handlers();
        let Some(bucket) = handlers.get_mut(&token.type_id) else {
            return;
        };

        let before = bucket.len();
        bucket.retain(|h| h.id != token.id);
        if bucket.len() < before {
            debug!("subscription removed");
        }
        if bucket.is_empty() {
            handlers.remove(&token.type_id);
        }
    }

    /// Publish `payload` to every handler registered for exactly `T`.
    ///
    /// Handlers run synchronously on the calling thread. A panicking
    /// handler is caught and logged; the remaining handlers still run.
    /// Zero subscribers is a normal outcome.
    ///
    /// Returns the number of handlers invoked.
    pub fn publish<T>(&self, payload: &T) -> usize
    where
        T: Any + Send + Sync,
    {
        // Snapshot before dispatch: handlers may re-enter the channel.
        let snapshot: Vec<ErasedHandler> = {
            let handlers = self.read_handlers();
            match handlers.get(&TypeId::of::<T>()) {
                Some(bucket) => bucket.iter().map(|h| Arc::clone(&h.callback)).collect(),
                None => Vec::new(),
            }
        };

        if snapshot.is_empty() {
            debug!(payload_type = type_name::<T>(), "event had no subscribers");
            return 0;
        }

        for callback in &snapshot {
            let result = catch_unwind(AssertUnwindSafe(|| callback(payload)));
            if result.is_err() {
                error!(
                    payload_type = type_name::<T>(),
                    "subscriber panicked during dispatch; continuing with remaining handlers"
                );
            }
        }

        debug!(
            payload_type = type_name::<T>(),
            receivers = snapshot.len(),
            "event published"
        );
        snapshot.len()
    }

    /// Number of handlers currently registered for `T`.
    #[must_use]
    pub fn subscriber_count<T: Any>(&self) -> usize {
        self.read_handlers()
            .get(&TypeId::of::<T>())
            .map_or(0, Vec::len)
    }

    fn read_handlers(&self) -> RwLockReadGuard<'_, HashMap<TypeId, Vec<RegisteredHandler>>> {
        self.handlers.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_handlers(&self) -> RwLockWriteGuard<'_, HashMap<TypeId, Vec<RegisteredHandler>>> {
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for EventChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let handlers = self.read_handlers();
        f.debug_struct("EventChannel")
            .field("payload_types", &handlers.len())
            .field(
                "handlers",
                &handlers.values().map(Vec::len).sum::<usize>(),
            )
            .finish()
    }
}
