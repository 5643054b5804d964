//! # View Area Coordinator
//!
//! Consumes [`ApplyViewConfiguration`] requests from the mediator and
//! routes them to the four view areas. Each area tracks its own
//! last-applied configuration and decides independently whether the
//! request is actually new; an acknowledgement is published either way.

use crate::configuration::{slots_identical, AreaKind, ViewConfiguration, ViewPayload};
use crate::events::{ApplyViewConfiguration, ViewConfigurationApplied};
use shared_bus::{DomainMediator, MediatorError, SubscriptionToken};
use shared_types::UiExecutor;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error};

/// Per-area application state.
///
/// `last_applied` is the idempotency record; `displayed` is the payload
/// the UI currently renders, mutated only on the UI thread.
#[derive(Default)]
struct Area {
    last_applied: Mutex<Option<ViewConfiguration>>,
    displayed: Arc<Mutex<Option<ViewPayload>>>,
}

/// Routes configuration requests to the view areas.
///
/// One instance per window, wired at host startup with that window's
/// mediator and UI executor. Call [`Self::attach`] after construction and
/// [`Self::detach`] on teardown; the channel holds the apply handler (and
/// through it this coordinator) alive until detached.
pub struct ViewAreaCoordinator {
    mediator: Arc<DomainMediator>,
    ui: Arc<dyn UiExecutor>,
    areas: [Area; 4],
    subscription: Mutex<Option<SubscriptionToken>>,
}

impl ViewAreaCoordinator {
    /// Create a coordinator with all areas initially empty.
    #[must_use]
    pub fn new(mediator: Arc<DomainMediator>, ui: Arc<dyn UiExecutor>) -> Self {
        Self {
            mediator,
            ui,
            areas: std::array::from_fn(|_| Area::default()),
            subscription: Mutex::new(None),
        }
    }

    /// Subscribe to [`ApplyViewConfiguration`] on the mediator.
    ///
    /// No-op when already attached.
    pub fn attach(self: &Arc<Self>) -> Result<(), MediatorError> {
        let mut subscription = lock(&self.subscription);
        if subscription.is_some() {
            return Ok(());
        }

        let coordinator = Arc::clone(self);
        let token = self
            .mediator
            .subscribe::<ApplyViewConfiguration, _>(move |request| coordinator.apply(request))?;
        *subscription = Some(token);
        Ok(())
    }

    /// Unsubscribe from the mediator. No-op when not attached.
    pub fn detach(&self) -> Result<(), MediatorError> {
        if let Some(token) = lock(&self.subscription).take() {
            self.mediator.unsubscribe(token)?;
        }
        Ok(())
    }

    /// Apply a configuration request to every area.
    ///
    /// Publishes exactly one [`ViewConfigurationApplied`] per area, in
    /// [`AreaKind::ALL`] order, whether or not anything changed.
    pub fn apply(&self, request: &ApplyViewConfiguration) {
        for area in AreaKind::ALL {
            let was_changed = self.apply_to_area(area, &request.0);

            let ack = ViewConfigurationApplied {
                configuration: request.0.clone(),
                area,
                was_changed,
            };
            if let Err(e) = self.mediator.broadcast_to_all_domains(&ack) {
                error!(area = %area, error = %e, "failed to publish view acknowledgement");
            }
        }
    }

    /// The payload `area` currently displays. Mostly useful to tests and
    /// diagnostics; the UI binds to the area directly.
    #[must_use]
    pub fn displayed_payload(&self, area: AreaKind) -> Option<ViewPayload> {
        lock(&self.areas[area.index()].displayed).clone()
    }

    fn apply_to_area(&self, area: AreaKind, config: &ViewConfiguration) -> bool {
        let slot = &self.areas[area.index()];
        let incoming = config.slot(area).cloned();

        {
            let mut last_applied = lock(&slot.last_applied);
            let current = last_applied.as_ref().and_then(|c| c.slot(area));
            if slots_identical(current, incoming.as_ref()) {
                debug!(
                    area = %area,
                    section = %config.section_name,
                    "configuration unchanged; display state kept"
                );
                return false;
            }
            *last_applied = Some(config.clone());
        }

        // Displayed-state mutation must happen on the UI thread.
        let displayed = Arc::clone(&slot.displayed);
        self.ui.dispatch(Box::new(move || {
            *lock(&displayed) = incoming;
        }));

        debug!(area = %area, section = %config.section_name, "configuration applied");
        true
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
