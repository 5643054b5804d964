//! # View Configuration Flow
//!
//! Tests that independent domains and the view-area coordinator work
//! together via the shared bus:
//!
//! 1. **Any domain → View Coordination**: `ApplyViewConfiguration`
//!    requests reach the coordinator without a direct reference.
//! 2. **View Coordination → All domains**: one `ViewConfigurationApplied`
//!    per area, observable from any registered mediator.
//! 3. **Idempotency across domains**: the acknowledgement's `was_changed`
//!    reflects reference identity of the slot, regardless of which domain
//!    published the request.

#[cfg(test)]
mod tests {
    use crate::support::{registered_mediator, Capture, RecordingUiExecutor};
    use rf_view_coordination::{
        payload, ApplyViewConfiguration, AreaKind, ViewAreaCoordinator, ViewConfiguration,
        ViewConfigurationApplied,
    };
    use shared_bus::EventChannel;
    use std::sync::Arc;

    struct Host {
        coordinator: Arc<ViewAreaCoordinator>,
        workspace: Arc<shared_bus::DomainMediator>,
        navigation: Arc<shared_bus::DomainMediator>,
        ui: Arc<RecordingUiExecutor>,
        acks: Capture<ViewConfigurationApplied>,
    }

    fn host() -> Host {
        crate::support::init_test_logging();
        let channel = Arc::new(EventChannel::new());
        let view = registered_mediator("view-coordination", &channel);
        let workspace = registered_mediator("workspace", &channel);
        let navigation = registered_mediator("navigation", &channel);

        let ui = Arc::new(RecordingUiExecutor::default());
        let coordinator = Arc::new(ViewAreaCoordinator::new(
            view,
            Arc::clone(&ui) as Arc<dyn shared_types::UiExecutor>,
        ));
        coordinator.attach().expect("coordinator attach failed");

        let acks = Capture::on(&navigation);

        Host {
            coordinator,
            workspace,
            navigation,
            ui,
            acks,
        }
    }

    #[test]
    fn test_request_from_one_domain_acknowledged_to_another() {
        let host = host();
        let grid = payload("requirements grid");

        host.workspace
            .request_cross_domain_action(&ApplyViewConfiguration(
                ViewConfiguration::new("Requirements").with_content(grid),
            ))
            .unwrap();

        let acks = host.acks.take();
        assert_eq!(acks.len(), 4);
        assert!(acks
            .iter()
            .all(|a| a.configuration.section_name == "Requirements"));
        assert_eq!(
            acks.iter()
                .filter(|a| a.was_changed)
                .map(|a| a.area)
                .collect::<Vec<_>>(),
            vec![AreaKind::Content]
        );
    }

    #[test]
    fn test_idempotency_holds_across_publishing_domains() {
        let host = host();
        let grid = payload("requirements grid");

        // Workspace shows the grid, then navigation re-requests the same
        // payload instance: the second request changes nothing.
        host.workspace
            .request_cross_domain_action(&ApplyViewConfiguration(
                ViewConfiguration::new("Requirements").with_content(Arc::clone(&grid)),
            ))
            .unwrap();
        host.acks.take();

        host.navigation
            .request_cross_domain_action(&ApplyViewConfiguration(
                ViewConfiguration::new("Requirements").with_content(grid),
            ))
            .unwrap();

        assert!(host.acks.take().iter().all(|a| !a.was_changed));
    }

    #[test]
    fn test_display_mutations_are_marshalled_through_executor() {
        let host = host();

        host.workspace
            .request_cross_domain_action(&ApplyViewConfiguration(
                ViewConfiguration::new("Requirements")
                    .with_content(payload("grid"))
                    .with_header(payload("header strip")),
            ))
            .unwrap();

        // Two slots changed, so exactly two tasks crossed the UI port.
        assert_eq!(host.ui.dispatched(), 2);

        // An idempotent re-request crosses it zero more times.
        let acks = host.acks.take();
        let changed: Vec<_> = acks.iter().filter(|a| a.was_changed).collect();
        assert_eq!(changed.len(), 2);
        assert_eq!(host.ui.dispatched(), 2);
    }

    #[test]
    fn test_unregistered_domain_cannot_request_view_changes() {
        let channel = Arc::new(EventChannel::new());
        let rogue = shared_bus::DomainMediator::new("rogue", channel);

        let result = rogue.request_cross_domain_action(&ApplyViewConfiguration(
            ViewConfiguration::new("Requirements"),
        ));
        assert_eq!(result, Err(shared_bus::MediatorError::NotRegistered));
    }

    #[test]
    fn test_clear_propagates_once() {
        let host = host();
        let banner = payload("import finished");

        host.workspace
            .request_cross_domain_action(&ApplyViewConfiguration(
                ViewConfiguration::new("Requirements").with_notification(banner),
            ))
            .unwrap();
        host.acks.take();

        // First clear changes the area, second is a no-op.
        for expected in [true, false] {
            host.workspace
                .request_cross_domain_action(&ApplyViewConfiguration(ViewConfiguration::new(
                    "Requirements",
                )))
                .unwrap();
            let notification_ack = host
                .acks
                .take()
                .into_iter()
                .find(|a| a.area == AreaKind::Notification)
                .expect("notification ack missing");
            assert_eq!(notification_ack.was_changed, expected);
        }

        assert!(host
            .coordinator
            .displayed_payload(AreaKind::Notification)
            .is_none());
    }
}
