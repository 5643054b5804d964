//! # Batch Analysis Flow
//!
//! Tests the batch coordinator's choreography with the rest of the
//! system:
//!
//! 1. **Any domain → Batch Analysis**: candidate lists are filtered and
//!    processed sequentially; progress is observable from any mediator.
//! 2. **Mutual exclusion**: concurrent requests race for one ownership
//!    claim; exactly one run proceeds.
//! 3. **Batch Analysis → View Coordination**: a completion notification
//!    can drive a view update without any direct reference between the
//!    domains.

#[cfg(test)]
mod tests {
    use crate::support::{registered_mediator, Capture, ScriptedAnalysis, StaticOrdering};
    use rf_batch_analysis::{
        AnalysisService, BatchAnalysisCompleted, BatchAnalysisCoordinator, BatchAnalysisProgress,
        BatchAnalysisStarted, BatchRunOutcome, NoDisplayOrder,
    };
    use rf_view_coordination::{
        payload, ApplyViewConfiguration, AreaKind, ViewAreaCoordinator, ViewConfiguration,
        ViewConfigurationApplied,
    };
    use shared_bus::EventChannel;
    use shared_types::{Analysis, InlineUiExecutor, Requirement, RequirementKey};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Notify;
    use tokio::time::timeout;

    fn keys(raw: &[&str]) -> Vec<RequirementKey> {
        raw.iter().map(|k| RequirementKey::from(*k)).collect()
    }

    #[tokio::test]
    async fn test_batch_progress_is_observable_from_other_domains() {
        crate::support::init_test_logging();
        let channel = Arc::new(EventChannel::new());
        let batch = registered_mediator("batch-analysis", &channel);
        let workspace = registered_mediator("workspace", &channel);

        let started: Capture<BatchAnalysisStarted> = Capture::on(&workspace);
        let progress: Capture<BatchAnalysisProgress> = Capture::on(&workspace);
        let completed: Capture<BatchAnalysisCompleted> = Capture::on(&workspace);

        let service = Arc::new(ScriptedAnalysis::new());
        let coordinator = BatchAnalysisCoordinator::new(
            batch,
            Arc::clone(&service) as Arc<dyn AnalysisService>,
            Arc::new(StaticOrdering(keys(&["A", "B"]))),
        );

        // A is analyzable, B is already analyzed, C has no description.
        let a = Requirement::new("A", "shall respond within 2s");
        let mut b = Requirement::new("B", "shall log all access");
        b.analysis = Some(Analysis::completed("done"));
        let c = Requirement::new("C", "");

        let outcome = coordinator.request_batch(vec![a, b, c]).await.unwrap();
        assert_eq!(
            outcome,
            BatchRunOutcome::Completed {
                processed: 1,
                failed: 0
            }
        );

        assert_eq!(started.events(), vec![BatchAnalysisStarted { total: 1 }]);
        assert_eq!(progress.len(), 1);
        assert_eq!(
            completed.events(),
            vec![BatchAnalysisCompleted {
                processed: 1,
                failed: 0
            }]
        );
        assert_eq!(service.call_order(), keys(&["A"]));

        let memo = coordinator.analyzed_memo();
        assert!(memo.contains(&RequirementKey::from("A")));
        assert!(memo.contains(&RequirementKey::from("B")));
    }

    #[tokio::test]
    async fn test_concurrent_requests_yield_exactly_one_run() {
        let channel = Arc::new(EventChannel::new());
        let gate = Arc::new(Notify::new());
        let service = Arc::new(ScriptedAnalysis::new().gated(Arc::clone(&gate)));

        let coordinator = Arc::new(BatchAnalysisCoordinator::new(
            registered_mediator("batch-analysis", &channel),
            Arc::clone(&service) as Arc<dyn AnalysisService>,
            Arc::new(NoDisplayOrder),
        ));

        let winner = {
            let coordinator = Arc::clone(&coordinator);
            tokio::spawn(
                async move { coordinator.request_batch(vec![Requirement::new("A", "t")]).await },
            )
        };
        timeout(Duration::from_secs(5), async {
            while service.call_order().is_empty() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("winning run never reached the backend");

        // Every request issued while the winner holds ownership is
        // rejected, never queued or merged.
        for key in ["B", "C", "D"] {
            let outcome = coordinator
                .request_batch(vec![Requirement::new(key, "t")])
                .await
                .unwrap();
            assert_eq!(outcome, BatchRunOutcome::Rejected);
        }

        gate.notify_one();
        let outcome = winner.await.unwrap().unwrap();
        assert_eq!(
            outcome,
            BatchRunOutcome::Completed {
                processed: 1,
                failed: 0
            }
        );
        assert_eq!(service.call_order(), keys(&["A"]));
        assert!(!coordinator.is_in_progress());
    }

    #[tokio::test]
    async fn test_failing_item_reported_but_run_completes() {
        let channel = Arc::new(EventChannel::new());
        let workspace = registered_mediator("workspace", &channel);
        let completed: Capture<BatchAnalysisCompleted> = Capture::on(&workspace);

        let service = Arc::new(ScriptedAnalysis::new().failing_on("B"));
        let coordinator = BatchAnalysisCoordinator::new(
            registered_mediator("batch-analysis", &channel),
            Arc::clone(&service) as Arc<dyn AnalysisService>,
            Arc::new(NoDisplayOrder),
        );

        let outcome = coordinator
            .request_batch(vec![
                Requirement::new("A", "t"),
                Requirement::new("B", "t"),
                Requirement::new("C", "t"),
            ])
            .await
            .unwrap();

        assert_eq!(
            outcome,
            BatchRunOutcome::Completed {
                processed: 2,
                failed: 1
            }
        );
        assert_eq!(service.call_order(), keys(&["A", "B", "C"]));
        assert_eq!(
            completed.events(),
            vec![BatchAnalysisCompleted {
                processed: 2,
                failed: 1
            }]
        );
    }

    #[tokio::test]
    async fn test_completion_drives_view_update_across_domains() {
        let channel = Arc::new(EventChannel::new());
        let view = registered_mediator("view-coordination", &channel);
        let workspace = registered_mediator("workspace", &channel);
        let batch = registered_mediator("batch-analysis", &channel);

        let view_coordinator = Arc::new(ViewAreaCoordinator::new(
            view,
            Arc::new(InlineUiExecutor) as Arc<dyn shared_types::UiExecutor>,
        ));
        view_coordinator.attach().unwrap();
        let acks: Capture<ViewConfigurationApplied> = Capture::on(&workspace);

        // Workspace reacts to batch completion by showing a summary
        // banner; no domain references another directly.
        {
            let publisher = Arc::clone(&workspace);
            workspace
                .subscribe::<BatchAnalysisCompleted, _>(move |done| {
                    let banner = payload(format!(
                        "analysis finished: {} ok, {} failed",
                        done.processed, done.failed
                    ));
                    let request = ApplyViewConfiguration(
                        ViewConfiguration::new("Requirements").with_notification(banner),
                    );
                    publisher
                        .request_cross_domain_action(&request)
                        .expect("workspace mediator is registered");
                })
                .unwrap();
        }

        let service = Arc::new(ScriptedAnalysis::new());
        let coordinator = BatchAnalysisCoordinator::new(
            batch,
            Arc::clone(&service) as Arc<dyn AnalysisService>,
            Arc::new(NoDisplayOrder),
        );
        coordinator
            .request_batch(vec![Requirement::new("A", "t")])
            .await
            .unwrap();

        let notification_acks: Vec<_> = acks
            .events()
            .into_iter()
            .filter(|a| a.area == AreaKind::Notification && a.was_changed)
            .collect();
        assert_eq!(notification_acks.len(), 1);
        assert!(view_coordinator
            .displayed_payload(AreaKind::Notification)
            .is_some());
    }
}
