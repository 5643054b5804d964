//! Outbound (driven) ports for the batch analysis subsystem.
//!
//! These traits define the external collaborators the coordinator drives:
//! the analysis backend and the document grid's display ordering.

use crate::domain::errors::AnalysisError;
use async_trait::async_trait;
use shared_types::{Analysis, RequirementKey};

/// The external analysis backend, treated as a black box with
/// unspecified latency.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Analyze one requirement.
    ///
    /// Invoked at most once per surviving batch item per run. The
    /// coordinator marks the item done whether this succeeds or fails.
    async fn analyze(&self, key: &RequirementKey) -> Result<Analysis, AnalysisError>;
}

/// Source of the order requirements are displayed in.
///
/// Optional collaborator: when the display order is unavailable the
/// coordinator falls back to input order.
pub trait OrderingSource: Send + Sync {
    /// Keys in display order, or `None` when no display ordering exists
    /// (e.g. the grid is not materialized yet).
    fn display_order(&self) -> Option<Vec<RequirementKey>>;
}

/// Ordering source for hosts without a display grid; always unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDisplayOrder;

impl OrderingSource for NoDisplayOrder {
    fn display_order(&self) -> Option<Vec<RequirementKey>> {
        None
    }
}
