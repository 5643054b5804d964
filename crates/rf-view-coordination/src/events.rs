//! # View Coordination Events
//!
//! Events this subsystem consumes and produces on the mediator.

use crate::configuration::{AreaKind, ViewConfiguration};

/// Request to apply a view configuration to all areas.
///
/// Published by any domain that wants to change what is shown; consumed by
/// the [`crate::ViewAreaCoordinator`].
#[derive(Debug, Clone)]
pub struct ApplyViewConfiguration(pub ViewConfiguration);

/// Acknowledgement published exactly once per request per area, whether or
/// not the area's displayed state changed.
///
/// Producers that need to know whether their request had an effect watch
/// for this with `was_changed = true`.
#[derive(Debug, Clone)]
pub struct ViewConfigurationApplied {
    /// The configuration that was requested.
    pub configuration: ViewConfiguration,
    /// The area this acknowledgement is for.
    pub area: AreaKind,
    /// Whether the area's displayed payload was actually replaced.
    pub was_changed: bool,
}
