//! # View Configuration
//!
//! An immutable snapshot request describing what should currently be shown
//! in each view area. All four payload slots are optional and independent;
//! `None` is the clear-this-area sentinel.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Shared, type-erased view-model reference carried in a configuration slot.
///
/// The coordination layer never looks inside a payload; it only compares
/// references. Consumers downcast on their side of the bus.
pub type ViewPayload = Arc<dyn Any + Send + Sync>;

/// Wrap a concrete view-model as a slot payload.
#[must_use]
pub fn payload<T: Any + Send + Sync>(value: T) -> ViewPayload {
    Arc::new(value)
}

/// The four independently-applied view areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AreaKind {
    /// Main document content.
    Content,
    /// Section header strip.
    Header,
    /// Navigation tree.
    Navigation,
    /// Transient notification banner.
    Notification,
}

impl AreaKind {
    /// All areas, in acknowledgement order.
    pub const ALL: [Self; 4] = [
        Self::Content,
        Self::Header,
        Self::Navigation,
        Self::Notification,
    ];

    /// Stable name used in logs and acknowledgements.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Header => "header",
            Self::Navigation => "navigation",
            Self::Notification => "notification",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Content => 0,
            Self::Header => 1,
            Self::Navigation => 2,
            Self::Notification => 3,
        }
    }
}

impl fmt::Display for AreaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot request: "this is what should be visible now".
///
/// Not a long-lived handle. Areas keep the last-applied configuration only
/// to compare the next request against it.
#[derive(Clone, Default)]
pub struct ViewConfiguration {
    /// Section the request belongs to. Label only; never part of any slot
    /// comparison.
    pub section_name: String,
    /// Content area payload.
    pub content: Option<ViewPayload>,
    /// Header area payload.
    pub header: Option<ViewPayload>,
    /// Navigation area payload.
    pub navigation: Option<ViewPayload>,
    /// Notification area payload.
    pub notification: Option<ViewPayload>,
}

impl ViewConfiguration {
    /// Empty configuration for `section_name`; applying it clears all areas.
    #[must_use]
    pub fn new(section_name: impl Into<String>) -> Self {
        Self {
            section_name: section_name.into(),
            ..Self::default()
        }
    }

    /// Set the content slot.
    #[must_use]
    pub fn with_content(mut self, payload: ViewPayload) -> Self {
        self.content = Some(payload);
        self
    }

    /// Set the header slot.
    #[must_use]
    pub fn with_header(mut self, payload: ViewPayload) -> Self {
        self.header = Some(payload);
        self
    }

    /// Set the navigation slot.
    #[must_use]
    pub fn with_navigation(mut self, payload: ViewPayload) -> Self {
        self.navigation = Some(payload);
        self
    }

    /// Set the notification slot.
    #[must_use]
    pub fn with_notification(mut self, payload: ViewPayload) -> Self {
        self.notification = Some(payload);
        self
    }

    /// The slot belonging to `area`.
    #[must_use]
    pub fn slot(&self, area: AreaKind) -> Option<&ViewPayload> {
        match area {
            AreaKind::Content => self.content.as_ref(),
            AreaKind::Header => self.header.as_ref(),
            AreaKind::Navigation => self.navigation.as_ref(),
            AreaKind::Notification => self.notification.as_ref(),
        }
    }
}

impl fmt::Debug for ViewConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewConfiguration")
            .field("section_name", &self.section_name)
            .field("content", &self.content.is_some())
            .field("header", &self.header.is_some())
            .field("navigation", &self.navigation.is_some())
            .field("notification", &self.notification.is_some())
            .finish()
    }
}

/// Identity comparison for one slot.
///
/// Two slots are equivalent iff both are empty or both hold the identical
/// payload instance. Value equality is deliberately not consulted.
#[must_use]
pub fn slots_identical(current: Option<&ViewPayload>, incoming: Option<&ViewPayload>) -> bool {
    match (current, incoming) {
        (None, None) => true,
        (Some(a), Some(b)) => std::ptr::eq(payload_addr(a), payload_addr(b)),
        _ => false,
    }
}

fn payload_addr(p: &ViewPayload) -> *const () {
    Arc::as_ptr(p).cast()
}
