//! # UI Executor Port
//!
//! The host toolkit requires all UI-visible state mutations to happen on
//! its UI thread. Instead of an ambient global dispatcher, the hop is an
//! explicit collaborator: production wiring hands in the toolkit's
//! dispatcher, tests substitute [`InlineUiExecutor`].

/// A task to run on the UI thread.
pub type UiTask = Box<dyn FnOnce() + Send>;

/// Marshals tasks onto the UI thread.
pub trait UiExecutor: Send + Sync {
    /// Queue `task` for execution on the UI thread.
    ///
    /// Implementations must run queued tasks in submission order.
    fn dispatch(&self, task: UiTask);
}

/// Executor that runs tasks inline on the calling thread.
///
/// Used by tests and headless operation, where there is no UI thread to
/// marshal onto and synchronous execution keeps assertions simple.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineUiExecutor;

impl UiExecutor for InlineUiExecutor {
    fn dispatch(&self, task: UiTask) {
        task();
    }
}
