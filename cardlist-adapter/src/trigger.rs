use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A shared latch set by visibility callbacks and drained by the controller.
///
/// `take` clears the latch, so an event that lands while a fetch is in
/// flight gets consumed and dropped on the next tick rather than queued for
/// later; the visibility condition refires while it persists.
#[derive(Clone, Debug, Default)]
pub struct TriggerFlag(Arc<AtomicBool>);

impl TriggerFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Clears the latch and returns whether it was set.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::SeqCst)
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
