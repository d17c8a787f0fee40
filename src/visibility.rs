use std::sync::Arc;

/// A callback invoked each time the sentinel element becomes visible.
pub type VisibilityCallback = Arc<dyn Fn() + Send + Sync>;

/// An opaque source of sentinel-visibility events, e.g. an intersection
/// observer bound to a marker element placed after the rendered list.
///
/// The core treats visibility purely as a trigger signal; geometry and
/// thresholds are the source's business.
pub trait VisibilitySource {
    /// Registers `on_visible`. The returned guard deregisters the
    /// observation when dropped.
    fn subscribe(&self, on_visible: VisibilityCallback) -> VisibilitySubscription;
}

/// RAII guard for a visibility subscription.
///
/// The unsubscribe hook runs exactly once: at drop, or eagerly via
/// [`VisibilitySubscription::cancel`]. Teardown is unconditional and does
/// not wait for outstanding fetches.
pub struct VisibilitySubscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send>>,
}

impl VisibilitySubscription {
    pub fn new(unsubscribe: impl FnOnce() + Send + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// A subscription with no teardown hook.
    pub fn noop() -> Self {
        Self { unsubscribe: None }
    }

    /// Unsubscribes now instead of at drop time.
    pub fn cancel(mut self) {
        if let Some(f) = self.unsubscribe.take() {
            f();
        }
    }
}

impl Drop for VisibilitySubscription {
    fn drop(&mut self) {
        if let Some(f) = self.unsubscribe.take() {
            f();
        }
    }
}

impl core::fmt::Debug for VisibilitySubscription {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.unsubscribe {
            Some(_) => f.write_str("VisibilitySubscription(active)"),
            None => f.write_str("VisibilitySubscription(released)"),
        }
    }
}
