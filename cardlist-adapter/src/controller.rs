use std::sync::Arc;

use cardlist::{
    CardType, Listing, ListingError, ListingOptions, Tab, VisibilitySource,
    VisibilitySubscription,
};

use crate::TriggerFlag;

/// A framework-neutral controller that wraps a `cardlist::Listing` and owns
/// the sentinel-visibility subscription.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `attach` once with the UI's visibility source (or
///   `on_sentinel_visible` directly when there is no subscription plumbing)
/// - `tick(now_ms)` each frame/timer tick
///
/// Dropping the controller (or calling `detach`) releases the subscription
/// unconditionally, regardless of outstanding fetches.
#[derive(Debug)]
pub struct Controller {
    listing: Listing,
    flag: TriggerFlag,
    subscription: Option<VisibilitySubscription>,
}

impl Controller {
    pub fn new(options: ListingOptions) -> Self {
        Self::from_listing(Listing::new(options))
    }

    pub fn from_listing(listing: Listing) -> Self {
        Self {
            listing,
            flag: TriggerFlag::new(),
            subscription: None,
        }
    }

    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    pub fn listing_mut(&mut self) -> &mut Listing {
        &mut self.listing
    }

    /// Consumes the controller, releasing any subscription.
    pub fn into_listing(self) -> Listing {
        self.listing
    }

    /// Subscribes to `source`, replacing any previous subscription (the old
    /// one deregisters on drop).
    pub fn attach(&mut self, source: &dyn VisibilitySource) {
        let flag = self.flag.clone();
        self.subscription = Some(source.subscribe(Arc::new(move || flag.set())));
    }

    /// Releases the visibility subscription.
    pub fn detach(&mut self) {
        self.subscription = None;
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// Records a sentinel-visibility event directly; drained by the next
    /// `tick`.
    pub fn on_sentinel_visible(&self) {
        self.flag.set();
    }

    /// Drains any pending visibility trigger, then advances the listing.
    /// Returns whether a fetch completed this tick.
    ///
    /// A trigger consumed while the listing is loading or exhausted is a
    /// no-op; the fetch guard lives in the listing itself.
    pub fn tick(&mut self, now_ms: u64) -> Result<bool, ListingError> {
        if self.flag.take() {
            self.listing.trigger_fetch(now_ms);
        }
        self.listing.tick(now_ms)
    }

    pub fn select_tab(&mut self, tab: Tab, now_ms: u64) {
        self.listing.select_tab(tab, now_ms);
    }

    pub fn set_filter_type(&mut self, filter_type: Option<CardType>, now_ms: u64) {
        self.listing.set_filter_type(filter_type, now_ms);
    }

    pub fn set_search_input(&mut self, term: impl Into<String>) {
        self.listing.set_search_input(term);
    }

    pub fn submit_search(&mut self) {
        self.listing.submit_search();
    }
}
