use std::sync::Arc;

use crate::generator;
use crate::listing::Listing;
use crate::types::Tab;

/// A callback fired when a listing state update occurs.
///
/// The second argument is `loading`.
pub type OnChangeCallback = Arc<dyn Fn(&Listing, bool) + Send + Sync>;

/// Configuration for [`crate::Listing`].
///
/// This type is designed to be cheap to clone: heavy fields are stored in
/// `Arc`s so adapters can tweak a few fields and call `Listing::set_options`
/// without reallocating pools or callbacks.
pub struct ListingOptions {
    /// Cards produced per completed fetch.
    pub batch_size: usize,
    /// Page count after which the session is exhausted. The fetch for the
    /// threshold page is still delivered before `has_more` turns false.
    pub page_limit: u32,
    /// Card ids are drawn uniformly from `[1, id_space)`.
    pub id_space: u32,
    /// Owner ids are drawn uniformly from `[1, owner_space)`.
    pub owner_space: u32,
    /// Spending limits are drawn uniformly from `[1, limit_max]`.
    pub limit_max: u32,
    /// Simulated network latency between a fetch being triggered and its
    /// batch landing.
    pub fetch_delay_ms: u64,
    pub initial_tab: Tab,
    /// Name pool for even batch positions.
    pub burner_names: Arc<[String]>,
    /// Name pool for odd batch positions.
    pub subscription_names: Arc<[String]>,
    /// Seed for the internal RNG; `None` seeds from OS entropy. Applied at
    /// construction only.
    pub rng_seed: Option<u64>,
    /// Optional callback fired when the listing's state changes.
    pub on_change: Option<OnChangeCallback>,
}

impl ListingOptions {
    /// Creates options with the stock listing defaults: batches of 10,
    /// exhaustion after page 10, ids in `[1, 1000)`, ~1s simulated latency.
    pub fn new() -> Self {
        Self {
            batch_size: 10,
            page_limit: 10,
            id_space: 1000,
            owner_space: 1000,
            limit_max: 100,
            fetch_delay_ms: 1000,
            initial_tab: Tab::Your,
            burner_names: generator::BURNER_NAMES.iter().map(|s| s.to_string()).collect(),
            subscription_names: generator::SUBSCRIPTION_NAMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            rng_seed: None,
            on_change: None,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_page_limit(mut self, page_limit: u32) -> Self {
        self.page_limit = page_limit;
        self
    }

    pub fn with_id_space(mut self, id_space: u32) -> Self {
        self.id_space = id_space;
        self
    }

    pub fn with_owner_space(mut self, owner_space: u32) -> Self {
        self.owner_space = owner_space;
        self
    }

    pub fn with_limit_max(mut self, limit_max: u32) -> Self {
        self.limit_max = limit_max;
        self
    }

    pub fn with_fetch_delay_ms(mut self, fetch_delay_ms: u64) -> Self {
        self.fetch_delay_ms = fetch_delay_ms;
        self
    }

    pub fn with_initial_tab(mut self, initial_tab: Tab) -> Self {
        self.initial_tab = initial_tab;
        self
    }

    /// Replaces both name pools. Even batch positions draw from `burner`,
    /// odd positions from `subscription`.
    pub fn with_name_pools<B, S>(mut self, burner: B, subscription: S) -> Self
    where
        B: IntoIterator,
        B::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        self.burner_names = burner.into_iter().map(Into::into).collect();
        self.subscription_names = subscription.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&Listing, bool) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }
}

impl Default for ListingOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ListingOptions {
    fn clone(&self) -> Self {
        Self {
            batch_size: self.batch_size,
            page_limit: self.page_limit,
            id_space: self.id_space,
            owner_space: self.owner_space,
            limit_max: self.limit_max,
            fetch_delay_ms: self.fetch_delay_ms,
            initial_tab: self.initial_tab,
            burner_names: Arc::clone(&self.burner_names),
            subscription_names: Arc::clone(&self.subscription_names),
            rng_seed: self.rng_seed,
            on_change: self.on_change.clone(),
        }
    }
}

impl core::fmt::Debug for ListingOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListingOptions")
            .field("batch_size", &self.batch_size)
            .field("page_limit", &self.page_limit)
            .field("id_space", &self.id_space)
            .field("owner_space", &self.owner_space)
            .field("limit_max", &self.limit_max)
            .field("fetch_delay_ms", &self.fetch_delay_ms)
            .field("initial_tab", &self.initial_tab)
            .field("burner_names", &self.burner_names)
            .field("subscription_names", &self.subscription_names)
            .field("rng_seed", &self.rng_seed)
            .finish_non_exhaustive()
    }
}
