use core::cell::Cell;
use std::collections::HashSet;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::error::ListingError;
use crate::filter;
use crate::generator;
use crate::options::ListingOptions;
use crate::state::{PageState, QueryState, SessionState};
use crate::types::{Card, CardType, FetchPhase, Tab};

/// A fetch that has been triggered but whose simulated latency has not yet
/// elapsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingFetch {
    due_ms: u64,
    /// Session epoch the fetch was started in. A reset bumps the listing's
    /// epoch, so a completion carrying a stale epoch must never land.
    epoch: u64,
}

/// The listing engine: one screen's pagination, search, and filter state.
///
/// This type is intentionally UI-agnostic:
/// - It does not hold any UI objects or timers.
/// - Your adapter drives it by calling the event methods (`trigger_fetch`,
///   `select_tab`, ...) and by calling [`Listing::tick`] from its frame or
///   timer loop with the current time.
/// - Rendering reads [`Listing::for_each_visible_card`] plus the state
///   snapshot accessors.
///
/// For sentinel-visibility wiring, see the `cardlist-adapter` crate.
#[derive(Clone, Debug)]
pub struct Listing {
    options: ListingOptions,
    rng: SmallRng,

    tab: Tab,
    cards: Vec<Card>,
    issued_ids: HashSet<u32>,
    page: u32,
    phase: FetchPhase,
    epoch: u64,
    pending: Option<PendingFetch>,

    search_input: String,
    submitted_search: String,
    filter_type: Option<CardType>,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl Listing {
    /// Creates a fresh listing session. No fetch is scheduled until the
    /// first trigger arrives.
    pub fn new(options: ListingOptions) -> Self {
        let rng = match options.rng_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        ldebug!(
            batch_size = options.batch_size,
            page_limit = options.page_limit,
            id_space = options.id_space,
            "Listing::new"
        );
        Self {
            tab: options.initial_tab,
            rng,
            cards: Vec::new(),
            issued_ids: HashSet::new(),
            page: 1,
            phase: FetchPhase::Idle,
            epoch: 0,
            pending: None,
            search_input: String::new(),
            submitted_search: String::new(),
            filter_type: None,
            options,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        }
    }

    pub fn options(&self) -> &ListingOptions {
        &self.options
    }

    /// Replaces the options. Takes effect from the next fetch; `rng_seed`
    /// and `initial_tab` only apply at construction.
    pub fn set_options(&mut self, options: ListingOptions) {
        self.options = options;
        self.notify();
    }

    /// Clones the current options, applies `f`, then delegates to
    /// `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut ListingOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&Listing, bool) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
        self.notify();
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self, self.is_loading());
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_change` notification.
    ///
    /// Recommended for UI adapters that apply several events per frame when
    /// the callback drives rendering.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn phase(&self) -> FetchPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == FetchPhase::Loading
    }

    /// False only once the exhaustion threshold fetch has completed; the
    /// threshold batch itself is still delivered.
    pub fn has_more(&self) -> bool {
        self.phase != FetchPhase::Exhausted
    }

    /// Session generation counter; bumped by every reset.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// All records accumulated since the last reset, in fetch order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn issued_id_count(&self) -> usize {
        self.issued_ids.len()
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn submitted_search(&self) -> &str {
        &self.submitted_search
    }

    pub fn filter_type(&self) -> Option<CardType> {
        self.filter_type
    }

    pub fn query_state(&self) -> QueryState {
        QueryState {
            search_input: self.search_input.clone(),
            submitted_search: self.submitted_search.clone(),
            filter_type: self.filter_type,
        }
    }

    pub fn page_state(&self) -> PageState {
        PageState {
            page: self.page,
            loading: self.is_loading(),
            has_more: self.has_more(),
        }
    }

    /// Combined snapshot for the rendering surface.
    pub fn session_state(&self) -> SessionState {
        SessionState {
            tab: self.tab,
            query: self.query_state(),
            page: self.page_state(),
        }
    }

    /// Starts a fetch if the listing is idle. Returns whether one started.
    ///
    /// A trigger while a fetch is in flight or after exhaustion is dropped,
    /// not queued; the visibility condition refires while it persists.
    pub fn trigger_fetch(&mut self, now_ms: u64) -> bool {
        if self.phase != FetchPhase::Idle {
            ltrace!(phase = ?self.phase, "trigger_fetch ignored");
            return false;
        }
        self.begin_fetch(now_ms);
        self.notify();
        true
    }

    fn begin_fetch(&mut self, now_ms: u64) {
        self.phase = FetchPhase::Loading;
        self.pending = Some(PendingFetch {
            due_ms: now_ms.saturating_add(self.options.fetch_delay_ms),
            epoch: self.epoch,
        });
        ltrace!(page = self.page, due_in_ms = self.options.fetch_delay_ms, "fetch started");
    }

    /// Advances the simulated clock: completes the in-flight fetch once its
    /// latency has elapsed. Returns whether a batch landed this tick.
    ///
    /// A pending fetch from before the last reset is discarded silently:
    /// never delivered, never an error. Identifier exhaustion parks the
    /// listing in `Exhausted` and propagates.
    pub fn tick(&mut self, now_ms: u64) -> Result<bool, ListingError> {
        let Some(pending) = self.pending else {
            return Ok(false);
        };
        debug_assert_eq!(self.phase, FetchPhase::Loading, "pending fetch outside Loading");
        if now_ms < pending.due_ms {
            return Ok(false);
        }
        self.pending = None;

        if pending.epoch != self.epoch {
            // Invalidated by a reset while in flight.
            ldebug!(stale = pending.epoch, current = self.epoch, "stale fetch discarded");
            return Ok(false);
        }

        let batch = match generator::generate_batch(
            &mut self.rng,
            &self.options,
            &self.issued_ids,
            now_ms,
        ) {
            Ok(batch) => batch,
            Err(err) => {
                self.phase = FetchPhase::Exhausted;
                self.notify();
                return Err(err);
            }
        };

        for card in &batch {
            self.issued_ids.insert(card.id);
        }
        self.cards.extend(batch);

        let fetched_page = self.page;
        self.page += 1;
        self.phase = if fetched_page >= self.options.page_limit {
            FetchPhase::Exhausted
        } else {
            FetchPhase::Idle
        };
        ldebug!(
            page = fetched_page,
            total = self.cards.len(),
            exhausted = !self.has_more(),
            "fetch completed"
        );
        debug_assert_eq!(self.issued_ids.len(), self.cards.len());

        self.notify();
        Ok(true)
    }

    /// Selects a tab and restarts the session, even when re-selecting the
    /// active tab.
    pub fn select_tab(&mut self, tab: Tab, now_ms: u64) {
        self.tab = tab;
        self.reset_session(now_ms);
        self.notify();
    }

    /// Changes the type filter and restarts the session, as if fetching a
    /// freshly filtered set. The simulated generator ignores the filter;
    /// the render-time predicate does the narrowing.
    pub fn set_filter_type(&mut self, filter_type: Option<CardType>, now_ms: u64) {
        self.filter_type = filter_type;
        self.reset_session(now_ms);
        self.notify();
    }

    /// Updates the live search box content. Has no effect on the displayed
    /// set until [`Listing::submit_search`].
    pub fn set_search_input(&mut self, term: impl Into<String>) {
        self.search_input = term.into();
        self.notify();
    }

    /// Submits the current search input. Applies the term against the full
    /// accumulated set at render time; pagination and records are untouched.
    pub fn submit_search(&mut self) {
        self.submitted_search = self.search_input.clone();
        self.notify();
    }

    /// Discards accumulated state and schedules one fetch after the usual
    /// latency. Bumping the epoch invalidates any fetch still in flight.
    fn reset_session(&mut self, now_ms: u64) {
        self.epoch += 1;
        self.cards.clear();
        self.issued_ids.clear();
        self.page = 1;
        ldebug!(epoch = self.epoch, tab = ?self.tab, "session reset");
        self.begin_fetch(now_ms);
    }

    /// Visits the displayed subset (search AND filter applied) in insertion
    /// order, without allocating.
    pub fn for_each_visible_card(&self, mut f: impl FnMut(&Card)) {
        for card in &self.cards {
            if filter::matches(card, &self.submitted_search, self.filter_type) {
                f(card);
            }
        }
    }

    /// Collects the displayed subset into `out` (clears `out` first).
    ///
    /// Convenience wrapper around [`Self::for_each_visible_card`]; prefer
    /// the visitor and a reused buffer in hot adapters.
    pub fn collect_visible_cards(&self, out: &mut Vec<Card>) {
        out.clear();
        self.for_each_visible_card(|card| out.push(card.clone()));
    }

    pub fn visible_count(&self) -> usize {
        let mut n = 0;
        self.for_each_visible_card(|_| n += 1);
        n
    }
}
