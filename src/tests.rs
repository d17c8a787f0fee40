use crate::*;

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

// 2023-11-14T22:13:20Z
const T0: u64 = 1_700_000_000_000;

fn options() -> ListingOptions {
    ListingOptions::new().with_rng_seed(0xCA4D)
}

fn complete_fetch(listing: &mut Listing, now_ms: &mut u64) {
    assert!(listing.trigger_fetch(*now_ms));
    *now_ms += listing.options().fetch_delay_ms;
    assert!(listing.tick(*now_ms).unwrap());
}

fn card(id: u32, name: &str, card_type: CardType) -> Card {
    Card {
        id,
        name: name.to_string(),
        card_type,
        expiry: "1/1/2030".to_string(),
        limit: 10,
        owner_id: 42,
    }
}

#[test]
fn issued_ids_match_accumulated_cards_at_every_point() {
    let mut listing = Listing::new(options());
    let mut now = T0;
    for fetch in 1..=5u32 {
        complete_fetch(&mut listing, &mut now);
        assert_eq!(listing.issued_id_count(), listing.cards().len());
        assert_eq!(listing.cards().len(), 10 * fetch as usize);
        let mut seen = HashSet::new();
        for c in listing.cards() {
            assert!(seen.insert(c.id), "duplicate id {}", c.id);
            assert!((1..1000).contains(&c.id));
        }
    }
}

#[test]
fn card_type_follows_id_parity() {
    let mut listing = Listing::new(options());
    let mut now = T0;
    complete_fetch(&mut listing, &mut now);
    complete_fetch(&mut listing, &mut now);
    for c in listing.cards() {
        let expected = if c.id % 2 == 0 {
            CardType::Burner
        } else {
            CardType::Subscription
        };
        assert_eq!(c.card_type, expected, "id {}", c.id);
    }
}

#[test]
fn name_pools_alternate_by_batch_position() {
    let mut listing = Listing::new(options().with_name_pools(["even"], ["odd"]));
    let mut now = T0;
    complete_fetch(&mut listing, &mut now);
    for (position, c) in listing.cards().iter().enumerate() {
        let expected = if position % 2 == 0 { "even" } else { "odd" };
        assert_eq!(c.name, expected, "position {position}");
    }
}

#[test]
fn limits_owner_ids_and_expiry_stay_in_bounds() {
    let mut listing = Listing::new(options());
    let mut now = T0;
    complete_fetch(&mut listing, &mut now);
    for c in listing.cards() {
        assert!((1..=100).contains(&c.limit));
        assert!((1..1000).contains(&c.owner_id));
        // Generated one simulated second after T0, still 2023-11-14.
        assert_eq!(c.expiry, "11/14/2024");
    }
}

#[test]
fn trigger_while_loading_is_dropped() {
    let mut listing = Listing::new(options());
    assert!(listing.trigger_fetch(T0));
    for i in 0..5 {
        assert!(!listing.trigger_fetch(T0 + 10 + i));
    }
    assert!(listing.tick(T0 + 1000).unwrap());
    assert_eq!(listing.cards().len(), 10);
    assert_eq!(listing.page(), 2);

    // The dropped triggers left nothing queued behind the completed fetch.
    assert!(!listing.tick(T0 + 10_000).unwrap());
    assert_eq!(listing.cards().len(), 10);
}

#[test]
fn exhaustion_lands_with_the_threshold_batch() {
    let mut listing = Listing::new(options());
    let mut now = T0;
    for fetch in 1..=10u32 {
        assert!(listing.has_more(), "fetch {fetch}");
        complete_fetch(&mut listing, &mut now);
        assert_eq!(listing.page(), fetch + 1);
    }
    assert_eq!(listing.phase(), FetchPhase::Exhausted);
    assert!(!listing.has_more());
    assert_eq!(listing.cards().len(), 100);

    assert!(!listing.trigger_fetch(now));
    assert!(!listing.tick(now + 10_000).unwrap());
    assert_eq!(listing.cards().len(), 100);
}

#[test]
fn reset_restores_fresh_session_before_refetching() {
    let mut listing = Listing::new(options());
    let mut now = T0;
    for _ in 0..3 {
        complete_fetch(&mut listing, &mut now);
    }

    listing.select_tab(Tab::Blocked, now);
    assert_eq!(listing.tab(), Tab::Blocked);
    assert!(listing.cards().is_empty());
    assert_eq!(listing.issued_id_count(), 0);
    assert_eq!(listing.page(), 1);
    assert!(listing.has_more());
    assert!(listing.is_loading());

    assert!(!listing.tick(now + 999).unwrap());
    assert!(listing.cards().is_empty());
    assert!(listing.tick(now + 1000).unwrap());
    assert_eq!(listing.cards().len(), 10);
    assert_eq!(listing.page(), 2);
}

#[test]
fn reselecting_the_active_tab_still_resets() {
    let mut listing = Listing::new(options());
    let mut now = T0;
    complete_fetch(&mut listing, &mut now);
    assert_eq!(listing.cards().len(), 10);

    listing.select_tab(listing.tab(), now);
    assert!(listing.cards().is_empty());
    assert_eq!(listing.page(), 1);
}

#[test]
fn stale_fetch_never_lands_after_reset() {
    let mut listing = Listing::new(options());
    assert!(listing.trigger_fetch(T0)); // due T0 + 1000
    let epoch_before = listing.epoch();

    listing.select_tab(Tab::All, T0 + 500); // due T0 + 1500
    assert_eq!(listing.epoch(), epoch_before + 1);

    // The pre-reset due time passes without anything landing.
    assert!(!listing.tick(T0 + 1000).unwrap());
    assert!(listing.cards().is_empty());
    assert_eq!(listing.page(), 1);

    assert!(listing.tick(T0 + 1500).unwrap());
    assert_eq!(listing.cards().len(), 10);
    assert_eq!(listing.issued_id_count(), 10);
    assert_eq!(listing.page(), 2);
}

#[test]
fn filter_change_resets_and_displayed_set_narrows() {
    let mut listing = Listing::new(options());
    let mut now = T0;
    complete_fetch(&mut listing, &mut now);
    complete_fetch(&mut listing, &mut now);

    listing.set_filter_type(Some(CardType::Burner), now);
    assert!(listing.cards().is_empty());
    assert!(listing.is_loading());

    now += 1000;
    assert!(listing.tick(now).unwrap());

    let mut visible = Vec::new();
    listing.collect_visible_cards(&mut visible);
    assert!(visible.iter().all(Card::is_burner));
    assert_eq!(visible.len(), listing.visible_count());
    assert!(visible.len() <= listing.cards().len());
}

#[test]
fn type_filter_narrows_even_a_mismatched_batch() {
    // Mismatched entry on purpose: even id with the wrong kind. The
    // render-time predicate narrows on the kind field, not the id.
    let cards = vec![
        card(2, "John", CardType::Burner),
        card(3, "Sarah", CardType::Subscription),
        card(4, "Emma", CardType::Subscription),
    ];
    let query = QueryState {
        filter_type: Some(CardType::Burner),
        ..Default::default()
    };
    let shown: Vec<_> = apply(&cards, &query).collect();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].id, 2);
}

#[test]
fn search_matches_case_insensitive_substrings() {
    let daniel = card(1, "Daniel", CardType::Subscription);
    let david = card(2, "David", CardType::Burner);
    let emma = card(3, "Emma", CardType::Subscription);

    assert!(matches(&daniel, "Da", None));
    assert!(matches(&david, "Da", None));
    assert!(!matches(&emma, "Da", None));
    assert!(matches(&daniel, "dA", None));
    assert!(matches(&emma, "", None));
}

#[test]
fn search_and_filter_compose_with_and() {
    let cards = vec![
        card(2, "Daniel", CardType::Burner),
        card(3, "David", CardType::Subscription),
        card(4, "Dana", CardType::Burner),
        card(6, "Emma", CardType::Burner),
    ];
    let query = QueryState {
        submitted_search: "da".to_string(),
        filter_type: Some(CardType::Burner),
        ..Default::default()
    };
    let shown: Vec<u32> = apply(&cards, &query).map(|c| c.id).collect();
    assert_eq!(shown, vec![2, 4]);
}

#[test]
fn search_applies_on_submit_and_leaves_records_alone() {
    let mut listing = Listing::new(options());
    let mut now = T0;
    complete_fetch(&mut listing, &mut now);
    complete_fetch(&mut listing, &mut now);
    let accumulated = listing.cards().len();
    let page = listing.page();

    // Typing alone changes nothing.
    listing.set_search_input("Da");
    assert_eq!(listing.visible_count(), accumulated);

    listing.submit_search();
    let expected = listing
        .cards()
        .iter()
        .filter(|c| c.name.to_lowercase().contains("da"))
        .count();
    assert_eq!(listing.visible_count(), expected);
    assert_eq!(listing.cards().len(), accumulated);
    assert_eq!(listing.page(), page);
    assert_eq!(listing.issued_id_count(), accumulated);
}

#[test]
fn submitted_search_survives_a_reset() {
    let mut listing = Listing::new(options());
    let mut now = T0;
    complete_fetch(&mut listing, &mut now);

    listing.set_search_input("da");
    listing.submit_search();
    listing.select_tab(Tab::All, now);
    assert_eq!(listing.submitted_search(), "da");

    now += 1000;
    listing.tick(now).unwrap();
    let expected = listing
        .cards()
        .iter()
        .filter(|c| c.name.to_lowercase().contains("da"))
        .count();
    assert_eq!(listing.visible_count(), expected);
}

#[test]
fn id_space_exhaustion_is_an_error_and_parks_the_listing() {
    // Capacity 5 cannot cover a batch of 10.
    let mut listing = Listing::new(options().with_id_space(6));
    assert!(listing.trigger_fetch(T0));
    let err = listing.tick(T0 + 1000).unwrap_err();
    assert_eq!(
        err,
        ListingError::IdSpaceExhausted {
            in_use: 5,
            capacity: 5
        }
    );
    assert!(!listing.has_more());
    assert!(listing.cards().is_empty());

    // A reset leaves the parked state like any other Exhausted exit.
    listing.select_tab(Tab::All, T0 + 2000);
    assert!(listing.is_loading());
    assert!(listing.has_more());
}

#[test]
fn dense_id_space_allocation_stays_unique_to_the_last_id() {
    // Capacity 20 holds exactly two batches; the second one runs almost
    // entirely on the free-set path.
    let mut listing = Listing::new(options().with_id_space(21));
    let mut now = T0;
    complete_fetch(&mut listing, &mut now);
    complete_fetch(&mut listing, &mut now);

    let ids: HashSet<u32> = listing.cards().iter().map(|c| c.id).collect();
    assert_eq!(ids, (1..21).collect::<HashSet<u32>>());

    assert!(listing.trigger_fetch(now));
    let err = listing.tick(now + 1000).unwrap_err();
    assert_eq!(
        err,
        ListingError::IdSpaceExhausted {
            in_use: 20,
            capacity: 20
        }
    );
}

#[test]
fn seeded_sessions_are_deterministic() {
    let run = |seed: u64| {
        let mut listing = Listing::new(ListingOptions::new().with_rng_seed(seed));
        let mut now = T0;
        for _ in 0..3 {
            complete_fetch(&mut listing, &mut now);
        }
        listing.cards().to_vec()
    };
    assert_eq!(run(42), run(42));
    assert_ne!(run(42), run(43));
}

#[test]
fn on_change_fires_per_update_and_batches() {
    let count = Arc::new(AtomicUsize::new(0));
    let loading_seen = Arc::new(AtomicBool::new(false));
    let (c, l) = (count.clone(), loading_seen.clone());
    let mut listing = Listing::new(options().with_on_change(Some(
        move |_listing: &Listing, loading: bool| {
            c.fetch_add(1, Ordering::SeqCst);
            if loading {
                l.store(true, Ordering::SeqCst);
            }
        },
    )));

    let base = count.load(Ordering::SeqCst);
    listing.trigger_fetch(T0);
    assert_eq!(count.load(Ordering::SeqCst), base + 1);
    assert!(loading_seen.load(Ordering::SeqCst));

    listing.tick(T0 + 1000).unwrap();
    assert_eq!(count.load(Ordering::SeqCst), base + 2);

    listing.batch_update(|listing| {
        listing.set_search_input("da");
        listing.submit_search();
    });
    assert_eq!(count.load(Ordering::SeqCst), base + 3);
}

#[test]
fn state_snapshots_track_the_session() {
    let mut listing = Listing::new(options());
    assert_eq!(
        listing.page_state(),
        PageState {
            page: 1,
            loading: false,
            has_more: true
        }
    );

    listing.trigger_fetch(T0);
    assert!(listing.page_state().loading);

    listing.tick(T0 + 1000).unwrap();
    listing.set_search_input("em");
    listing.submit_search();
    let state = listing.session_state();
    assert_eq!(state.tab, Tab::Your);
    assert_eq!(state.page.page, 2);
    assert!(!state.page.loading);
    assert!(state.page.has_more);
    assert_eq!(state.query.submitted_search, "em");
    assert_eq!(state.query.filter_type, None);
}

#[test]
fn visibility_subscription_unsubscribes_exactly_once() {
    let count = Arc::new(AtomicUsize::new(0));

    let c = count.clone();
    let sub = VisibilitySubscription::new(move || {
        c.fetch_add(1, Ordering::SeqCst);
    });
    drop(sub);
    assert_eq!(count.load(Ordering::SeqCst), 1);

    let c = count.clone();
    let sub = VisibilitySubscription::new(move || {
        c.fetch_add(1, Ordering::SeqCst);
    });
    sub.cancel();
    assert_eq!(count.load(Ordering::SeqCst), 2);

    drop(VisibilitySubscription::noop());
    assert_eq!(count.load(Ordering::SeqCst), 2);
}
