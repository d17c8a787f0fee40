// Example: a scripted listing session driven by a manual clock.
use cardlist::{CardType, Listing, ListingError, ListingOptions};

fn main() -> Result<(), ListingError> {
    let mut listing = Listing::new(ListingOptions::new().with_rng_seed(7));
    let mut now = 1_700_000_000_000u64;

    for _ in 0..3 {
        listing.trigger_fetch(now);
        now += listing.options().fetch_delay_ms;
        listing.tick(now)?;
    }
    println!("page={} cards={}", listing.page(), listing.cards().len());

    listing.set_search_input("da");
    listing.submit_search();
    println!("matching \"da\": {}", listing.visible_count());

    listing.set_filter_type(Some(CardType::Burner), now);
    now += listing.options().fetch_delay_ms;
    listing.tick(now)?;
    listing.for_each_visible_card(|card| {
        println!("{} [{}] {}", card.name, card.card_type.label(), card.detail());
    });
    Ok(())
}
