use std::collections::HashSet;

use chrono::{DateTime, Months, Utc};
use rand::Rng;
use rand::rngs::SmallRng;

use crate::error::ListingError;
use crate::options::ListingOptions;
use crate::types::{Card, CardType};

pub(crate) const BURNER_NAMES: [&str; 5] = ["John", "Emily", "Michael", "Emma", "Daniel"];
pub(crate) const SUBSCRIPTION_NAMES: [&str; 5] = ["Sarah", "David", "Olivia", "Jacob", "Sophia"];

/// Draw attempts before rejection sampling gives up and falls back to the
/// free-set path.
const REJECTION_RETRY_BUDGET: u32 = 64;

/// Produces one batch of `options.batch_size` cards.
///
/// Identifier-registry mutation is the caller's responsibility: `issued` is
/// read-only here, and uniqueness within the batch itself is tracked
/// internally.
pub(crate) fn generate_batch(
    rng: &mut SmallRng,
    options: &ListingOptions,
    issued: &HashSet<u32>,
    now_ms: u64,
) -> Result<Vec<Card>, ListingError> {
    let mut cards = Vec::with_capacity(options.batch_size);
    let mut taken = HashSet::with_capacity(options.batch_size);

    for position in 0..options.batch_size {
        let id = draw_id(rng, options.id_space, issued, &taken)?;
        taken.insert(id);

        // Name pool alternates by batch position; card type follows id
        // parity. The two do not correlate.
        let pool = if position % 2 == 0 {
            &options.burner_names
        } else {
            &options.subscription_names
        };
        let name = if pool.is_empty() {
            String::new()
        } else {
            pool[rng.random_range(0..pool.len())].clone()
        };

        cards.push(Card {
            id,
            name,
            card_type: CardType::from_id(id),
            expiry: expiry_one_year_ahead(now_ms),
            limit: rng.random_range(1..=options.limit_max),
            owner_id: rng.random_range(1..options.owner_space),
        });
    }

    Ok(cards)
}

/// Allocates one unused id from `[1, id_space)`.
///
/// Rejection sampling only while the space is less than half consumed; past
/// that (or once the retry budget is burned) the draw comes from the
/// enumerated free set, which cannot starve.
fn draw_id(
    rng: &mut SmallRng,
    id_space: u32,
    issued: &HashSet<u32>,
    taken: &HashSet<u32>,
) -> Result<u32, ListingError> {
    let capacity = id_space.saturating_sub(1) as usize;
    let in_use = issued.len() + taken.len();
    if in_use >= capacity {
        return Err(ListingError::IdSpaceExhausted { in_use, capacity });
    }

    if in_use * 2 < capacity {
        for _ in 0..REJECTION_RETRY_BUDGET {
            let candidate = rng.random_range(1..id_space);
            if !issued.contains(&candidate) && !taken.contains(&candidate) {
                return Ok(candidate);
            }
        }
    }

    ldebug!(in_use, capacity, "id allocation via free set");
    let free: Vec<u32> = (1..id_space)
        .filter(|id| !issued.contains(id) && !taken.contains(id))
        .collect();
    if free.is_empty() {
        return Err(ListingError::IdSpaceExhausted { in_use, capacity });
    }
    Ok(free[rng.random_range(0..free.len())])
}

/// Calendar date exactly one year ahead of `now_ms`, formatted `M/D/YYYY`.
///
/// Feb 29 clamps to Feb 28 of the following year.
fn expiry_one_year_ahead(now_ms: u64) -> String {
    let now = DateTime::<Utc>::from_timestamp_millis(now_ms as i64).unwrap_or_default();
    let today = now.date_naive();
    let expiry = today.checked_add_months(Months::new(12)).unwrap_or(today);
    expiry.format("%-m/%-d/%Y").to_string()
}
