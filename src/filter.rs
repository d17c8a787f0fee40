use crate::state::QueryState;
use crate::types::{Card, CardType};

/// Returns whether `card` survives the submitted search term and the type
/// filter. The two predicates compose by AND; an empty term or `None` filter
/// passes everything.
///
/// The search is a case-insensitive substring match on the card name. The
/// type filter narrows to an exact kind match even when the underlying batch
/// contains mismatched entries.
pub fn matches(card: &Card, submitted_search: &str, filter_type: Option<CardType>) -> bool {
    if let Some(kind) = filter_type {
        if card.card_type != kind {
            return false;
        }
    }
    if submitted_search.is_empty() {
        return true;
    }
    card.name
        .to_lowercase()
        .contains(&submitted_search.to_lowercase())
}

/// Applies `query` to an accumulated card slice, yielding the displayed
/// subset in insertion order. The slice itself is never mutated; search and
/// filtering are render-time views over the full accumulated set.
pub fn apply<'a>(cards: &'a [Card], query: &'a QueryState) -> impl Iterator<Item = &'a Card> {
    cards
        .iter()
        .filter(move |card| matches(card, &query.submitted_search, query.filter_type))
}
