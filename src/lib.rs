//! A headless pagination engine for infinite-scroll card listings.
//!
//! For the sentinel/visibility wiring, see the `cardlist-adapter` crate.
//!
//! This crate models exactly one listing screen's interaction state: a
//! bounded, append-only sequence of synthetic card records grown one batch at
//! a time, with tab switching, submitted substring search, and type
//! filtering layered on top. The only nontrivial content is the fetch state
//! machine: how scroll-triggered fetches, tab/filter resets, and simulated
//! network latency interact without duplicate identifiers or stale results.
//!
//! It is UI-agnostic. A UI layer is expected to provide:
//! - sentinel-visibility events (when the end-of-list marker scrolls into view)
//! - a clock, passed as `now_ms` to [`Listing::tick`] and the event methods
//! - rendering for the visible card set and state snapshots
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod error;
mod filter;
mod generator;
mod listing;
mod options;
mod state;
mod types;
mod visibility;

#[cfg(test)]
mod tests;

pub use error::ListingError;
pub use filter::{apply, matches};
pub use listing::Listing;
pub use options::{ListingOptions, OnChangeCallback};
pub use state::{PageState, QueryState, SessionState};
pub use types::{Card, CardType, FetchPhase, Tab};
pub use visibility::{VisibilityCallback, VisibilitySource, VisibilitySubscription};
