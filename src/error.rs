/// Errors surfaced by the listing engine.
///
/// There is no fallible I/O in this system; the only failure class is
/// running out of identifiers in the bounded id space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ListingError {
    /// Every identifier in the id space is already issued, so a batch cannot
    /// be generated without violating uniqueness.
    #[error("card id space exhausted ({in_use} of {capacity} ids in use)")]
    IdSpaceExhausted { in_use: usize, capacity: usize },
}
