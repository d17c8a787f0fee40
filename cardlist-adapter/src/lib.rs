//! Adapter utilities for the `cardlist` crate.
//!
//! The `cardlist` crate is UI-agnostic and focuses on the pagination state
//! machine. This crate provides the small, framework-neutral glue an
//! embedding usually needs:
//!
//! - A [`Controller`] that owns the listing plus the sentinel-visibility
//!   subscription, and advances both from a single `tick(now_ms)` call
//! - A [`TriggerFlag`] latch for routing visibility callbacks onto the
//!   embedder's event loop
//!
//! This crate is intentionally framework-agnostic (no DOM/TUI bindings).
#![forbid(unsafe_code)]

mod controller;
mod trigger;


pub use controller::Controller;
pub use trigger::TriggerFlag;
