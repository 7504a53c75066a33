//! Shared DTOs (schemas-as-code) for the rebuildstat workspace.
//!
//! # Design constraints
//! - These types are intended to be serialized to disk (the status feed).
//! - Be conservative with breaking changes.
//! - Prefer adding optional fields over changing semantics.

pub mod change;
pub mod classification;
pub mod notes;
pub mod package;
pub mod stats;
pub mod wire;

/// Schema identifiers.
pub mod schema {
    pub const REBUILDSTAT_FEED_V1: &str = "rebuildstat.feed.v1";
}
