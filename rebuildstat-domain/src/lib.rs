//! Deterministic decision engine for rebuildstat.
//!
//! Everything in this crate is a pure function over in-memory records:
//! no I/O, no blocking, no shared mutable state between packages. The
//! pipeline in `rebuildstat-core` feeds it already-resolved snapshots.
//!
//! - [`chroot`] — reduce per-chroot build records to one combined state,
//!   and diff two chroot maps.
//! - [`nvr`] — parse and compare name-version-release strings.
//! - [`classify`] — the six-status decision table over a package pair.
//! - [`stats`] — stream classifications into run counters.

pub mod chroot;
pub mod classify;
pub mod nvr;
pub mod stats;

pub use chroot::{CombinedState, StateChange, combine, diff};
pub use classify::classify;
pub use nvr::{Nvr, NvrParseError};
pub use stats::Aggregator;
