//! Wire-level (schema-exact) representations of serialized artifacts.
//!
//! The feed consumed by external renderers is versioned: any shape change
//! requires a new `feed_vN` module, never an edit to an existing one.

pub mod feed_v1;

pub use feed_v1::FeedV1;
