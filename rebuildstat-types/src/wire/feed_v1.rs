use crate::classification::Classification;
use crate::stats::RunStats;
use serde::{Deserialize, Serialize};

/// Schema-exact wire representation of rebuildstat.feed.v1.
///
/// An ordered sequence of classification records plus the final stats
/// snapshot, handed to external renderers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedV1 {
    pub schema: String,

    /// RFC 3339 timestamp of feed generation.
    pub generated_at: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_version: Option<String>,

    /// True when the notes source failed to load and classification ran
    /// with an empty notes set.
    #[serde(default)]
    pub notes_degraded: bool,

    #[serde(default)]
    pub packages: Vec<Classification>,

    #[serde(default)]
    pub stats: RunStats,
}
