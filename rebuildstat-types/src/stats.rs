use serde::{Deserialize, Serialize};

/// Run-scoped counters, accumulated additively while classifications
/// stream through the aggregator and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Classifications produced (suppressed packages are not counted here).
    #[serde(default)]
    pub num_total: u64,

    #[serde(default)]
    pub num_pass: u64,

    #[serde(default)]
    pub num_regressions: u64,

    #[serde(default)]
    pub num_fixed: u64,

    #[serde(default)]
    pub num_missing: u64,

    #[serde(default)]
    pub num_old: u64,

    #[serde(default)]
    pub num_failed: u64,

    #[serde(default)]
    pub num_up_to_date: u64,

    /// Packages excluded from classification by a wontfix note.
    #[serde(default)]
    pub num_suppressed: u64,
}
