//! Stream classifications into run-scoped counters.

use rebuildstat_types::classification::{Classification, Status};
use rebuildstat_types::stats::RunStats;

/// Accumulates [`RunStats`] from the classification stream.
///
/// Counters only ever increase; there is no removal or recount. The
/// snapshot returned by [`finish`](Aggregator::finish) is the read-only
/// result embedded in the feed.
#[derive(Debug, Default)]
pub struct Aggregator {
    stats: RunStats,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one classification, in stream order.
    pub fn observe(&mut self, classification: &Classification) {
        self.stats.num_total += 1;
        if classification.up_to_date {
            self.stats.num_up_to_date += 1;
        }
        match classification.status {
            Status::Pass => self.stats.num_pass += 1,
            Status::Regression => self.stats.num_regressions += 1,
            Status::Fixed => self.stats.num_fixed += 1,
            Status::Missing => self.stats.num_missing += 1,
            Status::Old => self.stats.num_old += 1,
            Status::Failed => self.stats.num_failed += 1,
        }
    }

    /// Record a package excluded from classification by a wontfix note.
    pub fn record_suppressed(&mut self) {
        self.stats.num_suppressed += 1;
    }

    pub fn finish(self) -> RunStats {
        self.stats
    }
}
