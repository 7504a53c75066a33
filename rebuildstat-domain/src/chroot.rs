//! Reduce per-chroot build records into a single combined state, and diff
//! two chroot maps against each other.
//!
//! Both operations are explicit priority scans: `failed > succeeded >
//! missing` for [`combine`], `regression > fixed > changed > same` for
//! [`diff`]. Early exit is allowed only on the highest-priority state, so
//! iteration order never changes the result.

use rebuildstat_types::package::{BuildState, ChrootRecord};
use std::collections::BTreeMap;

pub use rebuildstat_types::change::StateChange;

/// Single status summarizing all chroots of one package.
///
/// Always recomputed from the chroot map; never stored on a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombinedState {
    Succeeded,
    Failed,
    Missing,
}

impl CombinedState {
    pub fn passed(self) -> bool {
        self == CombinedState::Succeeded
    }
}

/// Combine all chroot states of one package.
///
/// A single `failed` chroot dominates and short-circuits. One `succeeded`
/// chroot makes the package `Succeeded` unless a later `failed` shows up.
/// `missing` only sets the default and never overwrites `succeeded`;
/// `running` chroots are not counted. An empty or all-`running` map falls
/// back to `Failed`: a package with no definite outcome is not treated as
/// passing.
pub fn combine(chroots: &BTreeMap<String, ChrootRecord>) -> CombinedState {
    let mut state: Option<CombinedState> = None;
    for record in chroots.values() {
        match record.state {
            BuildState::Failed => return CombinedState::Failed,
            BuildState::Succeeded => state = Some(CombinedState::Succeeded),
            BuildState::Missing => {
                if state.is_none() {
                    state = Some(CombinedState::Missing);
                }
            }
            BuildState::Running => {}
        }
    }
    state.unwrap_or(CombinedState::Failed)
}

/// Diff two chroot maps chroot-by-chroot.
///
/// Only chroot ids present in both maps are compared; one-sided ids are
/// skipped. `succeeded -> failed` in any chroot is a `Regression` and
/// stops the scan; `failed -> succeeded` raises the provisional result to
/// `Fixed`; any other differing pair raises it to at least `Changed`.
pub fn diff(
    baseline: &BTreeMap<String, ChrootRecord>,
    candidate: &BTreeMap<String, ChrootRecord>,
) -> StateChange {
    let mut change = StateChange::Same;
    for (chroot_id, rec_a) in baseline {
        let Some(rec_b) = candidate.get(chroot_id) else {
            continue;
        };
        let observed = match (rec_a.state, rec_b.state) {
            (a, b) if a == b => StateChange::Same,
            (BuildState::Succeeded, BuildState::Failed) => return StateChange::Regression,
            (BuildState::Failed, BuildState::Succeeded) => StateChange::Fixed,
            _ => StateChange::Changed,
        };
        change = change.max(observed);
    }
    change
}
