use serde::{Deserialize, Serialize};

/// Per-chroot transition between two generations of the same package.
///
/// Ordered by priority: a higher-priority observation never loses to a
/// later lower-priority one when chroot diffs are folded together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateChange {
    Same,
    Changed,
    Fixed,
    Regression,
}

impl StateChange {
    /// Human-readable description used in todo reports.
    pub fn label(self) -> &'static str {
        match self {
            StateChange::Same => "Same results",
            StateChange::Changed => "Something has changed, verify the builds",
            StateChange::Fixed => "Fixed",
            StateChange::Regression => "Regression",
        }
    }
}

/// One row of the todo report: a package pair and how its build outcome
/// moved between the generations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoEntry {
    pub package_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_version: Option<String>,

    pub change: StateChange,
}
