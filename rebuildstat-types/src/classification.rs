use crate::notes::Note;
use serde::{Deserialize, Serialize};

/// Outcome status for one package pair.
///
/// This is a closed set: every classified package gets exactly one of
/// these, never an absent status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Baseline passed, candidate failed.
    Regression,
    /// No candidate counterpart exists.
    Missing,
    /// Candidate passed but is older than the baseline.
    Old,
    /// Baseline failed, candidate passed with an up-to-date version.
    Fixed,
    /// Failed on both sides, or failed with no counterpart to blame.
    Failed,
    /// Passed on both sides, up to date.
    Pass,
}

impl Status {
    /// Uppercase label used in human-readable output.
    pub fn label(self) -> &'static str {
        match self {
            Status::Regression => "REGRESSION",
            Status::Missing => "MISSING",
            Status::Old => "OLD",
            Status::Fixed => "FIXED",
            Status::Failed => "FAILED",
            Status::Pass => "PASS",
        }
    }
}

/// The classification produced for one package pair, exactly once per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub package_name: String,
    pub status: Status,

    /// Candidate version equal or newer than baseline, and candidate passed.
    pub up_to_date: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_nvr: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_nvr: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<Note>,

    /// Link to the candidate build, when the source can construct one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_link: Option<String>,
}
