//! The six-status decision table over a baseline/candidate package pair.

use crate::chroot::{self, CombinedState};
use crate::nvr;
use rebuildstat_types::classification::{Classification, Status};
use rebuildstat_types::notes::Note;
use rebuildstat_types::package::PackageRecord;
use std::cmp::Ordering;

/// Classify one package pair.
///
/// Combined states are recomputed from the chroot maps; a combined state
/// of `missing` counts as not-passing on either side. The decision table:
///
/// | baseline | candidate        | up-to-date | status     |
/// |----------|------------------|------------|------------|
/// | failed   | absent           | -          | FAILED     |
/// | passed   | absent           | -          | MISSING    |
/// | passed   | present, failing | -          | REGRESSION |
/// | failed   | present, failing | -          | FAILED     |
/// | any      | present, passing | no         | OLD        |
/// | failed   | present, passing | yes        | FIXED      |
/// | passed   | present, passing | yes        | PASS       |
///
/// REGRESSION is reported only for the strict pass-to-fail transition.
/// Up-to-date means the candidate passed and its version compares equal
/// or newer than the baseline's (unparsable versions sort older, see
/// [`nvr::compare_raw`]).
pub fn classify(
    baseline: &PackageRecord,
    candidate: Option<&PackageRecord>,
    note: Option<Note>,
) -> Classification {
    let baseline_passed = chroot::combine(&baseline.chroots).passed();

    let (status, up_to_date) = match candidate {
        None => {
            let status = if baseline_passed {
                Status::Missing
            } else {
                Status::Failed
            };
            (status, false)
        }
        Some(candidate) => {
            let candidate_passed = chroot::combine(&candidate.chroots) == CombinedState::Succeeded;
            let up_to_date = candidate_passed
                && nvr::compare_raw(candidate.nvr.as_deref(), baseline.nvr.as_deref())
                    != Ordering::Less;

            let status = if !candidate_passed {
                if baseline_passed {
                    Status::Regression
                } else {
                    Status::Failed
                }
            } else if !up_to_date {
                Status::Old
            } else if baseline_passed {
                Status::Pass
            } else {
                Status::Fixed
            };
            (status, up_to_date)
        }
    };

    Classification {
        package_name: baseline.name.clone(),
        status,
        up_to_date,
        baseline_nvr: baseline.nvr.clone(),
        candidate_nvr: candidate.and_then(|pkg| pkg.nvr.clone()),
        note,
        build_link: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rebuildstat_types::package::{BuildState, ChrootRecord};

    fn package(name: &str, nvr: Option<&str>, states: &[(&str, BuildState)]) -> PackageRecord {
        let mut pkg = PackageRecord::new(name);
        pkg.nvr = nvr.map(str::to_string);
        pkg.chroots = states
            .iter()
            .map(|(id, state)| {
                (
                    id.to_string(),
                    ChrootRecord {
                        state: *state,
                        build_id: None,
                        url_build_log: None,
                    },
                )
            })
            .collect();
        pkg
    }

    fn passing(name: &str, nvr: &str) -> PackageRecord {
        package(name, Some(nvr), &[("fedora-38-x86_64", BuildState::Succeeded)])
    }

    fn failing(name: &str, nvr: &str) -> PackageRecord {
        package(name, Some(nvr), &[("fedora-38-x86_64", BuildState::Failed)])
    }

    #[test]
    fn baseline_failed_candidate_absent_is_failed() {
        let result = classify(&failing("pkg", "pkg-1.0-1"), None, None);
        assert_eq!(result.status, Status::Failed);
        assert!(!result.up_to_date);
    }

    #[test]
    fn baseline_passed_candidate_absent_is_missing() {
        let result = classify(&passing("pkg", "pkg-1.0-1"), None, None);
        assert_eq!(result.status, Status::Missing);
    }

    #[test]
    fn pass_to_fail_is_regression() {
        let result = classify(
            &passing("pkg", "pkg-1.0-1"),
            Some(&failing("pkg", "pkg-1.0-1")),
            None,
        );
        assert_eq!(result.status, Status::Regression);
    }

    #[test]
    fn fail_to_fail_is_failed_not_regression() {
        let result = classify(
            &failing("pkg", "pkg-1.0-1"),
            Some(&failing("pkg", "pkg-1.0-1")),
            None,
        );
        assert_eq!(result.status, Status::Failed);
    }

    #[test]
    fn candidate_passing_but_older_is_old() {
        let result = classify(
            &failing("pkg", "pkg-2.0-1.fc38"),
            Some(&passing("pkg", "pkg-1.9-1.fc38")),
            None,
        );
        assert_eq!(result.status, Status::Old);
        assert!(!result.up_to_date);
    }

    #[test]
    fn fail_to_pass_up_to_date_is_fixed() {
        let result = classify(
            &failing("pkg", "pkg-1.0-1.fc38"),
            Some(&passing("pkg", "pkg-1.0-1.fc39")),
            None,
        );
        assert_eq!(result.status, Status::Fixed);
        assert!(result.up_to_date);
    }

    #[test]
    fn pass_to_pass_up_to_date_is_pass() {
        let result = classify(
            &passing("pkg", "pkg-1.0-1.fc38"),
            Some(&passing("pkg", "pkg-1.1-1.fc38")),
            None,
        );
        assert_eq!(result.status, Status::Pass);
        assert!(result.up_to_date);
    }

    #[test]
    fn candidate_with_no_real_builds_counts_as_failing() {
        let empty = package("pkg", Some("pkg-1.0-1"), &[]);
        let result = classify(&passing("pkg", "pkg-1.0-1"), Some(&empty), None);
        assert_eq!(result.status, Status::Regression);

        let missing_only = package(
            "pkg",
            Some("pkg-1.0-1"),
            &[("fedora-38-x86_64", BuildState::Missing)],
        );
        let result = classify(&failing("pkg", "pkg-1.0-1"), Some(&missing_only), None);
        assert_eq!(result.status, Status::Failed);
    }

    #[test]
    fn unparsable_candidate_version_is_never_up_to_date() {
        let mut candidate = passing("pkg", "pkg-1.0-1");
        candidate.nvr = Some("not an nvr".to_string());
        let result = classify(&passing("pkg", "pkg-1.0-1.fc38"), Some(&candidate), None);
        assert_eq!(result.status, Status::Old);
        assert!(!result.up_to_date);
    }

    #[test]
    fn missing_versions_on_both_sides_compare_equal() {
        let baseline = package("pkg", None, &[("a", BuildState::Succeeded)]);
        let candidate = package("pkg", None, &[("a", BuildState::Succeeded)]);
        let result = classify(&baseline, Some(&candidate), None);
        assert_eq!(result.status, Status::Pass);
        assert!(result.up_to_date);
    }

    #[test]
    fn note_is_carried_through() {
        let note = Note::willfix("patch queued");
        let result = classify(
            &passing("pkg", "pkg-1.0-1"),
            Some(&failing("pkg", "pkg-1.0-1")),
            Some(note.clone()),
        );
        assert_eq!(result.note, Some(note));
        assert_eq!(result.status, Status::Regression);
    }
}
