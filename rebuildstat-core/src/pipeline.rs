//! The report pipeline, extracted from the CLI.
//!
//! The entry points are I/O-agnostic: package records come in through
//! `BuildSource`, notes through `NotesPort`, artifacts go out through
//! `WritePort`. The pipeline itself is single-threaded and synchronous
//! over data already resident in memory.

use crate::ports::{NotesPort, WritePort};
use crate::settings::ReportSettings;
use anyhow::Context;
use chrono::Utc;
use rebuildstat_domain::chroot::{self, CombinedState};
use rebuildstat_domain::{Aggregator, classify};
use rebuildstat_notes::NotesOverlay;
use rebuildstat_render::{render_report_md, render_todo_md};
use rebuildstat_snapshots::{
    BuildSource, PackagePair, fill_missing_chroots, os_version_from_chroot,
};
use rebuildstat_types::change::TodoEntry;
use rebuildstat_types::classification::Classification;
use rebuildstat_types::package::PackageRecord;
use rebuildstat_types::stats::RunStats;
use rebuildstat_types::wire::FeedV1;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Error type for pipeline results. Exit code 2 = skipped run, 1 = tool
/// error; the CLI owns the mapping, the core never exits the process.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// Both input package sets were empty. Fatal: no report is produced.
    #[error("empty input: no packages in either generation")]
    EmptyInput,

    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

/// Outcome of `run_report`: the ordered classification feed plus the
/// finalized counters.
#[derive(Debug, Clone)]
pub struct ReportOutcome {
    pub classifications: Vec<Classification>,
    pub stats: RunStats,
    pub notes_degraded: bool,
    pub os_version: Option<String>,
    pub baseline_label: String,
    pub candidate_label: String,
}

/// Run the report pipeline over two generations of package records.
///
/// Walks the baseline set in name order, pairs each package with its
/// candidate counterpart, and classifies the pair. Packages with a
/// `wontfix` note whose candidate build failed are suppressed before
/// classification. A notes load failure degrades to an empty overlay and
/// flags the run; it never aborts it.
pub fn run_report(
    settings: &ReportSettings,
    baseline: &dyn BuildSource,
    candidate: &dyn BuildSource,
    notes: &dyn NotesPort,
) -> Result<ReportOutcome, RunError> {
    let baseline_pkgs = baseline
        .list_packages()
        .with_context(|| format!("list packages for {}", baseline.label()))?;
    let candidate_pkgs = candidate
        .list_packages()
        .with_context(|| format!("list packages for {}", candidate.label()))?;

    if baseline_pkgs.is_empty() && candidate_pkgs.is_empty() {
        return Err(RunError::EmptyInput);
    }

    let overlay = match notes.load_notes() {
        Ok(overlay) => overlay,
        Err(err) => {
            warn!(error = %err, "notes unavailable, continuing without overrides");
            NotesOverlay::empty_degraded()
        }
    };

    let candidate_by_name: BTreeMap<&str, &PackageRecord> = candidate_pkgs
        .iter()
        .map(|pkg| (pkg.name.as_str(), pkg))
        .collect();

    let os_version = settings.os_version.clone().or_else(|| {
        candidate_pkgs
            .iter()
            .flat_map(|pkg| pkg.chroots.keys())
            .next()
            .and_then(|chroot_id| os_version_from_chroot(chroot_id))
    });

    let mut aggregator = Aggregator::new();
    let mut classifications = Vec::new();

    for pkg in &baseline_pkgs {
        if settings.exclude.iter().any(|name| name == &pkg.name) {
            debug!(package = %pkg.name, "excluded from report");
            continue;
        }

        let counterpart = candidate_by_name.get(pkg.name.as_str()).copied();

        if overlay.is_wontfix(&pkg.name)
            && counterpart
                .is_some_and(|other| chroot::combine(&other.chroots) == CombinedState::Failed)
        {
            debug!(package = %pkg.name, "failing package suppressed by wontfix note");
            aggregator.record_suppressed();
            continue;
        }

        let note = overlay.get(&pkg.name).cloned();
        let mut classification = classify(pkg, counterpart, note);
        if let Some(counterpart) = counterpart {
            classification.build_link = candidate.build_link(counterpart);
        }

        aggregator.observe(&classification);
        classifications.push(classification);
    }

    Ok(ReportOutcome {
        classifications,
        stats: aggregator.finish(),
        notes_degraded: overlay.degraded(),
        os_version,
        baseline_label: baseline.label().to_string(),
        candidate_label: candidate.label().to_string(),
    })
}

/// Write the feed and the markdown report to the output directory.
pub fn write_report_artifacts(
    outcome: &ReportOutcome,
    out_dir: &camino::Utf8Path,
    writer: &dyn WritePort,
) -> anyhow::Result<()> {
    writer.create_dir_all(out_dir)?;

    let feed = feed_from_outcome(outcome);
    let feed_json = serde_json::to_string_pretty(&feed).context("serialize feed")?;
    writer.write_file(&out_dir.join("feed.json"), feed_json.as_bytes())?;

    let report_md = render_report_md(&feed);
    writer.write_file(&out_dir.join("report.md"), report_md.as_bytes())?;

    Ok(())
}

/// Compute per-package state transitions for the todo flow.
///
/// Both sides of each pair are padded with `missing`-state chroots over
/// the union of their chroot ids before diffing, so a build absent on one
/// side reads as a transition instead of being skipped.
pub fn run_todo(pairs: &BTreeMap<String, PackagePair>) -> Vec<TodoEntry> {
    let mut entries = Vec::new();
    for pair in pairs.values() {
        let mut builds_a = pair.builds_a.clone();
        let mut builds_b = pair.builds_b.clone();

        let chroot_ids: Vec<String> = builds_a
            .chroots
            .keys()
            .chain(builds_b.chroots.keys())
            .cloned()
            .collect();
        fill_missing_chroots(&mut builds_a, chroot_ids.iter().map(String::as_str));
        fill_missing_chroots(&mut builds_b, chroot_ids.iter().map(String::as_str));

        entries.push(TodoEntry {
            package_name: pair.name.clone(),
            os_version: pair.os_version.clone(),
            change: chroot::diff(&builds_a.chroots, &builds_b.chroots),
        });
    }
    entries
}

/// Write the todo dashboard to the output directory.
pub fn write_todo_artifacts(
    entries: &[TodoEntry],
    out_dir: &camino::Utf8Path,
    writer: &dyn WritePort,
) -> anyhow::Result<()> {
    writer.create_dir_all(out_dir)?;
    let todo_md = render_todo_md(entries);
    writer.write_file(&out_dir.join("todo.md"), todo_md.as_bytes())?;
    Ok(())
}

pub(crate) fn feed_from_outcome(outcome: &ReportOutcome) -> FeedV1 {
    FeedV1 {
        schema: rebuildstat_types::schema::REBUILDSTAT_FEED_V1.to_string(),
        generated_at: Utc::now().to_rfc3339(),
        os_version: outcome.os_version.clone(),
        notes_degraded: outcome.notes_degraded,
        packages: outcome.classifications.clone(),
        stats: outcome.stats.clone(),
    }
}
