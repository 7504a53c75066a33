//! Rendering helpers (markdown) for human-readable status reports.

use rebuildstat_types::change::TodoEntry;
use rebuildstat_types::classification::Classification;
use rebuildstat_types::wire::FeedV1;

pub fn render_report_md(feed: &FeedV1) -> String {
    let mut out = String::new();
    out.push_str("# rebuild status\n\n");
    out.push_str(&format!("- Generated: {}\n", feed.generated_at));
    if let Some(os_version) = &feed.os_version {
        out.push_str(&format!("- OS version: {}\n", os_version));
    }

    let stats = &feed.stats;
    out.push_str(&format!(
        "- Packages: {} (pass {}, regressions {}, fixed {}, missing {}, old {}, failed {})\n",
        stats.num_total,
        stats.num_pass,
        stats.num_regressions,
        stats.num_fixed,
        stats.num_missing,
        stats.num_old,
        stats.num_failed
    ));
    out.push_str(&format!("- Up to date: {}\n", stats.num_up_to_date));
    if stats.num_suppressed > 0 {
        out.push_str(&format!("- Suppressed (wontfix): {}\n", stats.num_suppressed));
    }
    out.push('\n');

    if feed.notes_degraded {
        out.push_str("> **Notes unavailable** — the notes source failed to load; this report was generated without manual overrides.\n\n");
    }

    out.push_str("## Packages\n\n");
    if feed.packages.is_empty() {
        out.push_str("_No packages classified._\n");
        return out;
    }

    out.push_str("| Package | Status | Baseline | Candidate | Note |\n");
    out.push_str("|---|---|---|---|---|\n");
    for classification in &feed.packages {
        out.push_str(&render_row(classification));
    }

    out
}

/// Render the todo dashboard: per-package state transitions between the
/// two generations, for rebuild triage.
pub fn render_todo_md(entries: &[TodoEntry]) -> String {
    let mut out = String::new();
    out.push_str("# mass rebuild TODO\n\n");

    if entries.is_empty() {
        out.push_str("_No package pairs to triage._\n");
        return out;
    }

    if let Some(os_version) = entries.iter().find_map(|e| e.os_version.as_deref()) {
        out.push_str(&format!("- OS version: {}\n\n", os_version));
    }

    out.push_str("| Package | Change |\n");
    out.push_str("|---|---|\n");
    for entry in entries {
        out.push_str(&format!(
            "| {} | {} |\n",
            entry.package_name,
            entry.change.label()
        ));
    }

    out
}

fn render_row(c: &Classification) -> String {
    let candidate = match (&c.candidate_nvr, &c.build_link) {
        (Some(nvr), Some(link)) => format!("[{}]({})", nvr, link),
        (Some(nvr), None) => nvr.clone(),
        (None, Some(link)) => format!("[build]({})", link),
        (None, None) => "-".to_string(),
    };

    let note = c
        .note
        .as_ref()
        .and_then(|note| note.text.as_deref())
        .unwrap_or("");

    format!(
        "| {} | {} | {} | {} | {} |\n",
        c.package_name,
        c.status.label(),
        c.baseline_nvr.as_deref().unwrap_or("-"),
        candidate,
        note
    )
}
