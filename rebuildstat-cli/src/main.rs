mod config;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use config::{DEFAULT_COPR_URL, DEFAULT_KOJI_WEB_URL, SourceKind};
use rebuildstat_core::adapters::{FsNotesPort, FsWritePort, InMemoryNotesPort};
use rebuildstat_core::ports::NotesPort;
use rebuildstat_core::{
    ReportSettings, RunError, run_report, run_todo, write_report_artifacts, write_todo_artifacts,
};
use rebuildstat_snapshots::{BuildSource, CoprSnapshotSource, KojiSnapshotSource, load_pairs};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "rebuildstat",
    version,
    about = "Build-status comparison reports across two package collection generations."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Classify every package pair and write the feed and report.
    Report(ReportArgs),
    /// Render the rebuild triage dashboard from a paired packages file.
    Todo(TodoArgs),
}

#[derive(Debug, Parser)]
struct ReportArgs {
    /// Config file (default: ./rebuildstat.toml when present).
    #[arg(long)]
    config: Option<Utf8PathBuf>,

    /// Baseline snapshot JSON (overrides the config file).
    #[arg(long)]
    baseline: Option<Utf8PathBuf>,

    /// Candidate snapshot JSON (overrides the config file).
    #[arg(long)]
    candidate: Option<Utf8PathBuf>,

    /// Service family of the baseline snapshot.
    #[arg(long, value_enum)]
    baseline_kind: Option<SourceKind>,

    /// Service family of the candidate snapshot.
    #[arg(long, value_enum)]
    candidate_kind: Option<SourceKind>,

    /// Notes TOML file with willfix/wontfix overrides.
    #[arg(long)]
    notes: Option<Utf8PathBuf>,

    /// Output directory for feed.json and report.md.
    #[arg(long)]
    out_dir: Option<Utf8PathBuf>,

    /// Package names to exclude (repeatable; extends the config file).
    #[arg(long)]
    exclude: Vec<String>,

    /// OS version label for the report.
    #[arg(long)]
    os_version: Option<String>,
}

#[derive(Debug, Parser)]
struct TodoArgs {
    /// Paired packages JSON (`{<name>: {builds_a, builds_b, ...}}`).
    #[arg(long)]
    pairs: Utf8PathBuf,

    /// Output directory for todo.md.
    #[arg(long, default_value = "report")]
    out_dir: Utf8PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match real_main() {
        Ok(code) => code,
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(1)
        }
    }
}

fn real_main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Report(args) => cmd_report(args),
        Command::Todo(args) => cmd_todo(args),
    }
}

fn cmd_todo(args: TodoArgs) -> anyhow::Result<ExitCode> {
    let pairs = load_pairs(&args.pairs)?;
    let entries = run_todo(&pairs);
    write_todo_artifacts(&entries, &args.out_dir, &FsWritePort)?;

    info!(
        "wrote todo dashboard for {} package pairs to {}",
        entries.len(),
        args.out_dir
    );
    Ok(ExitCode::SUCCESS)
}

fn cmd_report(args: ReportArgs) -> anyhow::Result<ExitCode> {
    let file_config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => config::load_or_default(Utf8Path::new(".")).context("load rebuildstat.toml")?,
    };

    let baseline = make_source(
        "baseline",
        &file_config.baseline,
        args.baseline.as_ref(),
        args.baseline_kind,
    )?;
    let candidate = make_source(
        "candidate",
        &file_config.candidate,
        args.candidate.as_ref(),
        args.candidate_kind,
    )?;

    let mut exclude = file_config.report.exclude.clone();
    exclude.extend(args.exclude.iter().cloned());

    let settings = ReportSettings {
        out_dir: args
            .out_dir
            .or(file_config.report.out_dir)
            .unwrap_or_else(|| Utf8PathBuf::from("report")),
        exclude,
        os_version: args.os_version.or(file_config.report.os_version),
    };

    let notes_path = args.notes.or(file_config.notes.path);
    let notes: Box<dyn NotesPort> = match notes_path {
        Some(path) => Box::new(FsNotesPort::new(path)),
        None => Box::new(InMemoryNotesPort::default()),
    };

    let outcome = match run_report(
        &settings,
        baseline.as_ref(),
        candidate.as_ref(),
        notes.as_ref(),
    ) {
        Ok(outcome) => outcome,
        Err(RunError::EmptyInput) => {
            error!("both package sets are empty; skipping run, no report written");
            return Ok(ExitCode::from(2));
        }
        Err(RunError::Internal(e)) => return Err(e),
    };

    write_report_artifacts(&outcome, &settings.out_dir, &FsWritePort)?;

    info!(
        "classified {} packages ({} regressions, {} fixed, {} missing), wrote report to {}",
        outcome.stats.num_total,
        outcome.stats.num_regressions,
        outcome.stats.num_fixed,
        outcome.stats.num_missing,
        settings.out_dir
    );
    if outcome.notes_degraded {
        info!("report flagged as degraded: notes were unavailable");
    }

    Ok(ExitCode::SUCCESS)
}

/// Build one generation's source from the config section plus CLI
/// overrides.
///
/// When no kind is given anywhere, COPR coordinates in the config imply
/// a COPR source; otherwise the snapshot is treated as Koji-shaped.
fn make_source(
    role: &str,
    cfg: &config::SourceConfig,
    snapshot_override: Option<&Utf8PathBuf>,
    kind_override: Option<SourceKind>,
) -> anyhow::Result<Box<dyn BuildSource>> {
    let snapshot = snapshot_override
        .cloned()
        .or_else(|| cfg.snapshot.clone())
        .with_context(|| format!("{role}: no snapshot path given (flag or config file)"))?;

    let kind = kind_override.or(cfg.kind).unwrap_or_else(|| {
        if cfg.owner.is_some() && cfg.project.is_some() {
            SourceKind::Copr
        } else {
            SourceKind::Koji
        }
    });

    let label = cfg
        .label
        .clone()
        .or_else(|| cfg.project.clone())
        .unwrap_or_else(|| snapshot.file_stem().unwrap_or(role).to_string());

    match kind {
        SourceKind::Copr => {
            let owner = cfg
                .owner
                .clone()
                .with_context(|| format!("{role}: copr sources need an owner"))?;
            let project = cfg
                .project
                .clone()
                .with_context(|| format!("{role}: copr sources need a project"))?;
            Ok(Box::new(CoprSnapshotSource {
                label,
                path: snapshot,
                base_url: cfg
                    .url
                    .clone()
                    .unwrap_or_else(|| DEFAULT_COPR_URL.to_string()),
                owner,
                project,
            }))
        }
        SourceKind::Koji => Ok(Box::new(KojiSnapshotSource {
            label,
            path: snapshot,
            web_url: cfg
                .web_url
                .clone()
                .unwrap_or_else(|| DEFAULT_KOJI_WEB_URL.to_string()),
        })),
    }
}
