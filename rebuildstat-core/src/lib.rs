//! Embeddable core library for rebuildstat.
//!
//! Provides a clap-free, I/O-abstracted entry point suitable for linking
//! into another host process.
//!
//! # Port traits
//!
//! I/O the pipeline does not own is abstracted behind port traits in
//! [`ports`]:
//! - [`NotesPort`](ports::NotesPort) — load the manual-override notes
//! - [`WritePort`](ports::WritePort) — write files and create directories
//!
//! Package records come in through the
//! [`BuildSource`](rebuildstat_snapshots::BuildSource) interface from
//! `rebuildstat-snapshots`. The [`adapters`] module provides default
//! filesystem-backed implementations.
//!
//! # Entry points
//!
//! - [`run_report`](pipeline::run_report) — classify every package pair
//! - [`write_report_artifacts`](pipeline::write_report_artifacts) — emit
//!   the versioned feed and the markdown report

pub mod adapters;
pub mod pipeline;
pub mod ports;
pub mod settings;

pub use pipeline::{
    ReportOutcome, RunError, run_report, run_todo, write_report_artifacts, write_todo_artifacts,
};
pub use settings::ReportSettings;

// Re-export the source interface so embedders don't need
// rebuildstat-snapshots directly.
pub use rebuildstat_snapshots::BuildSource;
