//! Clap-free settings for the report pipeline.

use camino::Utf8PathBuf;

/// Settings for one report run.
#[derive(Debug, Clone)]
pub struct ReportSettings {
    /// Output directory for feed.json and report.md.
    pub out_dir: Utf8PathBuf,

    /// Package names dropped from the baseline walk before
    /// classification (the toolchain's own packages, typically).
    pub exclude: Vec<String>,

    /// OS version label for the report; derived from the candidate's
    /// chroot ids when unset.
    pub os_version: Option<String>,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            out_dir: Utf8PathBuf::from("report"),
            exclude: Vec::new(),
            os_version: None,
        }
    }
}
