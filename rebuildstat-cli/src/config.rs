//! Configuration file loading for rebuildstat.
//!
//! Discovers and loads `rebuildstat.toml` from the working directory.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "rebuildstat.toml";

pub const DEFAULT_COPR_URL: &str = "https://copr.fedorainfracloud.org";
pub const DEFAULT_KOJI_WEB_URL: &str = "https://koji.fedoraproject.org/koji";

/// Which build-service family a snapshot came from; decides the link
/// formats used in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Copr,
    Koji,
}

/// Top-level configuration from rebuildstat.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RebuildstatConfig {
    /// The reference generation (usually the distro's own builds).
    pub baseline: SourceConfig,

    /// The generation under test (usually the rebuilt collection).
    pub candidate: SourceConfig,

    pub notes: NotesConfig,

    pub report: ReportConfig,
}

/// One generation's snapshot location and service coordinates.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub kind: Option<SourceKind>,

    /// Path to the snapshot JSON on disk.
    pub snapshot: Option<Utf8PathBuf>,

    /// Label shown in reports; defaults to the project or the snapshot
    /// file stem.
    pub label: Option<String>,

    /// COPR instance URL (copr kind).
    pub url: Option<String>,

    /// COPR owner, `@group` form allowed (copr kind).
    pub owner: Option<String>,

    /// COPR project name (copr kind).
    pub project: Option<String>,

    /// Koji web UI root (koji kind).
    pub web_url: Option<String>,
}

/// Notes section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NotesConfig {
    pub path: Option<Utf8PathBuf>,
}

/// Report section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub out_dir: Option<Utf8PathBuf>,

    /// Package names excluded from the report (the toolchain's own
    /// packages, typically).
    pub exclude: Vec<String>,

    pub os_version: Option<String>,
}

/// Discover the rebuildstat.toml config file in `dir`.
pub fn discover_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a rebuildstat.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<RebuildstatConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<RebuildstatConfig> {
    let config: RebuildstatConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from `dir`, or return default if not found.
pub fn load_or_default(dir: &Utf8Path) -> anyhow::Result<RebuildstatConfig> {
    match discover_config(dir) {
        Some(path) => load_config(&path),
        None => Ok(RebuildstatConfig::default()),
    }
}
