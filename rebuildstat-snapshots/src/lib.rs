//! Build-service snapshot ingestion for rebuildstat.
//!
//! The pipeline never talks to a build service directly: it consumes
//! already-fetched JSON dumps ("snapshots") from disk through the
//! [`BuildSource`] capability interface. Two concrete sources are
//! provided, one per service family:
//!
//! - [`CoprSnapshotSource`] — COPR monitor dumps, COPR-style links
//! - [`KojiSnapshotSource`] — Koji tagged-builds dumps, Koji-style links
//!
//! The core depends only on the trait, so further services slot in
//! without touching the classification engine.

mod load;

pub use load::{
    PackagePair, fill_missing_chroots, load_monitor_snapshot, load_pairs, os_version_from_chroot,
};

use camino::Utf8PathBuf;
use rebuildstat_types::package::PackageRecord;

/// A source of already-resolved package build records for one generation.
pub trait BuildSource {
    /// Human-readable label for reports ("f38", "clang-built-f38").
    fn label(&self) -> &str;

    /// All package records this source knows about, sorted by name.
    fn list_packages(&self) -> anyhow::Result<Vec<PackageRecord>>;

    /// Link to the package's latest build, when one can be constructed.
    fn build_link(&self, pkg: &PackageRecord) -> Option<String>;

    /// Link to the package's overview page.
    fn package_link(&self, pkg: &PackageRecord) -> Option<String>;
}

/// COPR project snapshot: monitor dump on disk plus enough coordinates
/// to reconstruct web links.
#[derive(Debug, Clone)]
pub struct CoprSnapshotSource {
    pub label: String,
    pub path: Utf8PathBuf,
    pub base_url: String,
    pub owner: String,
    pub project: String,
}

impl CoprSnapshotSource {
    /// Group owners are written `@group` in the API but `g/group` in web
    /// URLs.
    fn owner_path(&self) -> String {
        self.owner.replace('@', "g/")
    }
}

impl BuildSource for CoprSnapshotSource {
    fn label(&self) -> &str {
        &self.label
    }

    fn list_packages(&self) -> anyhow::Result<Vec<PackageRecord>> {
        load_monitor_snapshot(&self.path)
    }

    fn build_link(&self, pkg: &PackageRecord) -> Option<String> {
        let build_id = pkg.latest_build_id?;
        Some(format!(
            "{}/coprs/{}/{}/build/{}/",
            self.base_url,
            self.owner_path(),
            self.project,
            build_id
        ))
    }

    fn package_link(&self, pkg: &PackageRecord) -> Option<String> {
        Some(format!(
            "{}/coprs/{}/{}/package/{}",
            self.base_url,
            self.owner_path(),
            self.project,
            pkg.name
        ))
    }
}

/// Koji tag snapshot: tagged-builds dump on disk plus the web UI root.
#[derive(Debug, Clone)]
pub struct KojiSnapshotSource {
    pub label: String,
    pub path: Utf8PathBuf,
    pub web_url: String,
}

impl BuildSource for KojiSnapshotSource {
    fn label(&self) -> &str {
        &self.label
    }

    fn list_packages(&self) -> anyhow::Result<Vec<PackageRecord>> {
        load_monitor_snapshot(&self.path)
    }

    fn build_link(&self, pkg: &PackageRecord) -> Option<String> {
        let build_id = pkg.latest_build_id?;
        Some(format!("{}/buildinfo?buildID={}", self.web_url, build_id))
    }

    fn package_link(&self, pkg: &PackageRecord) -> Option<String> {
        Some(format!(
            "{}/search?type=package&match=glob&terms={}",
            self.web_url, pkg.name
        ))
    }
}
