use anyhow::Context;
use camino::Utf8Path;
use fs_err as fs;
use rebuildstat_types::package::{ChrootRecord, PackageRecord};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// One entry of the paired input format: the same package's builds in
/// both generations, as produced by an external pairing step.
#[derive(Debug, Clone, Deserialize)]
pub struct PackagePair {
    pub name: String,

    #[serde(default)]
    pub os_version: Option<String>,

    pub builds_a: PackageRecord,
    pub builds_b: PackageRecord,
}

/// Load a monitor-style snapshot: `{"packages": [...]}`.
///
/// The loader is tolerant the way the rest of the ingest layer is:
/// unknown fields are ignored and a malformed package entry is skipped
/// with a warning rather than failing the whole snapshot. A missing or
/// unreadable file is an error; the caller decides what that means for
/// the run.
pub fn load_monitor_snapshot(path: &Utf8Path) -> anyhow::Result<Vec<PackageRecord>> {
    let contents = fs::read_to_string(path).with_context(|| format!("read snapshot {}", path))?;
    let value: serde_json::Value =
        serde_json::from_str(&contents).with_context(|| format!("parse snapshot {}", path))?;

    let entries = value
        .get("packages")
        .and_then(|p| p.as_array())
        .with_context(|| format!("snapshot {} has no packages array", path))?;

    debug!(path = %path, entries = entries.len(), "loading monitor snapshot");

    let mut packages = Vec::new();
    for entry in entries {
        match serde_json::from_value::<PackageRecord>(entry.clone()) {
            Ok(pkg) => packages.push(pkg),
            Err(err) => {
                let name = entry
                    .get("name")
                    .and_then(|n| n.as_str())
                    .unwrap_or("<unnamed>");
                warn!(path = %path, package = name, error = %err, "skipping malformed package entry");
            }
        }
    }

    // Deterministic order matters downstream.
    packages.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(packages)
}

/// Load the paired input format: `{<name>: {name, os_version, builds_a,
/// builds_b}}`, keyed by package name.
pub fn load_pairs(path: &Utf8Path) -> anyhow::Result<BTreeMap<String, PackagePair>> {
    let contents = fs::read_to_string(path).with_context(|| format!("read pairs {}", path))?;
    let value: serde_json::Value =
        serde_json::from_str(&contents).with_context(|| format!("parse pairs {}", path))?;

    let object = value
        .as_object()
        .with_context(|| format!("pairs file {} is not an object", path))?;

    let mut pairs = BTreeMap::new();
    for (name, entry) in object {
        match serde_json::from_value::<PackagePair>(entry.clone()) {
            Ok(pair) => {
                pairs.insert(name.clone(), pair);
            }
            Err(err) => {
                warn!(path = %path, package = %name, error = %err, "skipping malformed pair entry");
            }
        }
    }
    Ok(pairs)
}

/// Pad a record with `missing`-state chroots so it covers `chroot_ids`.
///
/// Used to line a counterpart package up against the full chroot set of
/// the other generation before diffing.
pub fn fill_missing_chroots<'a>(
    pkg: &mut PackageRecord,
    chroot_ids: impl IntoIterator<Item = &'a str>,
) {
    for chroot_id in chroot_ids {
        pkg.chroots
            .entry(chroot_id.to_string())
            .or_insert_with(ChrootRecord::missing);
    }
}

/// Derive the OS version from a chroot id: `fedora-38-x86_64` ->
/// `fedora-38`.
pub fn os_version_from_chroot(chroot_id: &str) -> Option<String> {
    let mut parts = chroot_id.split('-');
    let distro = parts.next()?;
    let version = parts.next()?;
    Some(format!("{distro}-{version}"))
}
