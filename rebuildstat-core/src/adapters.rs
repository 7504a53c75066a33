//! Default filesystem-backed port implementations.

use crate::ports::{NotesPort, WritePort};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use rebuildstat_notes::{NotesLoadError, NotesOverlay};
use rebuildstat_snapshots::BuildSource;
use rebuildstat_types::package::PackageRecord;

/// Loads notes from a TOML file on disk.
#[derive(Debug, Clone)]
pub struct FsNotesPort {
    pub path: Utf8PathBuf,
}

impl FsNotesPort {
    pub fn new(path: Utf8PathBuf) -> Self {
        Self { path }
    }
}

impl NotesPort for FsNotesPort {
    fn load_notes(&self) -> Result<NotesOverlay, NotesLoadError> {
        NotesOverlay::load(&self.path)
    }
}

/// Pre-loaded notes for embedding and testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotesPort {
    pub overlay: NotesOverlay,
}

impl InMemoryNotesPort {
    pub fn new(overlay: NotesOverlay) -> Self {
        Self { overlay }
    }
}

impl NotesPort for InMemoryNotesPort {
    fn load_notes(&self) -> Result<NotesOverlay, NotesLoadError> {
        Ok(self.overlay.clone())
    }
}

/// Pre-loaded package records for embedding and testing. Produces no
/// links; records are sorted by name on construction to match the
/// snapshot loaders' deterministic ordering.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    label: String,
    packages: Vec<PackageRecord>,
}

impl InMemorySource {
    pub fn new(label: impl Into<String>, mut packages: Vec<PackageRecord>) -> Self {
        packages.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            label: label.into(),
            packages,
        }
    }
}

impl BuildSource for InMemorySource {
    fn label(&self) -> &str {
        &self.label
    }

    fn list_packages(&self) -> anyhow::Result<Vec<PackageRecord>> {
        Ok(self.packages.clone())
    }

    fn build_link(&self, _pkg: &PackageRecord) -> Option<String> {
        None
    }

    fn package_link(&self, _pkg: &PackageRecord) -> Option<String> {
        None
    }
}

/// Filesystem write operations.
#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create parent dir for {}", path))?;
        }
        std::fs::write(path, contents).with_context(|| format!("write {}", path))
    }

    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()> {
        std::fs::create_dir_all(path).with_context(|| format!("create_dir_all {}", path))
    }
}
