//! Port traits abstracting pipeline I/O away from the decision logic.

use camino::Utf8Path;
use rebuildstat_notes::{NotesLoadError, NotesOverlay};

/// Source of the manual-override notes.
pub trait NotesPort {
    fn load_notes(&self) -> Result<NotesOverlay, NotesLoadError>;
}

/// File-system write operations.
pub trait WritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()>;
}
