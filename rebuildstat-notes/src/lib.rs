//! Manual override notes for known build failures.
//!
//! Notes live in a TOML file with two tables keyed by package name:
//!
//! ```toml
//! [willfix]
//! pkg-a = "patch posted upstream"
//!
//! [wontfix]
//! pkg-b = ""
//! ```
//!
//! A `wontfix` entry suppresses the package from failure consideration
//! entirely; a `willfix` entry only attaches its text to the report.
//! Failing to load the notes file is non-fatal: classification proceeds
//! with an empty overlay and the run is flagged as degraded.

use camino::Utf8Path;
use rebuildstat_types::notes::{Note, NoteKind};
use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum NotesLoadError {
    #[error("read notes file: {message}")]
    Io { message: String },

    #[error("parse notes file: {message}")]
    Parse { message: String },
}

/// Raw TOML shape of the notes file. Unknown tables are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NotesFile {
    willfix: BTreeMap<String, String>,
    wontfix: BTreeMap<String, String>,
}

/// Read-only note lookup for one run.
#[derive(Debug, Clone, Default)]
pub struct NotesOverlay {
    notes: BTreeMap<String, Note>,
    degraded: bool,
}

impl NotesOverlay {
    pub fn empty() -> Self {
        Self::default()
    }

    /// An empty overlay carrying the degraded flag, for callers that
    /// recover from a load failure themselves.
    pub fn empty_degraded() -> Self {
        Self {
            notes: BTreeMap::new(),
            degraded: true,
        }
    }

    /// Load notes from `path`, failing on I/O or parse errors.
    pub fn load(path: &Utf8Path) -> Result<Self, NotesLoadError> {
        let contents = fs_err::read_to_string(path).map_err(|e| NotesLoadError::Io {
            message: e.to_string(),
        })?;
        Self::parse(&contents)
    }

    /// Parse notes from a TOML string.
    ///
    /// A package listed in both groups keeps the `wontfix` entry, since
    /// suppression is the stronger promise.
    pub fn parse(contents: &str) -> Result<Self, NotesLoadError> {
        let file: NotesFile = toml::from_str(contents).map_err(|e| NotesLoadError::Parse {
            message: e.to_string(),
        })?;

        let mut notes = BTreeMap::new();
        for (name, text) in file.willfix {
            notes.insert(name, Note::willfix(text));
        }
        for (name, text) in file.wontfix {
            notes.insert(name, Note::wontfix(text));
        }

        Ok(Self {
            notes,
            degraded: false,
        })
    }

    /// Load notes, degrading to an empty overlay on any failure.
    pub fn load_or_degraded(path: &Utf8Path) -> Self {
        match Self::load(path) {
            Ok(overlay) => overlay,
            Err(err) => {
                warn!(path = %path, error = %err, "notes unavailable, continuing without overrides");
                Self::empty_degraded()
            }
        }
    }

    /// The note for a package, if any.
    pub fn get(&self, package_name: &str) -> Option<&Note> {
        self.notes.get(package_name)
    }

    /// True when the package carries a suppressing note.
    pub fn is_wontfix(&self, package_name: &str) -> bool {
        self.get(package_name)
            .is_some_and(|note| note.kind == NoteKind::Wontfix)
    }

    /// True when the notes source failed to load for this run.
    pub fn degraded(&self) -> bool {
        self.degraded
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
