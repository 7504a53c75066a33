use serde::{Deserialize, Serialize};

/// How a manual note affects reporting.
///
/// `wontfix` suppresses a package from failure consideration entirely;
/// `willfix` only attaches an explanatory note for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteKind {
    Willfix,
    Wontfix,
}

/// A manual override note for one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub kind: NoteKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Note {
    pub fn willfix(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            kind: NoteKind::Willfix,
            text: if text.is_empty() { None } else { Some(text) },
        }
    }

    pub fn wontfix(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            kind: NoteKind::Wontfix,
            text: if text.is_empty() { None } else { Some(text) },
        }
    }
}
