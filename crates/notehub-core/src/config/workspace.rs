//! Workspace behaviour configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which [`NotesApi`](crate::traits::NotesApi) implementation to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// The remote document server over HTTP.
    #[default]
    Http,
    /// A throwaway in-process store. Its contents last only as long as
    /// the process, so it is only useful inside `notehub shell`.
    Memory,
}

impl BackendKind {
    /// Whether documents outlive a single command.
    pub fn is_persistent(self) -> bool {
        matches!(self, Self::Http)
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http => write!(f, "http"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Workspace settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Body written into every newly created note.
    #[serde(default = "default_note_template")]
    pub note_template: String,
    /// Backend selection.
    #[serde(default)]
    pub backend: BackendKind,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            note_template: default_note_template(),
            backend: BackendKind::default(),
        }
    }
}

fn default_note_template() -> String {
    "# New Document\n\nWrite your content here.".to_string()
}
