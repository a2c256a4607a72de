//! In-progress mutation requests.
//!
//! A presentation layer opens an intent (the equivalent of a modal
//! dialog), fills in its fields, then confirms or cancels it through the
//! controller. Intents are never persisted.

use notehub_core::path;
use notehub_core::types::TreeNode;

/// A mutation waiting for user input and confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingMutation {
    /// Create a note inside `parent` (`""` for the root).
    CreateNote {
        /// Parent folder path.
        parent: String,
        /// Name of the new note.
        name: String,
    },
    /// Create a folder inside `parent` (`""` for the root).
    CreateFolder {
        /// Parent folder path.
        parent: String,
        /// Name of the new folder.
        name: String,
    },
    /// Rename `target` in place.
    Rename {
        /// Item being renamed.
        target: TreeNode,
        /// New name.
        new_name: String,
    },
    /// Move `target` into `destination` (`""` for the root).
    Move {
        /// Item being moved.
        target: TreeNode,
        /// Destination folder path.
        destination: String,
    },
    /// Soft-delete `target`.
    Delete {
        /// Item being deleted.
        target: TreeNode,
    },
}

impl PendingMutation {
    /// Set the name field of a create or rename intent.
    ///
    /// Returns false for intents without a name field.
    pub fn set_name(&mut self, value: impl Into<String>) -> bool {
        match self {
            Self::CreateNote { name, .. }
            | Self::CreateFolder { name, .. }
            | Self::Rename {
                new_name: name, ..
            } => {
                *name = value.into();
                true
            }
            _ => false,
        }
    }

    /// Set the destination of a move intent.
    ///
    /// Returns false for other intents.
    pub fn set_destination(&mut self, value: impl Into<String>) -> bool {
        match self {
            Self::Move { destination, .. } => {
                *destination = value.into().trim_matches(path::SEPARATOR).to_string();
                true
            }
            _ => false,
        }
    }

    /// Dialog title for this intent.
    pub fn title(&self) -> String {
        match self {
            Self::CreateNote { parent, .. } if parent.is_empty() => "New note".to_string(),
            Self::CreateNote { parent, .. } => format!("New note in '{parent}'"),
            Self::CreateFolder { parent, .. } if parent.is_empty() => "New folder".to_string(),
            Self::CreateFolder { parent, .. } => format!("New folder in '{parent}'"),
            Self::Rename { target, .. } => format!("Rename '{}'", target.name),
            Self::Move { target, .. } => format!("Move '{}'", target.name),
            Self::Delete { target } => format!("Move '{}' to the recycle bin?", target.name),
        }
    }
}
