//! Recycle bin entries.

use serde::{Deserialize, Serialize};

use super::node::NodeKind;

/// An item listed in the recycle bin.
///
/// Same shape as a tree node but never part of the main tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrashedItem {
    /// Name inside the recycle bin.
    pub name: String,
    /// Path used to restore or purge the item.
    pub path: String,
    /// File or folder.
    #[serde(rename = "type")]
    pub kind: NodeKind,
}
