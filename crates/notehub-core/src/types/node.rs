//! Document tree nodes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether a tree node is a document or a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A document (Markdown, text or image).
    File,
    /// A folder that may hold further nodes.
    Folder,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Folder => write!(f, "folder"),
        }
    }
}

/// A file or folder in the document tree.
///
/// The `path` is the node's identity: it is unique across the tree and a
/// child's path is always its parent's path plus one segment. Files carry
/// no children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Display name (extension stripped by the server).
    pub name: String,
    /// Slash-delimited path, unique in the tree.
    pub path: String,
    /// File or folder.
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Ordered children; always empty for files.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a file node.
    pub fn file(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: NodeKind::File,
            children: Vec::new(),
        }
    }

    /// Create a folder node with the given children.
    pub fn folder(
        path: impl Into<String>,
        name: impl Into<String>,
        children: Vec<TreeNode>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: NodeKind::Folder,
            children,
        }
    }

    /// Whether this node is a folder.
    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }
}
