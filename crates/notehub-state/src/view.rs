//! The main content area's current mode.

use notehub_core::types::{TrashedItem, TreeNode};

use crate::route::Route;

/// What the main content area is showing. Exactly one is active.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    /// Landing page.
    #[default]
    Welcome,
    /// An editable Markdown document.
    Document {
        /// Document path.
        path: String,
        /// Current editor buffer.
        content: String,
    },
    /// A folder listing.
    Folder {
        /// The folder node and its children.
        node: TreeNode,
    },
    /// The recycle bin.
    Trash {
        /// Items fetched when the view was entered.
        items: Vec<TrashedItem>,
    },
    /// Settings: activity log, images, share links.
    Settings,
    /// An image preview.
    Image {
        /// Document path.
        path: String,
        /// Object URL of the image bytes.
        blob_url: String,
        /// MIME type.
        mime: String,
    },
    /// A read-only text document.
    Text {
        /// Document path.
        path: String,
        /// Raw content.
        content: String,
    },
}

impl ViewState {
    /// Short name of the active variant.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
            Self::Document { .. } => "document",
            Self::Folder { .. } => "folder",
            Self::Trash { .. } => "trash",
            Self::Settings => "settings",
            Self::Image { .. } => "image",
            Self::Text { .. } => "text",
        }
    }

    /// The document or folder path on screen, if any.
    pub fn selected_path(&self) -> Option<&str> {
        match self {
            Self::Document { path, .. } | Self::Image { path, .. } | Self::Text { path, .. } => {
                Some(path.as_str())
            }
            Self::Folder { node } => Some(node.path.as_str()),
            _ => None,
        }
    }

    /// The object URL held by this view, if any.
    pub fn blob_url(&self) -> Option<&str> {
        match self {
            Self::Image { blob_url, .. } => Some(blob_url.as_str()),
            _ => None,
        }
    }

    /// The route that reproduces this view.
    pub fn route(&self) -> Route {
        match self {
            Self::Welcome => Route::Welcome,
            Self::Trash { .. } => Route::Trash,
            Self::Settings => Route::Settings,
            _ => self
                .selected_path()
                .map(Route::data)
                .unwrap_or(Route::Welcome),
        }
    }
}
