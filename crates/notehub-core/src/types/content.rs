//! Document content and rename results.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// How a fetched document should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Editable Markdown.
    Markdown,
    /// A binary image.
    Image,
    /// Anything else, shown as plain text.
    Text,
}

/// Raw content of a document together with its declared MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentContent {
    /// The `Content-Type` returned by the server, without parameters.
    pub mime: String,
    /// The response body.
    pub body: Bytes,
}

impl DocumentContent {
    /// Create content from a MIME type and body.
    pub fn new(mime: impl Into<String>, body: impl Into<Bytes>) -> Self {
        let mime = mime.into();
        let mime = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        Self {
            mime,
            body: body.into(),
        }
    }

    /// Classify the content. Unknown types fall back to plain text.
    pub fn kind(&self) -> ContentKind {
        if self.mime == "text/markdown" {
            ContentKind::Markdown
        } else if self.mime.starts_with("image/") {
            ContentKind::Image
        } else {
            ContentKind::Text
        }
    }

    /// The body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// One rename performed by the server's naming-conflict resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameOperation {
    /// Path before the rename.
    pub old_path: String,
    /// Path after the rename.
    pub new_path: String,
}
