//! The document server contract.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;
use crate::types::{
    DocumentContent, ImageFile, RenameOperation, ShareDuration, ShareLink, TrashedItem, TreeNode,
    UploadedImage,
};

/// A file sent as a multipart form field.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Original file name.
    pub file_name: String,
    /// File contents.
    pub data: Bytes,
}

impl Upload {
    /// Create an upload from a file name and its bytes.
    pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            data: data.into(),
        }
    }
}

/// Operations offered by the remote document store.
///
/// All paths are plain document paths; implementations apply the URL
/// encoding from [`crate::path`] themselves. Every non-success response is
/// returned as a single [`AppError`](crate::error::AppError) carrying the
/// status and the server's message. Nothing is retried.
#[async_trait]
pub trait NotesApi: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch the whole document tree.
    async fn list_documents(&self) -> AppResult<Vec<TreeNode>>;

    /// Fetch the content of one document.
    async fn get_content(&self, path: &str) -> AppResult<DocumentContent>;

    /// Overwrite a document with Markdown content.
    async fn save_content(&self, path: &str, content: &str) -> AppResult<()>;

    /// Create a new note with initial content.
    async fn create_note(&self, path: &str, content: &str) -> AppResult<()>;

    /// Rename or move a document or folder.
    async fn rename(&self, path: &str, new_path: &str) -> AppResult<()>;

    /// Move a document or folder to the recycle bin.
    async fn delete(&self, path: &str) -> AppResult<()>;

    /// Create a folder.
    async fn create_folder(&self, path: &str) -> AppResult<()>;

    /// Import a `.md`, `.txt` or `.zip` file.
    async fn import(&self, upload: Upload) -> AppResult<()>;

    /// Export one document or folder.
    async fn export_item(&self, path: &str) -> AppResult<Bytes>;

    /// Export the whole workspace as a zip archive.
    async fn export_all(&self) -> AppResult<Bytes>;

    /// Upload an image for embedding in notes.
    async fn upload_image(&self, upload: Upload) -> AppResult<UploadedImage>;

    /// List uploaded images.
    async fn list_images(&self) -> AppResult<Vec<ImageFile>>;

    /// Delete an uploaded image by file name.
    async fn delete_image(&self, name: &str) -> AppResult<()>;

    /// List the recycle bin.
    async fn list_trash(&self) -> AppResult<Vec<TrashedItem>>;

    /// Move a recycle bin item back into the tree.
    async fn restore(&self, path: &str) -> AppResult<()>;

    /// Remove a recycle bin item for good.
    async fn delete_permanently(&self, path: &str) -> AppResult<()>;

    /// Remove every recycle bin item.
    async fn empty_trash(&self) -> AppResult<()>;

    /// Ask the server to rename case-insensitive name collisions.
    async fn resolve_conflicts(&self) -> AppResult<Vec<RenameOperation>>;

    /// Fetch the activity log.
    async fn fetch_logs(&self) -> AppResult<String>;

    /// Clear the activity log.
    async fn clear_logs(&self) -> AppResult<()>;

    /// Paths of documents that reference `path`.
    async fn references(&self, path: &str) -> AppResult<Vec<String>>;

    /// List active share links.
    async fn list_share_links(&self) -> AppResult<Vec<ShareLink>>;

    /// Create a share link for a document, or return its active one.
    async fn create_share_link(&self, path: &str) -> AppResult<ShareLink>;

    /// Change the lifetime of a share link.
    async fn update_share_link(&self, id: &str, duration: ShareDuration) -> AppResult<()>;

    /// Revoke a share link.
    async fn delete_share_link(&self, id: &str) -> AppResult<()>;
}
