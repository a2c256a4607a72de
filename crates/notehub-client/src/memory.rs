//! In-process document store.
//!
//! Mirrors the observable behaviour of the document server closely enough
//! that the state controller cannot tell the two apart: extension-less
//! document paths, `path is a directory` on folder content fetches,
//! case-insensitive name conflicts, timestamped recycle bin names and an
//! activity log.

use std::collections::BTreeMap;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::debug;

use notehub_core::error::AppError;
use notehub_core::path;
use notehub_core::result::AppResult;
use notehub_core::traits::{NotesApi, Upload};
use notehub_core::types::{
    DocumentContent, ImageFile, NodeKind, RenameOperation, ShareDuration, ShareLink, TrashedItem,
    TreeNode, UploadedImage,
};

/// A stored entry.
#[derive(Debug, Clone)]
enum Entry {
    Folder,
    File { mime: String, body: Bytes },
}

impl Entry {
    fn kind(&self) -> NodeKind {
        match self {
            Self::Folder => NodeKind::Folder,
            Self::File { .. } => NodeKind::File,
        }
    }
}

/// A recycle bin entry with everything that was removed with it.
#[derive(Debug, Clone)]
struct TrashEntry {
    /// Path the item had before deletion.
    original: String,
    kind: NodeKind,
    /// Removed entries keyed by their original path.
    entries: Vec<(String, Entry)>,
}

#[derive(Debug, Default)]
struct Store {
    documents: BTreeMap<String, Entry>,
    trash: BTreeMap<String, TrashEntry>,
    images: BTreeMap<String, Bytes>,
    shares: Vec<ShareLink>,
    logs: Vec<String>,
    uploads: u64,
}

impl Store {
    fn log(&mut self, message: String) {
        let stamp = Utc::now().format("%Y-%m-%d %H:%M:%S");
        self.logs.push(format!("[{stamp}] {message}"));
    }

    /// Whether `parent` holds an item named `name`, ignoring case.
    fn name_taken(&self, parent: &str, name: &str, exclude: Option<&str>) -> bool {
        self.documents.keys().any(|key| {
            path::parent(key) == parent
                && Some(key.as_str()) != exclude
                && fold_case(path::file_name(key)) == fold_case(name)
        })
    }

    fn ensure_parents(&mut self, target: &str) {
        let mut current = String::new();
        let parent = path::parent(target);
        for segment in path::segments(parent) {
            current = path::join(&current, segment);
            self.documents
                .entry(current.clone())
                .or_insert(Entry::Folder);
        }
    }

    /// Remove `target` and everything below it.
    fn take_subtree(&mut self, target: &str) -> Vec<(String, Entry)> {
        let keys: Vec<String> = self
            .documents
            .keys()
            .filter(|k| k.as_str() == target || path::is_descendant_of(k, target))
            .cloned()
            .collect();
        keys.into_iter()
            .filter_map(|k| self.documents.remove(&k).map(|e| (k, e)))
            .collect()
    }

    fn build_children(&self, parent: &str) -> Vec<TreeNode> {
        let mut children: Vec<TreeNode> = self
            .documents
            .iter()
            .filter(|(key, _)| path::parent(key) == parent)
            .map(|(key, entry)| match entry {
                Entry::Folder => {
                    TreeNode::folder(key.clone(), path::file_name(key), self.build_children(key))
                }
                Entry::File { .. } => TreeNode::file(key.clone(), path::file_name(key)),
            })
            .collect();
        // Folders first, then by name.
        children.sort_by(|a, b| {
            b.is_folder()
                .cmp(&a.is_folder())
                .then_with(|| a.name.cmp(&b.name))
        });
        children
    }

    fn trash_name(&self, target: &str) -> String {
        let stamp = Utc::now().format("%Y%m%d%H%M%S");
        let base = format!("{}_{stamp}", path::file_name(target));
        let mut name = base.clone();
        let mut counter = 1;
        while self.trash.contains_key(&name) {
            name = format!("{base}-{counter}");
            counter += 1;
        }
        name
    }

    fn references_to(&self, target: &str) -> Vec<String> {
        let token = format!("@({target})");
        self.documents
            .iter()
            .filter_map(|(key, entry)| match entry {
                Entry::File { mime, body } if mime == "text/markdown" => {
                    String::from_utf8_lossy(body)
                        .contains(&token)
                        .then(|| key.clone())
                }
                _ => None,
            })
            .collect()
    }
}

/// Names that differ only in case collide.
fn fold_case(name: &str) -> String {
    name.to_lowercase()
}

fn status(code: u16, message: &str) -> AppError {
    AppError::from_status(code, message)
}

fn mime_for(file_name: &str) -> Option<(&'static str, &str)> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    let mime = match ext.to_ascii_lowercase().as_str() {
        "md" => "text/markdown",
        "txt" => "text/plain",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        _ => return None,
    };
    Some((mime, stem))
}

/// A [`NotesApi`] that keeps the workspace in memory.
#[derive(Debug, Default)]
pub struct MemoryNotesApi {
    store: Mutex<Store>,
}

impl MemoryNotesApi {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a Markdown document, creating parent folders as needed.
    pub async fn seed_markdown(&self, doc_path: &str, content: &str) {
        self.seed(doc_path, "text/markdown", Bytes::from(content.to_string()))
            .await;
    }

    /// Seed a document with an arbitrary MIME type.
    pub async fn seed(&self, doc_path: &str, mime: &str, body: Bytes) {
        let mut store = self.store.lock().await;
        store.ensure_parents(doc_path);
        store.documents.insert(
            doc_path.to_string(),
            Entry::File {
                mime: mime.to_string(),
                body,
            },
        );
    }

    /// Seed an empty folder, creating parent folders as needed.
    pub async fn seed_folder(&self, folder_path: &str) {
        let mut store = self.store.lock().await;
        store.ensure_parents(folder_path);
        store
            .documents
            .insert(folder_path.to_string(), Entry::Folder);
    }

    async fn write_file(&self, doc_path: &str, content: &str, verb: &str) -> AppResult<()> {
        let doc_path = doc_path.trim_matches('/');
        if doc_path.is_empty() {
            return Err(status(400, "invalid path"));
        }
        let mut store = self.store.lock().await;
        match store.documents.get(doc_path) {
            Some(Entry::Folder) => return Err(status(400, "path is a directory")),
            Some(Entry::File { .. }) => {}
            None => {
                if store.name_taken(path::parent(doc_path), path::file_name(doc_path), None) {
                    return Err(status(
                        409,
                        "A file or folder with the same name already exists (case-insensitive)",
                    ));
                }
            }
        }
        store.ensure_parents(doc_path);
        store.documents.insert(
            doc_path.to_string(),
            Entry::File {
                mime: "text/markdown".to_string(),
                body: Bytes::from(content.to_string()),
            },
        );
        store.log(format!("{verb}: '{doc_path}'"));
        debug!(path = doc_path, "Stored document");
        Ok(())
    }
}

#[async_trait]
impl NotesApi for MemoryNotesApi {
    async fn list_documents(&self) -> AppResult<Vec<TreeNode>> {
        Ok(self.store.lock().await.build_children(""))
    }

    async fn get_content(&self, doc_path: &str) -> AppResult<DocumentContent> {
        let store = self.store.lock().await;
        match store.documents.get(doc_path) {
            Some(Entry::File { mime, body }) => Ok(DocumentContent::new(mime.clone(), body.clone())),
            Some(Entry::Folder) => Err(status(400, "path is a directory")),
            None => Err(status(404, "document not found")),
        }
    }

    async fn save_content(&self, doc_path: &str, content: &str) -> AppResult<()> {
        self.write_file(doc_path, content, "SAVE").await
    }

    async fn create_note(&self, doc_path: &str, content: &str) -> AppResult<()> {
        self.write_file(doc_path, content, "CREATE").await
    }

    async fn rename(&self, doc_path: &str, new_path: &str) -> AppResult<()> {
        let new_path = new_path.trim_matches('/');
        let mut store = self.store.lock().await;
        if !store.documents.contains_key(doc_path) {
            return Err(status(404, "item not found"));
        }
        if new_path.is_empty() || path::is_descendant_of(new_path, doc_path) {
            return Err(status(400, "invalid new path"));
        }
        if store.name_taken(
            path::parent(new_path),
            path::file_name(new_path),
            Some(doc_path),
        ) {
            return Err(status(
                409,
                "An item with the same name already exists in the destination.",
            ));
        }

        let moved = store.take_subtree(doc_path);
        store.ensure_parents(new_path);
        for (key, entry) in moved {
            let suffix = &key[doc_path.len()..];
            store.documents.insert(format!("{new_path}{suffix}"), entry);
        }
        store.log(format!("MOVE/RENAME: Moved '{doc_path}' to '{new_path}'"));
        Ok(())
    }

    async fn delete(&self, doc_path: &str) -> AppResult<()> {
        let mut store = self.store.lock().await;
        let kind = match store.documents.get(doc_path) {
            Some(entry) => entry.kind(),
            None => return Err(status(404, "item not found")),
        };
        let name = store.trash_name(doc_path);
        let entries = store.take_subtree(doc_path);
        store.trash.insert(
            name.clone(),
            TrashEntry {
                original: doc_path.to_string(),
                kind,
                entries,
            },
        );
        store.log(format!("DELETE: Moved '{doc_path}' to trash as '{name}'"));
        Ok(())
    }

    async fn create_folder(&self, folder_path: &str) -> AppResult<()> {
        let folder_path = folder_path.trim_matches('/');
        if folder_path.is_empty() {
            return Err(status(400, "invalid path"));
        }
        let mut store = self.store.lock().await;
        if store.name_taken(path::parent(folder_path), path::file_name(folder_path), None) {
            return Err(status(
                409,
                "A file or folder with the same name already exists (case-insensitive)",
            ));
        }
        store.ensure_parents(folder_path);
        store
            .documents
            .insert(folder_path.to_string(), Entry::Folder);
        store.log(format!("CREATE FOLDER: '{folder_path}'"));
        Ok(())
    }

    async fn import(&self, upload: Upload) -> AppResult<()> {
        let (mime, stem) = match mime_for(&upload.file_name) {
            Some((mime, stem)) if mime.starts_with("text/") => (mime, stem.to_string()),
            _ => {
                return Err(status(
                    400,
                    "Unsupported file type. Only .md and .txt files can be imported here.",
                ));
            }
        };
        let mut store = self.store.lock().await;
        if store.name_taken("", &stem, None) {
            return Err(status(409, "An item with the same name already exists."));
        }
        store.documents.insert(
            stem.clone(),
            Entry::File {
                mime: mime.to_string(),
                body: upload.data,
            },
        );
        store.log(format!("IMPORT: Imported '{}'", upload.file_name));
        Ok(())
    }

    async fn export_item(&self, doc_path: &str) -> AppResult<Bytes> {
        let store = self.store.lock().await;
        match store.documents.get(doc_path) {
            Some(Entry::File { body, .. }) => Ok(body.clone()),
            Some(Entry::Folder) => Err(status(
                501,
                "Folder archives are only produced by the document server",
            )),
            None => Err(status(404, "item not found")),
        }
    }

    async fn export_all(&self) -> AppResult<Bytes> {
        Err(status(
            501,
            "Workspace archives are only produced by the document server",
        ))
    }

    async fn upload_image(&self, upload: Upload) -> AppResult<UploadedImage> {
        if !matches!(mime_for(&upload.file_name), Some((mime, _)) if mime.starts_with("image/")) {
            return Err(status(400, "Could not get image from form"));
        }
        let mut store = self.store.lock().await;
        store.uploads += 1;
        let name = format!(
            "{}_{:04}_{}",
            Utc::now().format("%Y%m%d%H%M%S"),
            store.uploads,
            upload.file_name
        );
        store.images.insert(name.clone(), upload.data);
        Ok(UploadedImage {
            url: format!("/images/{name}"),
        })
    }

    async fn list_images(&self) -> AppResult<Vec<ImageFile>> {
        let store = self.store.lock().await;
        Ok(store
            .images
            .keys()
            .map(|name| ImageFile {
                name: name.clone(),
                url: format!("/images/{name}"),
            })
            .collect())
    }

    async fn delete_image(&self, name: &str) -> AppResult<()> {
        let mut store = self.store.lock().await;
        if name.contains('/') {
            return Err(status(400, "Invalid file path"));
        }
        store
            .images
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| status(404, "Image not found"))
    }

    async fn list_trash(&self) -> AppResult<Vec<TrashedItem>> {
        let store = self.store.lock().await;
        Ok(store
            .trash
            .iter()
            .map(|(name, entry)| TrashedItem {
                name: name.clone(),
                path: name.clone(),
                kind: entry.kind,
            })
            .collect())
    }

    async fn restore(&self, name: &str) -> AppResult<()> {
        let mut store = self.store.lock().await;
        let original = match store.trash.get(name) {
            Some(entry) => entry.original.clone(),
            None => return Err(status(404, "item not found in trash")),
        };
        if store.name_taken(path::parent(&original), path::file_name(&original), None) {
            return Err(status(
                409,
                "An item with the same name already exists in the destination folder.",
            ));
        }
        let Some(entry) = store.trash.remove(name) else {
            return Err(status(404, "item not found in trash"));
        };
        store.ensure_parents(&original);
        store.documents.extend(entry.entries);
        store.log(format!("RESTORE: Restored '{original}' from trash"));
        Ok(())
    }

    async fn delete_permanently(&self, name: &str) -> AppResult<()> {
        let mut store = self.store.lock().await;
        match store.trash.remove(name) {
            Some(entry) => {
                store.log(format!("PURGE: Permanently deleted '{}'", entry.original));
                Ok(())
            }
            None => Err(status(404, "item not found in trash")),
        }
    }

    async fn empty_trash(&self) -> AppResult<()> {
        let mut store = self.store.lock().await;
        let count = store.trash.len();
        store.trash.clear();
        store.log(format!("PURGE: Emptied trash ({count} items)"));
        Ok(())
    }

    async fn resolve_conflicts(&self) -> AppResult<Vec<RenameOperation>> {
        let mut store = self.store.lock().await;
        let mut operations = Vec::new();
        let mut seen: BTreeMap<(String, String), String> = BTreeMap::new();
        let keys: Vec<String> = store.documents.keys().cloned().collect();

        for key in keys {
            // An ancestor may have been renamed earlier in this pass.
            if !store.documents.contains_key(&key) {
                continue;
            }
            let parent = path::parent(&key).to_string();
            let lowered = fold_case(path::file_name(&key));
            if !seen.contains_key(&(parent.clone(), lowered.clone())) {
                seen.insert((parent, lowered), key);
                continue;
            }

            let base = path::file_name(&key).to_string();
            let mut counter = 1;
            let new_path = loop {
                let candidate = path::join(&parent, &format!("{base}-{counter}"));
                if !store.name_taken(&parent, path::file_name(&candidate), None) {
                    break candidate;
                }
                counter += 1;
            };

            for (old, entry) in store.take_subtree(&key) {
                let suffix = &old[key.len()..];
                store.documents.insert(format!("{new_path}{suffix}"), entry);
            }
            store.log(format!("DATA INTEGRITY: Renamed '{key}' to '{new_path}'"));
            seen.insert((parent, fold_case(path::file_name(&new_path))), new_path.clone());
            operations.push(RenameOperation {
                old_path: key,
                new_path,
            });
        }

        Ok(operations)
    }

    async fn fetch_logs(&self) -> AppResult<String> {
        let store = self.store.lock().await;
        let mut text = store.logs.join("\n");
        if !text.is_empty() {
            text.push('\n');
        }
        Ok(text)
    }

    async fn clear_logs(&self) -> AppResult<()> {
        self.store.lock().await.logs.clear();
        Ok(())
    }

    async fn references(&self, doc_path: &str) -> AppResult<Vec<String>> {
        Ok(self.store.lock().await.references_to(doc_path))
    }

    async fn list_share_links(&self) -> AppResult<Vec<ShareLink>> {
        let now = Utc::now();
        let store = self.store.lock().await;
        Ok(store
            .shares
            .iter()
            .filter(|link| link.is_active_at(now))
            .cloned()
            .collect())
    }

    async fn create_share_link(&self, doc_path: &str) -> AppResult<ShareLink> {
        let now = Utc::now();
        let mut store = self.store.lock().await;
        match store.documents.get(doc_path) {
            Some(Entry::File { mime, .. }) if mime.starts_with("text/") => {}
            _ => return Err(status(404, "Document not found")),
        }
        if let Some(existing) = store
            .shares
            .iter()
            .find(|link| link.document_path == doc_path && link.is_active_at(now))
        {
            return Ok(existing.clone());
        }
        let link = ShareLink {
            id: uuid::Uuid::new_v4().simple().to_string(),
            document_path: doc_path.to_string(),
            expires_at: ShareDuration::Day.to_chrono().map(|d| now + d),
        };
        store.shares.push(link.clone());
        store.log(format!("SHARE: Created share link for '{doc_path}'"));
        Ok(link)
    }

    async fn update_share_link(&self, id: &str, duration: ShareDuration) -> AppResult<()> {
        let now = Utc::now();
        let mut store = self.store.lock().await;
        let link = store
            .shares
            .iter_mut()
            .find(|link| link.id == id)
            .ok_or_else(|| status(404, "Link not found"))?;
        link.expires_at = duration.to_chrono().map(|d| now + d);
        store.log(format!("SHARE: Updated expiration for link ID '{id}'"));
        Ok(())
    }

    async fn delete_share_link(&self, id: &str) -> AppResult<()> {
        let mut store = self.store.lock().await;
        let idx = store
            .shares
            .iter()
            .position(|link| link.id == id)
            .ok_or_else(|| status(404, "Link not found"))?;
        let link = store.shares.remove(idx);
        store.log(format!(
            "SHARE: Revoked share link for '{}'",
            link.document_path
        ));
        Ok(())
    }
}
