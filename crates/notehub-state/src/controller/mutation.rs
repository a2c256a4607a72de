//! Tree mutations, intents and the document editor buffer.
//!
//! Every mutation follows the same shape: validate input locally, build
//! the target path with [`path::join`], call the API, and on success
//! refetch the whole tree and report it. Failures become notifications
//! and leave the local state untouched.

use bytes::Bytes;
use tracing::info;

use notehub_core::path;
use notehub_core::traits::Upload;
use notehub_core::types::TreeNode;

use super::NotesController;
use super::navigation::HistoryMode;
use crate::intent::PendingMutation;
use crate::route::Route;
use crate::tree;
use crate::view::ViewState;

/// Display name for a folder path in messages.
fn folder_label(folder: &str) -> &str {
    if folder.is_empty() { "root" } else { folder }
}

/// Whether `candidate` is `item` itself or lies inside it.
fn is_within(candidate: &str, item: &str) -> bool {
    candidate == item || path::is_descendant_of(candidate, item)
}

/// Where `candidate` ends up when `old` is renamed to `new`, if affected.
fn relocate(candidate: &str, old: &str, new: &str) -> Option<String> {
    is_within(candidate, old).then(|| format!("{new}{}", &candidate[old.len()..]))
}

impl NotesController {
    // Intents

    /// Open a create-note intent inside `parent`.
    pub fn begin_create_note(&mut self, parent: &str) {
        self.pending = Some(PendingMutation::CreateNote {
            parent: parent.to_string(),
            name: String::new(),
        });
    }

    /// Open a create-folder intent inside `parent`.
    pub fn begin_create_folder(&mut self, parent: &str) {
        self.pending = Some(PendingMutation::CreateFolder {
            parent: parent.to_string(),
            name: String::new(),
        });
    }

    /// Open a rename intent for an item in the tree.
    pub fn begin_rename(&mut self, target: &str) -> bool {
        self.open_intent(target, |node| PendingMutation::Rename {
            new_name: node.name.clone(),
            target: node,
        })
    }

    /// Open a move intent for an item in the tree.
    pub fn begin_move(&mut self, target: &str) -> bool {
        self.open_intent(target, |node| PendingMutation::Move {
            destination: path::parent(&node.path).to_string(),
            target: node,
        })
    }

    /// Open a delete intent for an item in the tree.
    pub fn begin_delete(&mut self, target: &str) -> bool {
        self.open_intent(target, |target| PendingMutation::Delete { target })
    }

    fn open_intent(
        &mut self,
        target: &str,
        build: impl FnOnce(TreeNode) -> PendingMutation,
    ) -> bool {
        match tree::find_by_path(&self.tree, target).cloned() {
            Some(node) => {
                self.pending = Some(build(node));
                true
            }
            None => {
                self.reject(format!("'{target}' is not in the document tree."));
                false
            }
        }
    }

    /// Fill the name field of the open intent.
    pub fn set_pending_name(&mut self, name: impl Into<String>) -> bool {
        self.pending
            .as_mut()
            .is_some_and(|pending| pending.set_name(name))
    }

    /// Fill the destination of the open move intent.
    pub fn set_pending_destination(&mut self, destination: impl Into<String>) -> bool {
        self.pending
            .as_mut()
            .is_some_and(|pending| pending.set_destination(destination))
    }

    /// Discard the open intent.
    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    /// Run the open intent. It is closed on success and kept on failure
    /// so the user can correct it.
    pub async fn confirm_pending(&mut self) -> bool {
        let Some(intent) = self.pending.clone() else {
            self.reject("Nothing to confirm.");
            return false;
        };
        let done = match intent {
            PendingMutation::CreateNote { parent, name } => self.create_note(&parent, &name).await,
            PendingMutation::CreateFolder { parent, name } => {
                self.create_folder(&parent, &name).await
            }
            PendingMutation::Rename { target, new_name } => {
                self.rename(&target.path, &new_name).await
            }
            PendingMutation::Move {
                target,
                destination,
            } => self.move_item(&target.path, &destination).await,
            PendingMutation::Delete { target } => self.delete(&target.path).await,
        };
        if done {
            self.pending = None;
        }
        done
    }

    // Operations

    fn validate_name(&mut self, name: &str) -> Option<String> {
        let name = name.trim();
        if name.is_empty() {
            self.reject("Name cannot be empty.");
            return None;
        }
        if name.contains(path::SEPARATOR) {
            self.reject("Name cannot contain '/'.");
            return None;
        }
        Some(name.to_string())
    }

    /// Create a note from the configured template and open it.
    pub async fn create_note(&mut self, parent: &str, name: &str) -> bool {
        let Some(name) = self.validate_name(name) else {
            return false;
        };
        let doc_path = path::join(parent, &name);
        let template = self.note_template.clone();
        if let Err(e) = self.api.create_note(&doc_path, &template).await {
            self.fail("Failed to create note", e);
            return false;
        }
        info!(path = %doc_path, "Note created");
        self.refresh_tree().await;
        self.succeed(format!("Note '{name}' created."));
        self.open_route(Route::data(doc_path), HistoryMode::Push)
            .await;
        true
    }

    /// Create an empty folder.
    pub async fn create_folder(&mut self, parent: &str, name: &str) -> bool {
        let Some(name) = self.validate_name(name) else {
            return false;
        };
        let folder_path = path::join(parent, &name);
        if let Err(e) = self.api.create_folder(&folder_path).await {
            self.fail("Failed to create folder", e);
            return false;
        }
        info!(path = %folder_path, "Folder created");
        self.reveal(&folder_path);
        self.refresh_tree().await;
        self.succeed(format!("Folder '{name}' created."));
        true
    }

    /// Rename an item in place.
    pub async fn rename(&mut self, target: &str, new_name: &str) -> bool {
        let Some(new_name) = self.validate_name(new_name) else {
            return false;
        };
        let new_path = path::join(path::parent(target), &new_name);
        if new_path == target {
            self.reject("The new name is the same as the current one.");
            return false;
        }
        if let Err(e) = self.api.rename(target, &new_path).await {
            self.fail("Failed to rename item", e);
            return false;
        }
        info!(from = target, to = %new_path, "Item renamed");
        self.retarget(target, &new_path);
        self.refresh_tree().await;
        self.succeed(format!("Renamed to '{new_name}'."));
        true
    }

    /// Move an item into `destination` (`""` for the root).
    pub async fn move_item(&mut self, target: &str, destination: &str) -> bool {
        let destination = destination.trim_matches(path::SEPARATOR);
        if destination == path::parent(target) {
            self.reject_with_error("Cannot move item to its current location.");
            return false;
        }
        if destination == target || path::is_descendant_of(destination, target) {
            self.reject_with_error("Cannot move a folder into itself.");
            return false;
        }
        let new_path = path::join(destination, path::file_name(target));
        if let Err(e) = self.api.rename(target, &new_path).await {
            self.fail("Failed to move item", e);
            return false;
        }
        info!(from = target, to = %new_path, "Item moved");
        self.retarget(target, &new_path);
        self.reveal(&new_path);
        self.refresh_tree().await;
        self.succeed(format!(
            "Moved '{}' to '{}'.",
            path::file_name(target),
            folder_label(destination)
        ));
        true
    }

    /// Move an item to the recycle bin.
    ///
    /// If the open view shows the item or something inside it, the view
    /// returns to welcome.
    pub async fn delete(&mut self, target: &str) -> bool {
        if let Err(e) = self.api.delete(target).await {
            self.fail("Failed to delete item", e);
            return false;
        }
        info!(path = target, "Item moved to recycle bin");
        let showing = self
            .view
            .selected_path()
            .is_some_and(|open| is_within(open, target));
        if showing {
            self.set_view(ViewState::Welcome);
            self.history.push(Route::Welcome);
        }
        self.expanded
            .retain(|folder| !is_within(folder, target));
        self.refresh_tree().await;
        self.succeed(format!(
            "'{}' moved to the recycle bin.",
            path::file_name(target)
        ));
        true
    }

    /// Point the open view, history entry and expanded folders at the new
    /// location of a renamed or moved item.
    pub(super) fn retarget(&mut self, old: &str, new: &str) {
        let moved = match &mut self.view {
            ViewState::Document { path, .. }
            | ViewState::Image { path, .. }
            | ViewState::Text { path, .. } => relocate(path, old, new).map(|p| *path = p),
            ViewState::Folder { node } => relocate(&node.path, old, new).map(|p| node.path = p),
            _ => None,
        };
        if moved.is_some() {
            self.history.replace(self.view.route());
        }
        self.expanded = std::mem::take(&mut self.expanded)
            .into_iter()
            .map(|folder| relocate(&folder, old, new).unwrap_or(folder))
            .collect();
    }

    /// Replace the open document's buffer.
    pub fn edit_content(&mut self, text: impl Into<String>) -> bool {
        match &mut self.view {
            ViewState::Document { content, .. } => {
                *content = text.into();
                self.dirty = true;
                true
            }
            _ => false,
        }
    }

    /// Append a reference token for `target` to the open document.
    pub fn insert_reference(&mut self, target: &str) -> bool {
        match &mut self.view {
            ViewState::Document { content, .. } => {
                content.push_str(&tree::reference_token(target));
                self.dirty = true;
                true
            }
            _ => false,
        }
    }

    /// Persist the open document's buffer.
    pub async fn save(&mut self) -> bool {
        let ViewState::Document { path, content } = &self.view else {
            self.reject("No document is open.");
            return false;
        };
        let (doc_path, content) = (path.clone(), content.clone());
        if let Err(e) = self.api.save_content(&doc_path, &content).await {
            self.fail("Failed to save document", e);
            return false;
        }
        info!(path = %doc_path, bytes = content.len(), "Document saved");
        self.dirty = false;
        self.refresh_tree().await;
        self.succeed("Document saved.");
        true
    }

    /// Import a `.md`, `.txt` or `.zip` file into the workspace.
    pub async fn import(&mut self, upload: Upload) -> bool {
        let file_name = upload.file_name.clone();
        if let Err(e) = self.api.import(upload).await {
            self.fail("Import failed", e);
            return false;
        }
        info!(file = %file_name, "File imported");
        self.refresh_tree().await;
        self.succeed(format!("Imported '{file_name}'."));
        true
    }

    /// Download one document or folder.
    pub async fn export_item(&mut self, target: &str) -> Option<Bytes> {
        match self.api.export_item(target).await {
            Ok(data) => Some(data),
            Err(e) => {
                self.fail("Export failed", e);
                None
            }
        }
    }

    /// Download the whole workspace as a zip archive.
    pub async fn export_all(&mut self) -> Option<Bytes> {
        match self.api.export_all().await {
            Ok(data) => Some(data),
            Err(e) => {
                self.fail("Export failed", e);
                None
            }
        }
    }

    /// Upload an image and return the URL to embed in notes.
    pub async fn upload_image(&mut self, upload: Upload) -> Option<String> {
        match self.api.upload_image(upload).await {
            Ok(uploaded) => {
                info!(url = %uploaded.url, "Image uploaded");
                if matches!(self.view, ViewState::Settings) {
                    self.load_images().await;
                }
                self.succeed("Image uploaded.");
                Some(uploaded.url)
            }
            Err(e) => {
                self.fail("Image upload failed", e);
                None
            }
        }
    }
}
