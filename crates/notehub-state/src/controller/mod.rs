//! The notes state controller.
//!
//! [`NotesController`] owns the document tree, the search memo, the
//! expanded folders, the current view, navigation history, the pending
//! mutation intent, queued notifications, object URLs and the settings
//! data. Presentation code reads a [`Snapshot`] and calls command
//! methods; it never mutates state directly.
//!
//! Command methods do not return errors. Failures are turned into error
//! notifications and leave the state as it was, which is what a user
//! interface needs. Methods that complete an operation return whether it
//! succeeded so scripted callers can branch on it.

mod mutation;
mod navigation;
mod settings;
mod trash;

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, warn};

use notehub_core::error::AppError;
use notehub_core::traits::NotesApi;
use notehub_core::types::{ImageFile, RenameOperation, ShareLink, TreeNode};

use crate::blob::{Blob, BlobRegistry};
use crate::history::History;
use crate::intent::PendingMutation;
use crate::notify::Notification;
use crate::route::Route;
use crate::tree::{self, FilteredTree};
use crate::view::ViewState;

pub use navigation::HistoryMode;

/// Data shown by the settings view.
#[derive(Debug, Clone, Default)]
pub struct SettingsData {
    /// Activity log text.
    pub activity_log: String,
    /// Uploaded images.
    pub images: Vec<ImageFile>,
    /// Active share links.
    pub share_links: Vec<ShareLink>,
    /// Result of the last conflict resolution run, if any.
    pub conflict_results: Option<Vec<RenameOperation>>,
}

/// Read-only view of the controller state.
#[derive(Debug)]
pub struct Snapshot<'a> {
    /// Current view.
    pub view: &'a ViewState,
    /// Current route.
    pub route: &'a Route,
    /// Full document tree.
    pub tree: &'a [TreeNode],
    /// Tree filtered by the search query.
    pub filtered_tree: &'a [TreeNode],
    /// Search query.
    pub search_query: &'a str,
    /// Expanded folder paths.
    pub expanded: &'a BTreeSet<String>,
    /// Open intent, if any.
    pub pending: Option<&'a PendingMutation>,
    /// Settings data.
    pub settings: &'a SettingsData,
    /// Whether the document buffer differs from what was last loaded or saved.
    pub is_dirty: bool,
    /// Whether the first tree fetch has not completed yet.
    pub is_loading: bool,
}

/// Owns all client-side workspace state.
#[derive(Debug)]
pub struct NotesController {
    api: Arc<dyn NotesApi>,
    note_template: String,
    tree: Vec<TreeNode>,
    generation: u64,
    filtered: FilteredTree,
    search_query: String,
    expanded: BTreeSet<String>,
    view: ViewState,
    history: History,
    pending: Option<PendingMutation>,
    notifications: Vec<Notification>,
    blobs: BlobRegistry,
    settings: SettingsData,
    dirty: bool,
    loading: bool,
}

impl NotesController {
    /// Create a controller over an API implementation.
    ///
    /// Nothing is fetched until [`NotesController::initialize`] runs.
    pub fn new(api: Arc<dyn NotesApi>, note_template: impl Into<String>) -> Self {
        Self {
            api,
            note_template: note_template.into(),
            tree: Vec::new(),
            generation: 0,
            filtered: FilteredTree::new(),
            search_query: String::new(),
            expanded: BTreeSet::new(),
            view: ViewState::Welcome,
            history: History::default(),
            pending: None,
            notifications: Vec::new(),
            blobs: BlobRegistry::new(),
            settings: SettingsData::default(),
            dirty: false,
            loading: true,
        }
    }

    /// Fetch the tree and enter the welcome view.
    ///
    /// A failed first fetch leaves the controller loading; callers may
    /// retry `initialize`.
    pub async fn initialize(&mut self) -> bool {
        let loaded = self.refresh_tree().await;
        if loaded {
            self.loading = false;
            self.set_view(ViewState::Welcome);
        }
        loaded
    }

    /// Replace the tree with a fresh copy from the server.
    ///
    /// An open folder view is re-pointed at the new node; if the folder no
    /// longer exists the view falls back to welcome.
    pub async fn refresh_tree(&mut self) -> bool {
        match self.api.list_documents().await {
            Ok(tree) => {
                self.tree = tree;
                self.generation += 1;
                debug!(generation = self.generation, "Document tree refreshed");
                self.sync_folder_view();
                true
            }
            Err(e) => {
                self.fail("Failed to load documents", e);
                false
            }
        }
    }

    fn sync_folder_view(&mut self) {
        let ViewState::Folder { node } = &self.view else {
            return;
        };
        let fresh = tree::find_by_path(&self.tree, &node.path).cloned();
        match fresh {
            Some(node) => self.view = ViewState::Folder { node },
            None => self.set_view(ViewState::Welcome),
        }
    }

    /// Read-only state for rendering.
    pub fn snapshot(&mut self) -> Snapshot<'_> {
        let filtered_tree = self
            .filtered
            .get(&self.tree, self.generation, &self.search_query);
        Snapshot {
            view: &self.view,
            route: self.history.current(),
            tree: &self.tree,
            filtered_tree,
            search_query: &self.search_query,
            expanded: &self.expanded,
            pending: self.pending.as_ref(),
            settings: &self.settings,
            is_dirty: self.dirty,
            is_loading: self.loading,
        }
    }

    /// Current view.
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Full document tree.
    pub fn tree(&self) -> &[TreeNode] {
        &self.tree
    }

    /// Current route.
    pub fn route(&self) -> &Route {
        self.history.current()
    }

    /// Settings data.
    pub fn settings(&self) -> &SettingsData {
        &self.settings
    }

    /// Open intent, if any.
    pub fn pending(&self) -> Option<&PendingMutation> {
        self.pending.as_ref()
    }

    /// Resolve an object URL held by the image view.
    pub fn blob(&self, url: &str) -> Option<&Blob> {
        self.blobs.get(url)
    }

    /// Number of live object URLs.
    pub fn live_blob_count(&self) -> usize {
        self.blobs.len()
    }

    /// Drain queued notifications.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Update the search query.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// The tree filtered by the current search query.
    pub fn filtered_tree(&mut self) -> &[TreeNode] {
        self.filtered
            .get(&self.tree, self.generation, &self.search_query)
    }

    /// File paths matching `query`, for the document reference picker.
    pub fn search_files(&self, query: &str) -> Vec<String> {
        tree::search_files(&self.tree, query)
    }

    /// Expand every folder.
    pub fn expand_all(&mut self) {
        self.expanded = tree::list_all_folder_paths(&self.tree).into_iter().collect();
    }

    /// Collapse every folder.
    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Toggle one folder. Returns whether it is now expanded.
    pub fn toggle_expanded(&mut self, folder: &str) -> bool {
        if self.expanded.remove(folder) {
            false
        } else {
            self.expanded.insert(folder.to_string());
            true
        }
    }

    /// Expand every ancestor of `path` so it is visible.
    pub fn reveal(&mut self, path: &str) {
        self.expanded.extend(tree::ancestor_paths(path));
    }

    /// Switch views, revoking the outgoing view's object URL.
    fn set_view(&mut self, view: ViewState) {
        if let Some(url) = self.view.blob_url()
            && view.blob_url() != Some(url)
        {
            let url = url.to_string();
            self.blobs.revoke(&url);
        }
        self.dirty = false;
        self.view = view;
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    fn succeed(&mut self, message: impl Into<String>) {
        self.notify(Notification::success(message));
    }

    /// Refuse an operation locally, before any network call.
    fn reject(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!(%message, "Operation rejected");
        self.notify(Notification::warning(message));
    }

    /// Refuse an operation locally and report it as an error.
    fn reject_with_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!(%message, "Operation rejected");
        self.notify(Notification::error(message));
    }

    /// Report a failed operation with the server's message.
    fn fail(&mut self, context: &str, err: AppError) {
        warn!(error = %err, "{}", context);
        self.notify(Notification::error(err.message));
    }
}
