//! View transitions driven by routes and selections.

use tracing::debug;

use notehub_core::error::AppError;
use notehub_core::types::{ContentKind, DocumentContent};

use super::NotesController;
use crate::route::Route;
use crate::tree;
use crate::view::ViewState;

/// Whether a navigation records a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    /// A navigation the user initiated; pushed onto history.
    Push,
    /// Re-running the current history entry after back or forward.
    Replay,
}

impl NotesController {
    /// Navigate to an application URL.
    ///
    /// The history entry is pushed only when the view transition
    /// succeeds; a failed fetch leaves both the view and history as they
    /// were.
    pub async fn navigate(&mut self, url: &str, mode: HistoryMode) -> bool {
        self.open_route(Route::parse(url), mode).await
    }

    /// Open a document by path.
    pub async fn select_file(&mut self, doc_path: &str) -> bool {
        self.open_route(Route::data(doc_path), HistoryMode::Push)
            .await
    }

    /// Show a folder listing.
    pub async fn select_folder(&mut self, folder_path: &str) -> bool {
        match tree::find_by_path(&self.tree, folder_path).cloned() {
            Some(node) if node.is_folder() => {
                self.reveal(folder_path);
                self.set_view(ViewState::Folder { node });
                self.history.push(Route::data(folder_path));
                true
            }
            _ => {
                self.fail(
                    "Folder lookup failed",
                    AppError::not_found(format!("Folder '{folder_path}' not found.")),
                );
                false
            }
        }
    }

    /// Fetch the recycle bin and show it.
    pub async fn open_trash(&mut self) -> bool {
        self.open_route(Route::Trash, HistoryMode::Push).await
    }

    /// Show settings and load their data.
    pub async fn open_settings(&mut self) -> bool {
        self.open_route(Route::Settings, HistoryMode::Push).await
    }

    /// Return to the welcome view.
    pub async fn go_home(&mut self) -> bool {
        self.open_route(Route::Welcome, HistoryMode::Push).await
    }

    /// Step back in history and replay that entry.
    pub async fn back(&mut self) -> bool {
        let Some(route) = self.history.peek_back().cloned() else {
            return false;
        };
        let opened = self.open_route(route, HistoryMode::Replay).await;
        if opened {
            self.history.back();
        }
        opened
    }

    /// Step forward in history and replay that entry.
    pub async fn forward(&mut self) -> bool {
        let Some(route) = self.history.peek_forward().cloned() else {
            return false;
        };
        let opened = self.open_route(route, HistoryMode::Replay).await;
        if opened {
            self.history.forward();
        }
        opened
    }

    pub(super) async fn open_route(&mut self, route: Route, mode: HistoryMode) -> bool {
        debug!(route = %route, ?mode, "Navigating");
        let opened = match &route {
            Route::Welcome => {
                self.set_view(ViewState::Welcome);
                true
            }
            Route::Trash => self.enter_trash().await,
            Route::Settings => {
                self.set_view(ViewState::Settings);
                self.load_settings().await;
                true
            }
            Route::Data(doc_path) => self.open_path(doc_path).await,
        };
        if opened && mode == HistoryMode::Push {
            self.history.push(route);
        }
        opened
    }

    async fn enter_trash(&mut self) -> bool {
        match self.api.list_trash().await {
            Ok(items) => {
                self.set_view(ViewState::Trash { items });
                true
            }
            Err(e) => {
                self.fail("Failed to load recycle bin", e);
                false
            }
        }
    }

    async fn open_path(&mut self, doc_path: &str) -> bool {
        match self.api.get_content(doc_path).await {
            Ok(content) => {
                self.reveal(doc_path);
                self.show_content(doc_path, content);
                true
            }
            Err(e) if e.is_directory() => self.recover_folder(doc_path).await,
            Err(e) => {
                self.fail("Failed to open document", e);
                false
            }
        }
    }

    fn show_content(&mut self, doc_path: &str, content: DocumentContent) {
        let path = doc_path.to_string();
        let view = match content.kind() {
            ContentKind::Markdown => ViewState::Document {
                path,
                content: content.text(),
            },
            ContentKind::Image => {
                let blob_url = self.blobs.create(content.mime.clone(), content.body);
                ViewState::Image {
                    path,
                    blob_url,
                    mime: content.mime,
                }
            }
            ContentKind::Text => ViewState::Text {
                path,
                content: content.text(),
            },
        };
        self.set_view(view);
    }

    /// The server said the path is a folder. Show it as one, refetching
    /// the tree once if the local copy does not know the folder yet.
    async fn recover_folder(&mut self, folder_path: &str) -> bool {
        if tree::find_by_path(&self.tree, folder_path).is_none() {
            debug!(path = folder_path, "Folder missing from local tree, refetching");
            self.refresh_tree().await;
        }
        match tree::find_by_path(&self.tree, folder_path).cloned() {
            Some(node) => {
                self.reveal(folder_path);
                self.set_view(ViewState::Folder { node });
                true
            }
            None => {
                self.fail(
                    "Folder lookup failed",
                    AppError::not_found(format!("Folder '{folder_path}' not found.")),
                );
                false
            }
        }
    }
}
