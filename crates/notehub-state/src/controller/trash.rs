//! Recycle bin operations.

use tracing::info;

use super::NotesController;
use crate::view::ViewState;

impl NotesController {
    /// Move a recycle bin item back into the tree.
    pub async fn restore(&mut self, trash_path: &str) -> bool {
        if let Err(e) = self.api.restore(trash_path).await {
            self.fail("Failed to restore item", e);
            return false;
        }
        info!(item = trash_path, "Item restored");
        self.after_trash_change().await;
        self.succeed("Item restored.");
        true
    }

    /// Remove a recycle bin item for good.
    pub async fn delete_permanently(&mut self, trash_path: &str) -> bool {
        if let Err(e) = self.api.delete_permanently(trash_path).await {
            self.fail("Failed to delete item", e);
            return false;
        }
        info!(item = trash_path, "Item permanently deleted");
        self.after_trash_change().await;
        self.succeed("Item permanently deleted.");
        true
    }

    /// Remove every recycle bin item.
    pub async fn empty_trash(&mut self) -> bool {
        if let Err(e) = self.api.empty_trash().await {
            self.fail("Failed to empty recycle bin", e);
            return false;
        }
        info!("Recycle bin emptied");
        self.after_trash_change().await;
        self.succeed("Recycle bin emptied.");
        true
    }

    /// Refresh the open trash listing, then the tree.
    async fn after_trash_change(&mut self) {
        if matches!(self.view, ViewState::Trash { .. }) {
            match self.api.list_trash().await {
                Ok(items) => self.view = ViewState::Trash { items },
                Err(e) => self.fail("Failed to load recycle bin", e),
            }
        }
        self.refresh_tree().await;
    }
}
