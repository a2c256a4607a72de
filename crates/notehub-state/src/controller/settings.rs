//! Settings data: activity log, images, share links and maintenance.

use tracing::info;

use notehub_core::types::{ShareDuration, ShareLink};

use super::NotesController;

impl NotesController {
    /// Fetch the activity log, image list and share links.
    ///
    /// The three requests run concurrently and fail independently.
    pub async fn load_settings(&mut self) {
        let (logs, images, links) = futures::join!(
            self.api.fetch_logs(),
            self.api.list_images(),
            self.api.list_share_links()
        );
        match logs {
            Ok(text) => self.settings.activity_log = text,
            Err(e) => self.fail("Failed to load activity log", e),
        }
        match images {
            Ok(images) => self.settings.images = images,
            Err(e) => self.fail("Failed to load images", e),
        }
        match links {
            Ok(links) => self.settings.share_links = links,
            Err(e) => self.fail("Failed to load share links", e),
        }
    }

    pub(super) async fn load_images(&mut self) {
        match self.api.list_images().await {
            Ok(images) => self.settings.images = images,
            Err(e) => self.fail("Failed to load images", e),
        }
    }

    async fn load_share_links(&mut self) {
        match self.api.list_share_links().await {
            Ok(links) => self.settings.share_links = links,
            Err(e) => self.fail("Failed to load share links", e),
        }
    }

    /// Clear the server's activity log.
    pub async fn clear_logs(&mut self) -> bool {
        if let Err(e) = self.api.clear_logs().await {
            self.fail("Failed to clear activity log", e);
            return false;
        }
        self.settings.activity_log.clear();
        self.succeed("Activity log cleared.");
        true
    }

    /// Delete an uploaded image.
    pub async fn delete_image(&mut self, name: &str) -> bool {
        if let Err(e) = self.api.delete_image(name).await {
            self.fail("Failed to delete image", e);
            return false;
        }
        info!(image = name, "Image deleted");
        self.load_images().await;
        self.succeed("Image deleted.");
        true
    }

    /// Rename case-insensitive name collisions on the server.
    ///
    /// The renames are kept in the settings data for display.
    pub async fn resolve_conflicts(&mut self) -> bool {
        let operations = match self.api.resolve_conflicts().await {
            Ok(operations) => operations,
            Err(e) => {
                self.fail("Failed to resolve naming conflicts", e);
                return false;
            }
        };
        info!(renamed = operations.len(), "Naming conflicts resolved");
        for op in &operations {
            self.retarget(&op.old_path, &op.new_path);
        }
        let message = match operations.len() {
            0 => "No naming conflicts found.".to_string(),
            n => format!("Resolved {n} naming conflict(s)."),
        };
        self.settings.conflict_results = Some(operations);
        self.refresh_tree().await;
        self.succeed(message);
        true
    }

    /// Create a share link for a document, or get its active one.
    pub async fn create_share_link(&mut self, doc_path: &str) -> Option<ShareLink> {
        match self.api.create_share_link(doc_path).await {
            Ok(link) => {
                info!(path = doc_path, id = %link.id, "Share link ready");
                self.load_share_links().await;
                self.succeed("Share link created.");
                Some(link)
            }
            Err(e) => {
                self.fail("Failed to create share link", e);
                None
            }
        }
    }

    /// Change a share link's lifetime.
    pub async fn update_share_link(&mut self, id: &str, duration: ShareDuration) -> bool {
        if let Err(e) = self.api.update_share_link(id, duration).await {
            self.fail("Failed to update share link", e);
            return false;
        }
        self.load_share_links().await;
        self.succeed(match duration {
            ShareDuration::Never => "Share link no longer expires.".to_string(),
            other => format!("Share link now expires in {other}."),
        });
        true
    }

    /// Revoke a share link.
    pub async fn delete_share_link(&mut self, id: &str) -> bool {
        if let Err(e) = self.api.delete_share_link(id).await {
            self.fail("Failed to revoke share link", e);
            return false;
        }
        self.load_share_links().await;
        self.succeed("Share link revoked.");
        true
    }

    /// Documents that reference `doc_path`.
    pub async fn references(&mut self, doc_path: &str) -> Option<Vec<String>> {
        match self.api.references(doc_path).await {
            Ok(paths) => Some(paths),
            Err(e) => {
                self.fail("Failed to load references", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use notehub_client::MemoryNotesApi;
    use notehub_core::traits::Upload;

    use super::*;
    use crate::controller::tests::controller_with;
    use crate::view::ViewState;

    #[tokio::test]
    async fn test_logs_load_and_clear() {
        let api = MemoryNotesApi::new();
        let mut controller = controller_with(api).await;
        controller.create_folder("", "inbox").await;

        controller.open_settings().await;
        assert!(controller.settings().activity_log.contains("CREATE FOLDER"));
        assert!(controller.clear_logs().await);
        assert!(controller.settings().activity_log.is_empty());
    }

    #[tokio::test]
    async fn test_image_upload_and_delete() {
        let mut controller = controller_with(MemoryNotesApi::new()).await;
        controller.open_settings().await;

        let url = controller
            .upload_image(Upload::new("cat.png", Bytes::from_static(b"png")))
            .await
            .expect("uploaded");
        assert!(url.starts_with("/images/"));
        assert_eq!(controller.settings().images.len(), 1);

        let name = controller.settings().images[0].name.clone();
        assert!(controller.delete_image(&name).await);
        assert!(controller.settings().images.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_conflicts_follows_open_document() {
        let api = MemoryNotesApi::new();
        api.seed_markdown("Todo", "1").await;
        api.seed_markdown("todo", "2").await;
        let mut controller = controller_with(api).await;
        controller.select_file("todo").await;

        assert!(controller.resolve_conflicts().await);
        let results = controller
            .settings()
            .conflict_results
            .clone()
            .expect("results kept");
        assert_eq!(results[0].new_path, "todo-1");
        assert_eq!(controller.view().selected_path(), Some("todo-1"));
    }

    #[tokio::test]
    async fn test_share_link_lifecycle() {
        let api = MemoryNotesApi::new();
        api.seed_markdown("shared", "x").await;
        let mut controller = controller_with(api).await;

        let link = controller
            .create_share_link("shared")
            .await
            .expect("link");
        assert_eq!(controller.settings().share_links.len(), 1);

        assert!(controller.update_share_link(&link.id, ShareDuration::Never).await);
        assert_eq!(controller.settings().share_links[0].expires_at, None);

        assert!(controller.delete_share_link(&link.id).await);
        assert!(controller.settings().share_links.is_empty());
        assert!(controller.create_share_link("missing").await.is_none());
        assert_eq!(controller.view(), &ViewState::Welcome);
    }

    #[tokio::test]
    async fn test_references() {
        let api = MemoryNotesApi::new();
        api.seed_markdown("target", "t").await;
        api.seed_markdown("source", "see @(target)").await;
        let mut controller = controller_with(api).await;

        assert_eq!(
            controller.references("target").await.expect("refs"),
            ["source"]
        );
    }
}
