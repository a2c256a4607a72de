//! Integration tests for settings data, images, share links and export.

mod helpers;

use bytes::Bytes;
use notehub_client::MemoryNotesApi;
use notehub_core::traits::Upload;
use notehub_core::types::ShareDuration;
use notehub_state::tree::find_by_path;

#[tokio::test]
async fn test_settings_load_logs_images_and_links() {
    let store = MemoryNotesApi::new();
    store.seed_markdown("shared", "x").await;
    let mut app = helpers::TestApp::with_store(store).await;

    app.controller.create_folder("", "archive").await;
    app.controller.create_share_link("shared").await;
    app.controller
        .upload_image(Upload::new("diagram.png", Bytes::from_static(b"png")))
        .await
        .expect("uploaded");

    assert!(app.controller.open_settings().await);
    app.expect_success();
    let settings = app.controller.settings();
    assert!(settings.activity_log.contains("CREATE FOLDER: 'archive'"));
    assert_eq!(settings.images.len(), 1);
    assert!(settings.images[0].name.ends_with("diagram.png"));
    assert_eq!(settings.share_links.len(), 1);

    assert!(app.controller.clear_logs().await);
    assert!(app.controller.settings().activity_log.is_empty());
}

#[tokio::test]
async fn test_share_link_update_and_revoke() {
    let store = MemoryNotesApi::new();
    store.seed_markdown("plans/q3", "x").await;
    let mut app = helpers::TestApp::with_store(store).await;

    let link = app
        .controller
        .create_share_link("plans/q3")
        .await
        .expect("link");
    assert_eq!(link.document_path, "plans/q3");
    assert!(link.expires_at.is_some());

    let again = app
        .controller
        .create_share_link("plans/q3")
        .await
        .expect("link");
    assert_eq!(again.id, link.id);

    assert!(
        app.controller
            .update_share_link(&link.id, ShareDuration::Week)
            .await
    );
    assert!(app.controller.delete_share_link(&link.id).await);
    app.expect_success();
    assert!(app.controller.settings().share_links.is_empty());

    assert!(!app.controller.delete_share_link(&link.id).await);
    assert!(app.failures()[0].contains("404"));
}

#[tokio::test]
async fn test_resolve_conflicts_refetches_tree() {
    let store = MemoryNotesApi::new();
    store.seed_markdown("Notes", "1").await;
    store.seed_markdown("notes", "2").await;
    let mut app = helpers::TestApp::with_store(store).await;

    assert!(app.controller.resolve_conflicts().await);
    app.expect_success();
    let results = app
        .controller
        .settings()
        .conflict_results
        .clone()
        .expect("results");
    assert_eq!(results.len(), 1);
    assert!(find_by_path(app.controller.tree(), &results[0].new_path).is_some());
}

#[tokio::test]
async fn test_references_and_import_export() {
    let store = MemoryNotesApi::new();
    store.seed_markdown("target", "t").await;
    let mut app = helpers::TestApp::with_store(store).await;

    assert!(
        app.controller
            .import(Upload::new("linked.md", Bytes::from_static(b"see @(target)")))
            .await
    );
    assert!(find_by_path(app.controller.tree(), "linked").is_some());
    assert_eq!(
        app.controller.references("target").await.expect("refs"),
        ["linked"]
    );

    let exported = app.controller.export_item("linked").await.expect("export");
    assert_eq!(exported.as_ref(), b"see @(target)");

    // The in-process store does not build archives.
    assert!(app.controller.export_all().await.is_none());
    assert!(app.failures()[0].contains("501"));
}
