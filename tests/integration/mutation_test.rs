//! Integration tests for create, rename, move, delete and save.

mod helpers;

use notehub_client::MemoryNotesApi;
use notehub_core::traits::NotesApi;
use notehub_core::types::NodeKind;
use notehub_state::ViewState;
use notehub_state::tree::find_by_path;

#[tokio::test]
async fn test_create_note_in_existing_folder() {
    let store = MemoryNotesApi::new();
    store.seed_folder("folder").await;
    let mut app = helpers::TestApp::with_store(store).await;

    app.controller.begin_create_note("folder");
    app.controller.set_pending_name("note");
    assert!(app.controller.confirm_pending().await);
    app.expect_success();

    let folder = find_by_path(app.controller.tree(), "folder").expect("folder");
    assert_eq!(folder.children.len(), 1);
    assert_eq!(folder.children[0].path, "folder/note");
    assert_eq!(folder.children[0].kind, NodeKind::File);
    assert_eq!(
        app.stored_text("folder/note").await.as_deref(),
        Some(helpers::TEMPLATE)
    );
    assert_eq!(app.controller.view().selected_path(), Some("folder/note"));
}

#[tokio::test]
async fn test_create_folder_with_space_in_name() {
    let mut app = helpers::TestApp::new().await;

    assert!(app.controller.create_folder("", "Meeting Notes").await);
    assert!(app.controller.create_note("Meeting Notes", "Weekly sync").await);
    app.expect_success();

    assert!(find_by_path(app.controller.tree(), "Meeting Notes/Weekly sync").is_some());
}

#[tokio::test]
async fn test_move_to_root_and_reject_same_parent() {
    let store = MemoryNotesApi::new();
    store.seed_markdown("a/b", "content").await;
    let mut app = helpers::TestApp::with_store(store).await;

    assert!(!app.controller.move_item("a/b", "a").await);
    assert_eq!(
        app.failures(),
        ["Cannot move item to its current location."]
    );
    assert!(app.store.fetch_logs().await.expect("logs").is_empty());

    assert!(app.controller.move_item("a/b", "").await);
    app.expect_success();
    assert!(find_by_path(app.controller.tree(), "b").is_some());
    assert!(find_by_path(app.controller.tree(), "a/b").is_none());
    assert_eq!(app.stored_text("b").await.as_deref(), Some("content"));
}

#[tokio::test]
async fn test_rename_conflict_keeps_state() {
    let store = MemoryNotesApi::new();
    store.seed_markdown("alpha", "a").await;
    store.seed_markdown("beta", "b").await;
    let mut app = helpers::TestApp::with_store(store).await;
    let before = app.controller.tree().to_vec();

    assert!(app.controller.begin_rename("alpha"));
    app.controller.set_pending_name("BETA");
    assert!(!app.controller.confirm_pending().await);

    let failures = app.failures();
    assert!(failures[0].contains("409"), "{failures:?}");
    assert!(app.controller.pending().is_some());
    assert_eq!(app.controller.tree(), before.as_slice());
}

#[tokio::test]
async fn test_edit_save_and_refetch() {
    let store = MemoryNotesApi::new();
    store.seed_markdown("readme", "# Old").await;
    let mut app = helpers::TestApp::with_store(store).await;

    assert!(app.controller.select_file("readme").await);
    assert!(app.controller.edit_content("# New\n\nBody"));
    assert!(app.controller.save().await);
    app.expect_success();

    app.controller.go_home().await;
    app.controller.select_file("readme").await;
    assert_eq!(
        app.controller.view(),
        &ViewState::Document {
            path: "readme".to_string(),
            content: "# New\n\nBody".to_string()
        }
    );
}

#[tokio::test]
async fn test_delete_open_document_returns_to_welcome() {
    let store = MemoryNotesApi::new();
    store.seed_markdown("docs/spec", "x").await;
    let mut app = helpers::TestApp::with_store(store).await;
    app.controller.select_file("docs/spec").await;

    assert!(app.controller.delete("docs").await);
    app.expect_success();
    assert_eq!(app.controller.view(), &ViewState::Welcome);
    assert!(app.controller.tree().is_empty());
}
