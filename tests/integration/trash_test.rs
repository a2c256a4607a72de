//! Integration tests for the recycle bin.

mod helpers;

use notehub_client::MemoryNotesApi;
use notehub_core::types::TrashedItem;
use notehub_state::ViewState;
use notehub_state::tree::find_by_path;

fn trash_items(app: &helpers::TestApp) -> Vec<TrashedItem> {
    match app.controller.view() {
        ViewState::Trash { items } => items.clone(),
        other => panic!("expected trash view, got {other:?}"),
    }
}

#[tokio::test]
async fn test_delete_moves_item_to_trash_and_restore_brings_it_back() {
    let store = MemoryNotesApi::new();
    store.seed_markdown("journal/2024 review", "looking back").await;
    let mut app = helpers::TestApp::with_store(store).await;

    assert!(app.controller.delete("journal/2024 review").await);
    assert!(find_by_path(app.controller.tree(), "journal/2024 review").is_none());

    assert!(app.controller.open_trash().await);
    let items = trash_items(&app);
    assert_eq!(items.len(), 1);
    assert!(items[0].name.starts_with("2024 review_"));

    assert!(app.controller.restore(&items[0].path).await);
    app.expect_success();
    assert!(trash_items(&app).is_empty());
    assert!(find_by_path(app.controller.tree(), "journal/2024 review").is_some());
    assert_eq!(
        app.stored_text("journal/2024 review").await.as_deref(),
        Some("looking back")
    );
}

#[tokio::test]
async fn test_restore_into_taken_name_fails() {
    let store = MemoryNotesApi::new();
    store.seed_markdown("todo", "old").await;
    let mut app = helpers::TestApp::with_store(store).await;

    app.controller.delete("todo").await;
    app.controller.create_note("", "todo").await;
    app.controller.open_trash().await;
    app.expect_success();

    let item = trash_items(&app).remove(0);
    assert!(!app.controller.restore(&item.path).await);
    assert!(app.failures()[0].contains("409"));
    assert_eq!(trash_items(&app).len(), 1);
}

#[tokio::test]
async fn test_permanent_delete_and_empty() {
    let store = MemoryNotesApi::new();
    for doc in ["one", "two", "three"] {
        store.seed_markdown(doc, doc).await;
    }
    let mut app = helpers::TestApp::with_store(store).await;
    for doc in ["one", "two", "three"] {
        app.controller.delete(doc).await;
    }
    app.controller.open_trash().await;

    let first = trash_items(&app).remove(0);
    assert!(app.controller.delete_permanently(&first.path).await);
    assert_eq!(trash_items(&app).len(), 2);

    // A second purge of the same entry loses the race and reports it.
    assert!(!app.controller.delete_permanently(&first.path).await);
    assert!(app.failures().iter().any(|m| m.contains("404")));

    assert!(app.controller.empty_trash().await);
    assert!(trash_items(&app).is_empty());
}
