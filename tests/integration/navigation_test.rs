//! Integration tests for routing, history and view transitions.

mod helpers;

use bytes::Bytes;
use notehub_client::MemoryNotesApi;
use notehub_state::{HistoryMode, Route, ViewState};

async fn seeded() -> helpers::TestApp {
    let store = MemoryNotesApi::new();
    store.seed_markdown("readme", "# Readme").await;
    store.seed_markdown("projects/plan", "# Plan").await;
    store.seed_markdown("my notes/first draft", "draft").await;
    store
        .seed("photos/cat", "image/png", Bytes::from_static(b"\x89PNG"))
        .await;
    store
        .seed("notes.log", "text/plain", Bytes::from_static(b"log line"))
        .await;
    helpers::TestApp::with_store(store).await
}

#[tokio::test]
async fn test_initial_state_is_welcome() {
    let mut app = seeded().await;

    let snapshot = app.controller.snapshot();
    assert_eq!(snapshot.view, &ViewState::Welcome);
    assert_eq!(snapshot.route, &Route::Welcome);
    assert_eq!(snapshot.tree.len(), 5);
    app.expect_success();
}

#[tokio::test]
async fn test_folder_url_opens_folder_view() {
    let mut app = seeded().await;

    assert!(
        app.controller
            .navigate("/data/projects", HistoryMode::Push)
            .await
    );
    match app.controller.view() {
        ViewState::Folder { node } => {
            assert_eq!(node.path, "projects");
            assert_eq!(node.children.len(), 1);
            assert_eq!(node.children[0].path, "projects/plan");
        }
        other => panic!("expected folder view, got {other:?}"),
    }
    assert!(app.failures().is_empty());
}

#[tokio::test]
async fn test_paths_with_spaces_round_trip_through_urls() {
    let mut app = seeded().await;

    assert!(
        app.controller
            .navigate("/data/my_notes/first_draft", HistoryMode::Push)
            .await
    );
    assert_eq!(
        app.controller.view(),
        &ViewState::Document {
            path: "my notes/first draft".to_string(),
            content: "draft".to_string()
        }
    );
    assert_eq!(app.controller.route().to_url(), "/data/my_notes/first_draft");
}

#[tokio::test]
async fn test_content_type_selects_view() {
    let mut app = seeded().await;

    app.controller.select_file("photos/cat").await;
    match app.controller.view() {
        ViewState::Image { mime, blob_url, .. } => {
            assert_eq!(mime, "image/png");
            assert!(blob_url.starts_with("blob:"));
        }
        other => panic!("expected image view, got {other:?}"),
    }

    app.controller.select_file("notes.log").await;
    assert_eq!(
        app.controller.view(),
        &ViewState::Text {
            path: "notes.log".to_string(),
            content: "log line".to_string()
        }
    );
    assert_eq!(app.controller.live_blob_count(), 0);
}

#[tokio::test]
async fn test_back_replays_without_new_entries() {
    let mut app = seeded().await;

    app.controller.select_file("readme").await;
    app.controller.open_trash().await;
    app.controller.open_settings().await;

    assert!(app.controller.back().await);
    assert_eq!(app.controller.view().name(), "trash");
    assert!(app.controller.back().await);
    assert_eq!(app.controller.view().selected_path(), Some("readme"));
    assert!(app.controller.back().await);
    assert_eq!(app.controller.view(), &ViewState::Welcome);
    assert!(!app.controller.back().await);

    assert!(app.controller.forward().await);
    assert_eq!(app.controller.route(), &Route::Data("readme".to_string()));
}

#[tokio::test]
async fn test_missing_document_reports_server_message() {
    let mut app = seeded().await;
    app.controller.select_file("readme").await;

    assert!(!app.controller.select_file("nope").await);
    let failures = app.failures();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].contains("404"), "{failures:?}");
    assert_eq!(app.controller.view().selected_path(), Some("readme"));
}

#[tokio::test]
async fn test_search_filter_on_snapshot() {
    let mut app = seeded().await;

    app.controller.set_search_query("PLAN");
    let snapshot = app.controller.snapshot();
    assert_eq!(snapshot.filtered_tree.len(), 1);
    assert_eq!(snapshot.filtered_tree[0].path, "projects");
    assert_eq!(app.controller.search_files("draft"), ["my notes/first draft"]);
}
