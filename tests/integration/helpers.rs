//! Shared test helpers for integration tests.
//!
//! [`TestApp`] serves the document REST API from an in-process axum
//! router backed by [`MemoryNotesApi`], and drives it through the real
//! HTTP client and a [`NotesController`]. Tests seed data directly into
//! the store and observe the results through the controller.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use bytes::Bytes;
use serde_json::Value;
use tokio::net::TcpListener;

use notehub_client::{HttpNotesClient, MemoryNotesApi};
use notehub_core::config::client::ClientConfig;
use notehub_core::error::AppError;
use notehub_core::path;
use notehub_core::traits::{NotesApi, Upload};
use notehub_core::types::ShareDuration;
use notehub_state::{Notification, NotesController};

/// Template used for notes created in tests
pub const TEMPLATE: &str = "# New Document\n\nWrite your content here.";

type Store = Arc<MemoryNotesApi>;

/// Test application context
pub struct TestApp {
    /// Backing store, for seeding and direct inspection
    pub store: Store,
    /// Controller talking to the store over HTTP
    pub controller: NotesController,
    /// Base URL of the test server
    pub base_url: String,
}

impl TestApp {
    /// Start a server over an empty store
    pub async fn new() -> Self {
        Self::with_store(MemoryNotesApi::new()).await
    }

    /// Start a server over a pre-seeded store and initialize the controller
    pub async fn with_store(store: MemoryNotesApi) -> Self {
        let store = Arc::new(store);
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test server");
        let addr = listener.local_addr().expect("Failed to read local addr");
        let router = router(store.clone());
        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Test server failed");
        });

        let base_url = format!("http://{addr}");
        let config = ClientConfig {
            base_url: base_url.clone(),
            timeout_seconds: 5,
            ..ClientConfig::default()
        };
        let client = HttpNotesClient::new(&config).expect("Failed to build client");
        let mut controller = NotesController::new(Arc::new(client), TEMPLATE);
        assert!(controller.initialize().await, "initial tree fetch failed");

        Self {
            store,
            controller,
            base_url,
        }
    }

    /// Drain notifications, failing the test on any failure
    pub fn expect_success(&mut self) -> Vec<Notification> {
        let notes = self.controller.take_notifications();
        assert!(
            notes.iter().all(|n| !n.is_failure()),
            "unexpected failure: {notes:?}"
        );
        notes
    }

    /// Drain notifications, returning the messages of failures
    pub fn failures(&mut self) -> Vec<String> {
        self.controller
            .take_notifications()
            .into_iter()
            .filter(Notification::is_failure)
            .map(|n| n.message)
            .collect()
    }

    /// Content of a document read straight from the store
    pub async fn stored_text(&self, doc_path: &str) -> Option<String> {
        self.store.get_content(doc_path).await.ok().map(|c| c.text())
    }
}

/// The document REST API over a memory store
fn router(store: Store) -> Router {
    Router::new()
        .route("/api/documents", get(list_documents))
        .route(
            "/api/documents/{*path}",
            get(get_document).put(put_document).delete(delete_document),
        )
        .route("/api/folders/{*path}", post(create_folder))
        .route("/api/import", post(import))
        .route("/api/export/", get(export_all))
        .route("/api/export/{*path}", get(export_item))
        .route("/api/images", get(list_images).post(upload_image))
        .route("/api/images/{name}", delete(delete_image))
        .route("/api/trash", get(list_trash))
        .route("/api/trash/restore/{name}", put(restore))
        .route("/api/trash/delete/{name}", delete(purge))
        .route("/api/trash/empty", delete(empty_trash))
        .route("/api/settings/resolve-conflicts", post(resolve_conflicts))
        .route("/api/logs", get(fetch_logs).delete(clear_logs))
        .route("/api/references/{*path}", get(references))
        .route("/api/share", get(list_share_links))
        .route(
            "/api/share/{*rest}",
            post(create_share_link)
                .put(update_share_link)
                .delete(delete_share_link),
        )
        .with_state(store)
}

/// Turn a store error back into the status and body the server would send.
fn error_response(err: AppError) -> Response {
    let status = err
        .status
        .and_then(|s| StatusCode::from_u16(s).ok())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = err
        .message
        .split_once(" - ")
        .map(|(_, body)| body.to_string())
        .unwrap_or(err.message);
    (status, body).into_response()
}

fn reply<T: serde::Serialize>(result: Result<T, AppError>) -> Response {
    match result {
        Ok(value) => axum::Json(value).into_response(),
        Err(e) => error_response(e),
    }
}

fn empty(result: Result<(), AppError>) -> Response {
    match result {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => error_response(e),
    }
}

fn binary(result: Result<Bytes, AppError>) -> Response {
    match result {
        Ok(data) => ([(header::CONTENT_TYPE, "application/octet-stream")], data).into_response(),
        Err(e) => error_response(e),
    }
}

async fn first_file(mut multipart: Multipart) -> Option<Upload> {
    let field = multipart.next_field().await.ok()??;
    let file_name = field.file_name()?.to_string();
    let data = field.bytes().await.ok()?;
    Some(Upload::new(file_name, data))
}

async fn list_documents(State(store): State<Store>) -> Response {
    reply(store.list_documents().await)
}

async fn get_document(State(store): State<Store>, Path(encoded): Path<String>) -> Response {
    match store.get_content(&path::decode(&encoded)).await {
        Ok(content) => ([(header::CONTENT_TYPE, content.mime)], content.body).into_response(),
        Err(e) => error_response(e),
    }
}

async fn put_document(
    State(store): State<Store>,
    Path(encoded): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    if is_json && let Some(target) = encoded.strip_suffix("/rename") {
        let request: Value = match serde_json::from_slice(&body) {
            Ok(v) => v,
            Err(_) => return (StatusCode::BAD_REQUEST, "invalid request body").into_response(),
        };
        let new_path = request["newPath"].as_str().unwrap_or_default();
        return empty(store.rename(&path::decode(target), new_path).await);
    }
    let content = String::from_utf8_lossy(&body);
    empty(store.save_content(&path::decode(&encoded), &content).await)
}

async fn delete_document(State(store): State<Store>, Path(encoded): Path<String>) -> Response {
    empty(store.delete(&path::decode(&encoded)).await)
}

async fn create_folder(State(store): State<Store>, Path(encoded): Path<String>) -> Response {
    empty(store.create_folder(&path::decode(&encoded)).await)
}

async fn import(State(store): State<Store>, multipart: Multipart) -> Response {
    match first_file(multipart).await {
        Some(upload) => empty(store.import(upload).await),
        None => (StatusCode::BAD_REQUEST, "missing file").into_response(),
    }
}

async fn export_all(State(store): State<Store>) -> Response {
    binary(store.export_all().await)
}

async fn export_item(State(store): State<Store>, Path(encoded): Path<String>) -> Response {
    binary(store.export_item(&path::decode(&encoded)).await)
}

async fn list_images(State(store): State<Store>) -> Response {
    reply(store.list_images().await)
}

async fn upload_image(State(store): State<Store>, multipart: Multipart) -> Response {
    match first_file(multipart).await {
        Some(upload) => reply(store.upload_image(upload).await),
        None => (StatusCode::BAD_REQUEST, "Could not get image from form").into_response(),
    }
}

async fn delete_image(State(store): State<Store>, Path(name): Path<String>) -> Response {
    empty(store.delete_image(&name).await)
}

async fn list_trash(State(store): State<Store>) -> Response {
    reply(store.list_trash().await)
}

async fn restore(State(store): State<Store>, Path(name): Path<String>) -> Response {
    empty(store.restore(&name).await)
}

async fn purge(State(store): State<Store>, Path(name): Path<String>) -> Response {
    empty(store.delete_permanently(&name).await)
}

async fn empty_trash(State(store): State<Store>) -> Response {
    empty(store.empty_trash().await)
}

async fn resolve_conflicts(State(store): State<Store>) -> Response {
    reply(store.resolve_conflicts().await)
}

async fn fetch_logs(State(store): State<Store>) -> Response {
    match store.fetch_logs().await {
        Ok(text) => ([(header::CONTENT_TYPE, "text/plain")], text).into_response(),
        Err(e) => error_response(e),
    }
}

async fn clear_logs(State(store): State<Store>) -> Response {
    empty(store.clear_logs().await)
}

async fn references(State(store): State<Store>, Path(encoded): Path<String>) -> Response {
    reply(store.references(&path::decode(&encoded)).await)
}

async fn list_share_links(State(store): State<Store>) -> Response {
    reply(store.list_share_links().await)
}

async fn create_share_link(State(store): State<Store>, Path(encoded): Path<String>) -> Response {
    reply(store.create_share_link(&path::decode(&encoded)).await)
}

async fn update_share_link(
    State(store): State<Store>,
    Path(id): Path<String>,
    axum::Json(request): axum::Json<Value>,
) -> Response {
    let duration = request["duration"]
        .as_str()
        .unwrap_or_default()
        .parse::<ShareDuration>();
    match duration {
        Ok(duration) => empty(store.update_share_link(&id, duration).await),
        Err(_) => (StatusCode::BAD_REQUEST, "Invalid duration").into_response(),
    }
}

async fn delete_share_link(State(store): State<Store>, Path(id): Path<String>) -> Response {
    empty(store.delete_share_link(&id).await)
}
