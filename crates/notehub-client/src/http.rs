//! REST client for the NoteHub document server.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use notehub_core::config::client::ClientConfig;
use notehub_core::error::{AppError, ErrorKind};
use notehub_core::path;
use notehub_core::result::AppResult;
use notehub_core::traits::{NotesApi, Upload};
use notehub_core::types::{
    DocumentContent, ImageFile, RenameOperation, ShareDuration, ShareLink, TrashedItem, TreeNode,
    UploadedImage,
};

/// Typed wrapper around the document server's REST endpoints.
///
/// Stateless apart from the pooled connection inside [`Client`]; cloning
/// is cheap.
#[derive(Debug, Clone)]
pub struct HttpNotesClient {
    /// Underlying HTTP client.
    http: Client,
    /// Base URL including the API prefix, e.g. `http://host:8000/api`.
    api_base: Url,
}

impl HttpNotesClient {
    /// Build a client from configuration.
    pub fn new(config: &ClientConfig) -> AppResult<Self> {
        let base = format!(
            "{}/{}",
            config.base_url.trim_end_matches('/'),
            config.api_prefix.trim_matches('/')
        );
        let api_base = Url::parse(&base).map_err(|e| {
            AppError::configuration(format!("Invalid document server URL '{base}': {e}"))
        })?;
        if api_base.cannot_be_a_base() {
            return Err(AppError::configuration(format!(
                "Document server URL '{base}' cannot carry a path"
            )));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self { http, api_base })
    }

    /// The API base URL requests are resolved against.
    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Build an endpoint URL.
    ///
    /// `route` segments are fixed API words; `document` is a document path
    /// that goes through [`path::encode`]; `suffix` segments follow it.
    /// Segments are pushed one by one so reserved characters are escaped
    /// by the URL layer and never change the route.
    fn endpoint(&self, route: &[&str], document: Option<&str>, suffix: &[&str]) -> Url {
        let mut url = self.api_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            segments.extend(route);
            if let Some(document) = document {
                let encoded = path::encode(document);
                segments.extend(path::segments(&encoded));
            }
            segments.extend(suffix);
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, %url, "Document server request");
        self.http.request(method, url)
    }

    /// Send a request and turn any non-success status into an error.
    async fn send(&self, builder: RequestBuilder) -> AppResult<Response> {
        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), body = %body.trim(), "Document server error");
        Err(AppError::from_status(status.as_u16(), body))
    }

    async fn send_empty(&self, builder: RequestBuilder) -> AppResult<()> {
        self.send(builder).await.map(|_| ())
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> AppResult<T> {
        let response = self.send(builder).await?;
        let body = response.bytes().await.map_err(transport_error)?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Lists may be encoded as `null` when empty.
    async fn send_list<T: DeserializeOwned>(&self, builder: RequestBuilder) -> AppResult<Vec<T>> {
        let list: Option<Vec<T>> = self.send_json(builder).await?;
        Ok(list.unwrap_or_default())
    }

    async fn send_bytes(&self, builder: RequestBuilder) -> AppResult<Bytes> {
        let response = self.send(builder).await?;
        response.bytes().await.map_err(transport_error)
    }
}

fn transport_error(err: reqwest::Error) -> AppError {
    let kind = if err.is_decode() {
        ErrorKind::Serialization
    } else {
        ErrorKind::Transport
    };
    AppError::with_source(kind, format!("Request failed: {err}"), err)
}

fn file_part(upload: Upload) -> Part {
    Part::bytes(upload.data.to_vec()).file_name(upload.file_name)
}

#[async_trait]
impl NotesApi for HttpNotesClient {
    async fn list_documents(&self) -> AppResult<Vec<TreeNode>> {
        let url = self.endpoint(&["documents"], None, &[]);
        self.send_list(self.request(Method::GET, url)).await
    }

    async fn get_content(&self, path: &str) -> AppResult<DocumentContent> {
        let url = self.endpoint(&["documents"], Some(path), &[]);
        let response = self.send(self.request(Method::GET, url)).await?;
        let mime = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("text/plain")
            .to_string();
        let body = response.bytes().await.map_err(transport_error)?;
        Ok(DocumentContent::new(mime, body))
    }

    async fn save_content(&self, path: &str, content: &str) -> AppResult<()> {
        let url = self.endpoint(&["documents"], Some(path), &[]);
        let builder = self
            .request(Method::PUT, url)
            .header(CONTENT_TYPE, "text/markdown")
            .body(content.to_string());
        self.send_empty(builder).await
    }

    async fn create_note(&self, path: &str, content: &str) -> AppResult<()> {
        self.save_content(path, content).await
    }

    async fn rename(&self, path: &str, new_path: &str) -> AppResult<()> {
        let url = self.endpoint(&["documents"], Some(path), &["rename"]);
        let body = serde_json::json!({ "newPath": new_path });
        self.send_empty(self.request(Method::PUT, url).json(&body))
            .await
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        let url = self.endpoint(&["documents"], Some(path), &[]);
        self.send_empty(self.request(Method::DELETE, url)).await
    }

    async fn create_folder(&self, path: &str) -> AppResult<()> {
        let url = self.endpoint(&["folders"], Some(path), &[]);
        self.send_empty(self.request(Method::POST, url)).await
    }

    async fn import(&self, upload: Upload) -> AppResult<()> {
        let url = self.endpoint(&["import"], None, &[]);
        let form = Form::new().part("file", file_part(upload));
        self.send_empty(self.request(Method::POST, url).multipart(form))
            .await
    }

    async fn export_item(&self, path: &str) -> AppResult<Bytes> {
        let url = self.endpoint(&["export"], Some(path), &[]);
        self.send_bytes(self.request(Method::GET, url)).await
    }

    async fn export_all(&self) -> AppResult<Bytes> {
        let url = self.endpoint(&["export", ""], None, &[]);
        self.send_bytes(self.request(Method::GET, url)).await
    }

    async fn upload_image(&self, upload: Upload) -> AppResult<UploadedImage> {
        let url = self.endpoint(&["images"], None, &[]);
        let form = Form::new().part("image", file_part(upload));
        self.send_json(self.request(Method::POST, url).multipart(form))
            .await
    }

    async fn list_images(&self) -> AppResult<Vec<ImageFile>> {
        let url = self.endpoint(&["images"], None, &[]);
        self.send_list(self.request(Method::GET, url)).await
    }

    async fn delete_image(&self, name: &str) -> AppResult<()> {
        let url = self.endpoint(&["images", name], None, &[]);
        self.send_empty(self.request(Method::DELETE, url)).await
    }

    async fn list_trash(&self) -> AppResult<Vec<TrashedItem>> {
        let url = self.endpoint(&["trash"], None, &[]);
        self.send_list(self.request(Method::GET, url)).await
    }

    // Recycle bin entries are addressed by their stored file name, which
    // the server does not decode, so they bypass the space substitution.
    async fn restore(&self, path: &str) -> AppResult<()> {
        let url = self.endpoint(&["trash", "restore", path], None, &[]);
        self.send_empty(self.request(Method::PUT, url)).await
    }

    async fn delete_permanently(&self, path: &str) -> AppResult<()> {
        let url = self.endpoint(&["trash", "delete", path], None, &[]);
        self.send_empty(self.request(Method::DELETE, url)).await
    }

    async fn empty_trash(&self) -> AppResult<()> {
        let url = self.endpoint(&["trash", "empty"], None, &[]);
        self.send_empty(self.request(Method::DELETE, url)).await
    }

    async fn resolve_conflicts(&self) -> AppResult<Vec<RenameOperation>> {
        let url = self.endpoint(&["settings", "resolve-conflicts"], None, &[]);
        self.send_list(self.request(Method::POST, url)).await
    }

    async fn fetch_logs(&self) -> AppResult<String> {
        let url = self.endpoint(&["logs"], None, &[]);
        let response = self.send(self.request(Method::GET, url)).await?;
        response.text().await.map_err(transport_error)
    }

    async fn clear_logs(&self) -> AppResult<()> {
        let url = self.endpoint(&["logs"], None, &[]);
        self.send_empty(self.request(Method::DELETE, url)).await
    }

    async fn references(&self, path: &str) -> AppResult<Vec<String>> {
        let url = self.endpoint(&["references"], Some(path), &[]);
        self.send_list(self.request(Method::GET, url)).await
    }

    async fn list_share_links(&self) -> AppResult<Vec<ShareLink>> {
        let url = self.endpoint(&["share"], None, &[]);
        self.send_list(self.request(Method::GET, url)).await
    }

    async fn create_share_link(&self, path: &str) -> AppResult<ShareLink> {
        let url = self.endpoint(&["share"], Some(path), &[]);
        self.send_json(self.request(Method::POST, url)).await
    }

    async fn update_share_link(&self, id: &str, duration: ShareDuration) -> AppResult<()> {
        let url = self.endpoint(&["share", id], None, &[]);
        let body = serde_json::json!({ "duration": duration.as_str() });
        self.send_empty(self.request(Method::PUT, url).json(&body))
            .await
    }

    async fn delete_share_link(&self, id: &str) -> AppResult<()> {
        let url = self.endpoint(&["share", id], None, &[]);
        self.send_empty(self.request(Method::DELETE, url)).await
    }
}
