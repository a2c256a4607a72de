//! Object URLs for binary previews.

use std::collections::HashMap;

use bytes::Bytes;
use tracing::debug;
use uuid::Uuid;

/// A binary payload held behind an object URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    /// MIME type of the payload.
    pub mime: String,
    /// Payload bytes.
    pub data: Bytes,
}

/// Issues `blob:` URLs for image previews and releases them on revoke.
///
/// The controller revokes a preview's URL whenever the view moves away
/// from it, so the registry only ever holds the blob on screen.
#[derive(Debug, Default)]
pub struct BlobRegistry {
    blobs: HashMap<String, Blob>,
}

impl BlobRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a payload and return its URL.
    pub fn create(&mut self, mime: impl Into<String>, data: Bytes) -> String {
        let url = format!("blob:notehub/{}", Uuid::new_v4());
        debug!(%url, size = data.len(), "Created object URL");
        self.blobs.insert(
            url.clone(),
            Blob {
                mime: mime.into(),
                data,
            },
        );
        url
    }

    /// Resolve a URL issued by [`BlobRegistry::create`].
    pub fn get(&self, url: &str) -> Option<&Blob> {
        self.blobs.get(url)
    }

    /// Release a URL. Returns whether it was live.
    pub fn revoke(&mut self, url: &str) -> bool {
        let removed = self.blobs.remove(url).is_some();
        if removed {
            debug!(%url, "Revoked object URL");
        }
        removed
    }

    /// Number of live URLs.
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    /// Whether no URLs are live.
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}
