//! Uploaded image metadata.

use serde::{Deserialize, Serialize};

/// An image stored by the document server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFile {
    /// Stored file name.
    pub name: String,
    /// URL the image is served from.
    pub url: String,
}

/// Response to an image upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImage {
    /// URL the new image is served from.
    pub url: String,
}
