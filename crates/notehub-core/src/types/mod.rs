//! Domain types shared across the NoteHub workspace.

pub mod content;
pub mod image;
pub mod node;
pub mod share;
pub mod trash;

pub use content::{ContentKind, DocumentContent, RenameOperation};
pub use image::{ImageFile, UploadedImage};
pub use node::{NodeKind, TreeNode};
pub use share::{ShareDuration, ShareLink};
pub use trash::TrashedItem;
