//! # notehub-client
//!
//! Implementations of [`NotesApi`](notehub_core::NotesApi):
//!
//! - [`HttpNotesClient`] talks to the document server's REST API.
//! - [`MemoryNotesApi`] keeps the whole workspace in process and mirrors
//!   the server's observable behaviour, for offline sessions and tests.

pub mod http;
pub mod memory;

pub use http::HttpNotesClient;
pub use memory::MemoryNotesApi;
