//! Core traits defined in `notehub-core` and implemented by other crates.

pub mod api;

pub use api::{NotesApi, Upload};
