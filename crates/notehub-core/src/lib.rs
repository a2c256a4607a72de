//! # notehub-core
//!
//! Core crate for NoteHub. Contains the document tree and view types,
//! the path encoding rules, configuration schemas, the [`NotesApi`]
//! trait implemented by the client crate, and the unified error system.
//!
//! This crate has **no** internal dependencies on other NoteHub crates.

pub mod config;
pub mod error;
pub mod path;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
pub use traits::NotesApi;
