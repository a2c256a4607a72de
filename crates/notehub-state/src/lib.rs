//! # notehub-state
//!
//! Client-side state for a NoteHub workspace: the document tree model and
//! its search filter, URL routing with browser-style history, and the
//! [`NotesController`] that owns all of it and exposes command methods and
//! a read-only [`Snapshot`] to a presentation layer.

pub mod blob;
pub mod controller;
pub mod history;
pub mod intent;
pub mod notify;
pub mod route;
pub mod tree;
pub mod view;

pub use controller::{HistoryMode, NotesController, SettingsData, Snapshot};
pub use history::History;
pub use intent::PendingMutation;
pub use notify::{Notification, NotificationLevel};
pub use route::Route;
pub use view::ViewState;
