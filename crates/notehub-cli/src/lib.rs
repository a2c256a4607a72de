//! # notehub-cli
//!
//! Command-line front end for a NoteHub workspace. Each command opens a
//! [`notehub_state::NotesController`] over the configured backend, runs
//! one operation and prints the controller's notifications; `shell` keeps
//! one controller alive across many commands.

pub mod commands;
pub mod output;

pub use commands::Cli;
