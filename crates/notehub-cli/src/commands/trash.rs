//! Recycle bin commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use notehub_core::error::AppError;
use notehub_state::{NotesController, ViewState};

/// Arguments for trash commands
#[derive(Debug, Args)]
pub struct TrashArgs {
    /// Trash subcommand
    #[command(subcommand)]
    pub command: TrashCommand,
}

/// Trash subcommands
#[derive(Debug, Subcommand)]
pub enum TrashCommand {
    /// List recycle bin items
    List,
    /// Move an item back to where it was deleted from
    Restore {
        /// Recycle bin path, as shown by `trash list`
        path: String,
    },
    /// Delete one item for good
    Purge {
        /// Recycle bin path, as shown by `trash list`
        path: String,
    },
    /// Delete every item for good
    Empty {
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

/// Trash display row
#[derive(Debug, Serialize, Tabled)]
struct TrashRow {
    /// Name in the recycle bin
    name: String,
    /// File or folder
    kind: String,
    /// Path used to restore or purge
    path: String,
}

/// Execute trash commands
pub async fn execute(
    args: &TrashArgs,
    controller: &mut NotesController,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        TrashCommand::List => {
            if controller.open_trash().await
                && let ViewState::Trash { items } = controller.view()
            {
                let rows: Vec<TrashRow> = items
                    .iter()
                    .map(|item| TrashRow {
                        name: item.name.clone(),
                        kind: item.kind.to_string(),
                        path: item.path.clone(),
                    })
                    .collect();
                output::print_list(&rows, format);
            }
        }
        TrashCommand::Restore { path } => {
            controller.restore(path).await;
        }
        TrashCommand::Purge { path } => {
            controller.delete_permanently(path).await;
        }
        TrashCommand::Empty { yes } => {
            let confirmed = *yes
                || dialoguer::Confirm::new()
                    .with_prompt("Permanently delete everything in the recycle bin?")
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;
            if confirmed {
                controller.empty_trash().await;
            } else {
                output::print_warning("Cancelled.");
            }
        }
    }

    Ok(())
}
