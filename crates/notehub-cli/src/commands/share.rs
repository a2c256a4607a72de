//! Share link commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use notehub_core::error::AppError;
use notehub_core::types::{ShareDuration, ShareLink};
use notehub_state::NotesController;

/// Arguments for share commands
#[derive(Debug, Args)]
pub struct ShareArgs {
    /// Share subcommand
    #[command(subcommand)]
    pub command: ShareCommand,
}

/// Share subcommands
#[derive(Debug, Subcommand)]
pub enum ShareCommand {
    /// List active share links
    List,
    /// Create a link for a document, or show its active one
    Create {
        /// Document path
        path: String,
    },
    /// Change how long a link stays valid
    Update {
        /// Link ID
        id: String,
        /// 1h, 24h, 168h or never
        duration: ShareDuration,
    },
    /// Revoke a link
    Delete {
        /// Link ID
        id: String,
    },
}

/// Share link display row
#[derive(Debug, Serialize, Tabled)]
struct ShareRow {
    /// Link ID
    id: String,
    /// Shared document
    document: String,
    /// Expiry time
    expires: String,
}

impl From<&ShareLink> for ShareRow {
    fn from(link: &ShareLink) -> Self {
        Self {
            id: link.id.clone(),
            document: link.document_path.clone(),
            expires: link
                .expires_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "never".to_string()),
        }
    }
}

/// Execute share commands
pub async fn execute(
    args: &ShareArgs,
    controller: &mut NotesController,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ShareCommand::List => {
            controller.load_settings().await;
            let rows: Vec<ShareRow> = controller
                .settings()
                .share_links
                .iter()
                .map(ShareRow::from)
                .collect();
            output::print_list(&rows, format);
        }
        ShareCommand::Create { path } => {
            if let Some(link) = controller.create_share_link(path).await {
                output::print_list(&[ShareRow::from(&link)], format);
            }
        }
        ShareCommand::Update { id, duration } => {
            controller.update_share_link(id, *duration).await;
        }
        ShareCommand::Delete { id } => {
            controller.delete_share_link(id).await;
        }
    }

    Ok(())
}
