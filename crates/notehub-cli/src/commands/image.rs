//! Uploaded image commands.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use notehub_core::error::AppError;
use notehub_core::traits::Upload;
use notehub_state::NotesController;

/// Arguments for image commands
#[derive(Debug, Args)]
pub struct ImageArgs {
    /// Image subcommand
    #[command(subcommand)]
    pub command: ImageCommand,
}

/// Image subcommands
#[derive(Debug, Subcommand)]
pub enum ImageCommand {
    /// List uploaded images
    List,
    /// Upload an image and print the URL to embed
    Upload {
        /// Image file (.png, .jpg, .jpeg)
        file: PathBuf,
    },
    /// Delete an uploaded image
    Delete {
        /// Stored image name, as shown by `image list`
        name: String,
    },
}

/// Image display row
#[derive(Debug, Serialize, Tabled)]
struct ImageRow {
    /// Stored name
    name: String,
    /// Served URL
    url: String,
}

/// Read a local file into an upload.
pub(crate) async fn read_upload(file: &Path) -> Result<Upload, AppError> {
    let data = tokio::fs::read(file)
        .await
        .map_err(|e| AppError::storage(format!("Failed to read '{}': {}", file.display(), e)))?;
    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| AppError::validation(format!("'{}' is not a file", file.display())))?;
    Ok(Upload::new(file_name, data))
}

/// Execute image commands
pub async fn execute(
    args: &ImageArgs,
    controller: &mut NotesController,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ImageCommand::List => {
            controller.load_settings().await;
            let rows: Vec<ImageRow> = controller
                .settings()
                .images
                .iter()
                .map(|image| ImageRow {
                    name: image.name.clone(),
                    url: image.url.clone(),
                })
                .collect();
            output::print_list(&rows, format);
        }
        ImageCommand::Upload { file } => {
            let upload = read_upload(file).await?;
            if let Some(url) = controller.upload_image(upload).await {
                output::print_kv("URL", &url);
                output::print_kv("Markdown", &format!("![]({})", url));
            }
        }
        ImageCommand::Delete { name } => {
            controller.delete_image(name).await;
        }
    }

    Ok(())
}
