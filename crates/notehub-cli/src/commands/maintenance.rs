//! Activity log, conflict resolution, import and export.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use notehub_core::error::AppError;
use notehub_core::path;
use notehub_state::NotesController;

/// Arguments for `logs`
#[derive(Debug, Args)]
pub struct LogsArgs {
    /// Clear the log instead of printing it
    #[arg(long)]
    pub clear: bool,
}

/// Arguments for `import`
#[derive(Debug, Args)]
pub struct ImportArgs {
    /// File to import (.md, .txt or .zip)
    pub file: PathBuf,
}

/// Arguments for `export`
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Document or folder to export; omit for the whole workspace
    pub path: Option<String>,
    /// Where to write the export
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Conflict resolution display row
#[derive(Debug, Serialize, Tabled)]
struct RenameRow {
    /// Path before
    old_path: String,
    /// Path after
    new_path: String,
}

/// `logs`
pub async fn logs(args: &LogsArgs, controller: &mut NotesController) -> Result<(), AppError> {
    if args.clear {
        controller.clear_logs().await;
        return Ok(());
    }
    controller.load_settings().await;
    let log = &controller.settings().activity_log;
    if log.is_empty() {
        println!("Activity log is empty.");
    } else {
        print!("{}", log);
    }
    Ok(())
}

/// `resolve-conflicts`
pub async fn resolve_conflicts(
    controller: &mut NotesController,
    format: OutputFormat,
) -> Result<(), AppError> {
    if controller.resolve_conflicts().await {
        let rows: Vec<RenameRow> = controller
            .settings()
            .conflict_results
            .iter()
            .flatten()
            .map(|op| RenameRow {
                old_path: op.old_path.clone(),
                new_path: op.new_path.clone(),
            })
            .collect();
        if !rows.is_empty() {
            output::print_list(&rows, format);
        }
    }
    Ok(())
}

/// `import`
pub async fn import(args: &ImportArgs, controller: &mut NotesController) -> Result<(), AppError> {
    let upload = super::image::read_upload(&args.file).await?;
    controller.import(upload).await;
    Ok(())
}

/// `export`
pub async fn export(args: &ExportArgs, controller: &mut NotesController) -> Result<(), AppError> {
    let (data, default_name) = match &args.path {
        Some(item) => (
            controller.export_item(item).await,
            path::file_name(item).to_string(),
        ),
        None => (
            controller.export_all().await,
            "notehub-export.zip".to_string(),
        ),
    };
    let Some(data) = data else {
        return Ok(());
    };

    let out_path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(default_name));
    tokio::fs::write(&out_path, &data).await.map_err(|e| {
        AppError::storage(format!("Failed to write '{}': {}", out_path.display(), e))
    })?;
    output::print_success(&format!(
        "Exported {} bytes to '{}'",
        data.len(),
        out_path.display()
    ));
    Ok(())
}
