//! Document and folder commands.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use tokio::io::AsyncReadExt;

use crate::output::{self, OutputFormat};
use notehub_core::error::AppError;
use notehub_core::path;
use notehub_state::{HistoryMode, NotesController, ViewState};

/// Arguments for `tree`
#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Only show items whose name contains this text
    #[arg(short = 'q', long)]
    pub filter: Option<String>,
}

/// Arguments for `open`
#[derive(Debug, Args)]
pub struct OpenArgs {
    /// Application URL: /, /trash, /settings or /data/<path>
    pub url: String,
}

/// A single document path argument
#[derive(Debug, Args)]
pub struct PathArgs {
    /// Document path, e.g. projects/plan
    pub path: String,
}

/// Arguments for `save`
#[derive(Debug, Args)]
pub struct SaveArgs {
    /// Document path
    pub path: String,
    /// New content
    #[arg(short, long, conflicts_with = "file")]
    pub text: Option<String>,
    /// Read the new content from this file instead of stdin
    #[arg(long)]
    pub file: Option<PathBuf>,
}

/// Arguments for `new`
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Path of the new item; the last segment is its name
    pub path: String,
    /// Create a folder instead of a note
    #[arg(long)]
    pub folder: bool,
}

/// Arguments for `rename`
#[derive(Debug, Args)]
pub struct RenameArgs {
    /// Current path
    pub path: String,
    /// New name, without any folder
    pub name: String,
}

/// Arguments for `mv`
#[derive(Debug, Args)]
pub struct MoveArgs {
    /// Item to move
    pub path: String,
    /// Destination folder; an empty string moves to the root
    pub destination: String,
}

/// Arguments for `rm`
#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// Item to move to the recycle bin
    pub path: String,
    /// Skip confirmation
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for `search`
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Text to look for in document paths
    pub query: String,
}

/// Path display row
#[derive(Debug, Serialize, Tabled)]
struct PathRow {
    /// Document path
    path: String,
}

/// What the current view shows, for printing
#[derive(Debug, Serialize)]
struct ViewSummary {
    view: &'static str,
    route: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    entries: Vec<String>,
}

fn summarize(controller: &NotesController) -> ViewSummary {
    let view = controller.view();
    let mut summary = ViewSummary {
        view: view.name(),
        route: controller.route().to_url(),
        path: view.selected_path().map(str::to_string),
        content: None,
        mime: None,
        size: None,
        entries: Vec::new(),
    };
    match view {
        ViewState::Document { content, .. } | ViewState::Text { content, .. } => {
            summary.content = Some(content.clone());
        }
        ViewState::Image { blob_url, mime, .. } => {
            summary.mime = Some(mime.clone());
            summary.size = controller.blob(blob_url).map(|b| b.data.len());
        }
        ViewState::Folder { node } => {
            summary.entries = node.children.iter().map(|c| c.path.clone()).collect();
        }
        ViewState::Trash { items } => {
            summary.entries = items.iter().map(|i| i.name.clone()).collect();
        }
        ViewState::Welcome | ViewState::Settings => {}
    }
    summary
}

/// Print the current view
pub fn print_view(controller: &NotesController, format: OutputFormat) {
    let summary = summarize(controller);
    if format == OutputFormat::Json {
        output::print_item(&summary, format);
        return;
    }
    match (&summary.content, summary.view) {
        (Some(content), _) => println!("{}", content),
        (None, "image") => {
            output::print_kv("Path", summary.path.as_deref().unwrap_or_default());
            output::print_kv("Type", summary.mime.as_deref().unwrap_or_default());
            output::print_kv("Size", &summary.size.unwrap_or_default().to_string());
        }
        _ => {
            output::print_kv("View", summary.view);
            output::print_kv("Route", &summary.route);
            for entry in &summary.entries {
                println!("    {}", entry);
            }
        }
    }
}

/// `tree`
pub fn tree(
    args: &TreeArgs,
    controller: &mut NotesController,
    format: OutputFormat,
) -> Result<(), AppError> {
    controller.set_search_query(args.filter.clone().unwrap_or_default());
    output::print_tree(controller.filtered_tree(), format);
    Ok(())
}

/// `open`
pub async fn open(
    args: &OpenArgs,
    controller: &mut NotesController,
    format: OutputFormat,
) -> Result<(), AppError> {
    if controller.navigate(&args.url, HistoryMode::Push).await {
        print_view(controller, format);
    }
    Ok(())
}

/// `cat`
pub async fn cat(
    args: &PathArgs,
    controller: &mut NotesController,
    format: OutputFormat,
) -> Result<(), AppError> {
    if controller.select_file(&args.path).await {
        print_view(controller, format);
    }
    Ok(())
}

/// `save`
pub async fn save(args: &SaveArgs, controller: &mut NotesController) -> Result<(), AppError> {
    let content = match (&args.text, &args.file) {
        (Some(text), _) => text.clone(),
        (None, Some(file)) => tokio::fs::read_to_string(file).await.map_err(|e| {
            AppError::storage(format!("Failed to read '{}': {}", file.display(), e))
        })?,
        (None, None) => {
            let mut buffer = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buffer)
                .await
                .map_err(|e| AppError::storage(format!("Failed to read stdin: {}", e)))?;
            buffer
        }
    };

    if !controller.select_file(&args.path).await {
        return Ok(());
    }
    if !controller.edit_content(content) {
        output::print_warning(&format!("'{}' is not a Markdown document.", args.path));
        return Ok(());
    }
    controller.save().await;
    Ok(())
}

/// `new`
pub async fn create(args: &NewArgs, controller: &mut NotesController) -> Result<(), AppError> {
    let parent = path::parent(&args.path);
    if args.folder {
        controller.begin_create_folder(parent);
    } else {
        controller.begin_create_note(parent);
    }
    controller.set_pending_name(path::file_name(&args.path));
    controller.confirm_pending().await;
    Ok(())
}

/// `rename`
pub async fn rename(args: &RenameArgs, controller: &mut NotesController) -> Result<(), AppError> {
    if controller.begin_rename(&args.path) {
        controller.set_pending_name(args.name.as_str());
        controller.confirm_pending().await;
    }
    Ok(())
}

/// `mv`
pub async fn move_item(args: &MoveArgs, controller: &mut NotesController) -> Result<(), AppError> {
    if controller.begin_move(&args.path) {
        controller.set_pending_destination(args.destination.as_str());
        controller.confirm_pending().await;
    }
    Ok(())
}

/// `rm`
pub async fn remove(args: &RemoveArgs, controller: &mut NotesController) -> Result<(), AppError> {
    if !controller.begin_delete(&args.path) {
        return Ok(());
    }
    if !args.yes {
        let prompt = controller
            .pending()
            .map(|p| p.title())
            .unwrap_or_default();
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;
        if !confirmed {
            controller.cancel_pending();
            output::print_warning("Cancelled.");
            return Ok(());
        }
    }
    controller.confirm_pending().await;
    Ok(())
}

/// `refs`
pub async fn references(
    args: &PathArgs,
    controller: &mut NotesController,
    format: OutputFormat,
) -> Result<(), AppError> {
    if let Some(paths) = controller.references(&args.path).await {
        let rows: Vec<PathRow> = paths.into_iter().map(|path| PathRow { path }).collect();
        output::print_list(&rows, format);
    }
    Ok(())
}

/// `search`
pub fn search(
    args: &SearchArgs,
    controller: &mut NotesController,
    format: OutputFormat,
) -> Result<(), AppError> {
    let rows: Vec<PathRow> = controller
        .search_files(&args.query)
        .into_iter()
        .map(|path| PathRow { path })
        .collect();
    output::print_list(&rows, format);
    Ok(())
}
