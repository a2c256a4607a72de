//! CLI command definitions and dispatch.

pub mod config;
pub mod documents;
pub mod image;
pub mod maintenance;
pub mod share;
pub mod shell;
pub mod trash;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{info, warn};

use crate::output::{self, OutputFormat};
use notehub_client::{HttpNotesClient, MemoryNotesApi};
use notehub_core::config::AppConfig;
use notehub_core::config::workspace::BackendKind;
use notehub_core::error::AppError;
use notehub_core::traits::NotesApi;
use notehub_state::NotesController;

/// NoteHub: browse and edit a Markdown document workspace
#[derive(Debug, Parser)]
#[command(name = "notehub", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the document tree
    Tree(documents::TreeArgs),
    /// Navigate to an application URL such as /data/projects
    Open(documents::OpenArgs),
    /// Print a document
    Cat(documents::PathArgs),
    /// Replace a document's content
    Save(documents::SaveArgs),
    /// Create a note or folder
    New(documents::NewArgs),
    /// Rename a document or folder in place
    Rename(documents::RenameArgs),
    /// Move a document or folder into another folder
    Mv(documents::MoveArgs),
    /// Move a document or folder to the recycle bin
    Rm(documents::RemoveArgs),
    /// List documents that reference a document
    Refs(documents::PathArgs),
    /// Find documents whose path contains a query
    Search(documents::SearchArgs),
    /// Recycle bin management
    Trash(trash::TrashArgs),
    /// Uploaded image management
    Image(image::ImageArgs),
    /// Share link management
    Share(share::ShareArgs),
    /// Show or clear the activity log
    Logs(maintenance::LogsArgs),
    /// Rename case-insensitive name collisions
    ResolveConflicts,
    /// Import a .md, .txt or .zip file
    Import(maintenance::ImportArgs),
    /// Export a document, a folder or the whole workspace
    Export(maintenance::ExportArgs),
    /// Configuration management
    Config(config::ConfigArgs),
    /// Start an interactive session
    Shell,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Config(args) => config::execute(args, &self.config, self.format).await,
            Commands::Shell => shell::execute(config, self.format).await,
            command => {
                let mut controller = build_controller(config).await?;
                dispatch(command, &mut controller, self.format).await?;
                finish(&mut controller)
            }
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path)
        .map_err(|e| AppError::configuration(format!("Failed to load config: {}", e)))
}

/// Helper: create a controller over the configured backend and load the tree
pub async fn build_controller(config: &AppConfig) -> Result<NotesController, AppError> {
    let api: Arc<dyn NotesApi> = match config.workspace.backend {
        BackendKind::Http => Arc::new(HttpNotesClient::new(&config.client)?),
        BackendKind::Memory => Arc::new(MemoryNotesApi::new()),
    };
    info!(backend = %config.workspace.backend, "Opening workspace");
    if !config.workspace.backend.is_persistent() {
        warn!("Memory backend selected; changes are lost when this process exits");
    }

    let mut controller = NotesController::new(api, config.workspace.note_template.clone());
    if !controller.initialize().await {
        output::print_notifications(&controller.take_notifications());
        return Err(AppError::transport("Could not load the document tree"));
    }
    Ok(controller)
}

/// Run one command against an open controller
pub async fn dispatch(
    command: &Commands,
    controller: &mut NotesController,
    format: OutputFormat,
) -> Result<(), AppError> {
    match command {
        Commands::Tree(args) => documents::tree(args, controller, format),
        Commands::Open(args) => documents::open(args, controller, format).await,
        Commands::Cat(args) => documents::cat(args, controller, format).await,
        Commands::Save(args) => documents::save(args, controller).await,
        Commands::New(args) => documents::create(args, controller).await,
        Commands::Rename(args) => documents::rename(args, controller).await,
        Commands::Mv(args) => documents::move_item(args, controller).await,
        Commands::Rm(args) => documents::remove(args, controller).await,
        Commands::Refs(args) => documents::references(args, controller, format).await,
        Commands::Search(args) => documents::search(args, controller, format),
        Commands::Trash(args) => trash::execute(args, controller, format).await,
        Commands::Image(args) => image::execute(args, controller, format).await,
        Commands::Share(args) => share::execute(args, controller, format).await,
        Commands::Logs(args) => maintenance::logs(args, controller).await,
        Commands::ResolveConflicts => maintenance::resolve_conflicts(controller, format).await,
        Commands::Import(args) => maintenance::import(args, controller).await,
        Commands::Export(args) => maintenance::export(args, controller).await,
        Commands::Config(_) | Commands::Shell => {
            output::print_warning("This command is not available inside the shell.");
            Ok(())
        }
    }
}

/// Print pending notifications and fail if any of them reported a failure
pub fn finish(controller: &mut NotesController) -> Result<(), AppError> {
    if output::print_notifications(&controller.take_notifications()) {
        Ok(())
    } else {
        Err(AppError::internal("One or more operations failed"))
    }
}
