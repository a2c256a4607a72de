//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use notehub_client::HttpNotesClient;
use notehub_core::error::AppError;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Validate configuration file
    Validate,
}

/// Execute config commands
pub async fn execute(
    args: &ConfigArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let config = super::load_config(config_path)?;
            output::print_item(&config, format);
        }
        ConfigCommand::Validate => match super::load_config(config_path).and_then(|config| {
            HttpNotesClient::new(&config.client)?;
            Ok(config)
        }) {
            Ok(config) => {
                output::print_success(&format!("Configuration '{}' is valid", config_path));
                output::print_kv("Backend", &config.workspace.backend.to_string());
                if !config.workspace.backend.is_persistent() {
                    output::print_warning(
                        "The memory backend starts empty for every command; use it with `notehub shell`.",
                    );
                }
                output::print_kv(
                    "Server",
                    &format!("{}{}", config.client.base_url, config.client.api_prefix),
                );
                output::print_kv("Timeout", &format!("{}s", config.client.timeout_seconds));
                output::print_kv(
                    "Logging",
                    &format!("{} ({})", config.logging.level, config.logging.format),
                );
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {}", e));
                return Err(e);
            }
        },
    }

    Ok(())
}
