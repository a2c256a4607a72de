//! Interactive session over a single controller.
//!
//! Every top-level command is available at the prompt, plus `back` and
//! `forward` for history navigation. State such as the open document and
//! the history persists between lines, which also makes the in-memory
//! backend usable.

use clap::Parser;

use super::Commands;
use super::documents::print_view;
use crate::output::{self, OutputFormat};
use notehub_core::config::AppConfig;
use notehub_core::error::AppError;

/// One line typed at the prompt
#[derive(Debug, Parser)]
#[command(name = "notehub", no_binary_name = true)]
struct ShellLine {
    #[command(subcommand)]
    command: Commands,
}

/// Split a line into words, keeping double-quoted text together.
fn split_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut pending = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                pending = true;
            }
            c if c.is_whitespace() && !quoted => {
                if pending {
                    words.push(std::mem::take(&mut current));
                    pending = false;
                }
            }
            c => {
                current.push(c);
                pending = true;
            }
        }
    }
    if pending {
        words.push(current);
    }
    words
}

/// Execute the interactive shell
pub async fn execute(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let mut controller = super::build_controller(config).await?;
    println!("NoteHub shell. Type 'help' for commands, 'exit' to leave.");

    loop {
        let line: String = dialoguer::Input::new()
            .with_prompt(format!("notehub {}", controller.route()))
            .allow_empty(true)
            .interact_text()
            .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;
        let words = split_words(&line);

        match words.first().map(String::as_str) {
            None => continue,
            Some("exit" | "quit") => break,
            Some("back") => {
                if controller.back().await {
                    print_view(&controller, format);
                }
            }
            Some("forward") => {
                if controller.forward().await {
                    print_view(&controller, format);
                }
            }
            Some(_) => match ShellLine::try_parse_from(&words) {
                Ok(parsed) => {
                    if let Err(e) = super::dispatch(&parsed.command, &mut controller, format).await
                    {
                        output::print_error(&e.to_string());
                    }
                }
                Err(e) => {
                    let _ = e.print();
                }
            },
        }
        output::print_notifications(&controller.take_notifications());
    }

    Ok(())
}
