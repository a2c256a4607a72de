//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use tabled::{Table, Tabled};

use notehub_core::types::TreeNode;
use notehub_state::{Notification, NotificationLevel};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Print a list of items in the selected format
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No results found.");
            } else {
                let table = Table::new(items).to_string();
                println!("{}", table);
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string());
            println!("{}", json);
        }
    }
}

/// Print a single item in the selected format
pub fn print_item<T: Serialize + std::fmt::Debug>(item: &T, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            println!("{:#?}", item);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(item).unwrap_or_else(|_| "{}".to_string());
            println!("{}", json);
        }
    }
}

/// Print the document tree as an indented outline, or as JSON
pub fn print_tree(nodes: &[TreeNode], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if nodes.is_empty() {
                println!("No documents.");
            }
            print_outline(nodes, 0);
        }
        OutputFormat::Json => print_item(&nodes, format),
    }
}

fn print_outline(nodes: &[TreeNode], depth: usize) {
    for node in nodes {
        let marker = if node.is_folder() { "/" } else { "" };
        println!("{:indent$}{}{}", "", node.name, marker, indent = depth * 2);
        print_outline(&node.children, depth + 1);
    }
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {}", msg);
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("⚠ {}", msg);
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {}", msg);
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<24} {}", format!("{}:", key), value);
}

/// Print queued controller notifications. Returns false if any reported a failure.
pub fn print_notifications(notifications: &[Notification]) -> bool {
    for note in notifications {
        match note.level {
            NotificationLevel::Success => print_success(&note.message),
            NotificationLevel::Warning => print_warning(&note.message),
            NotificationLevel::Error => print_error(&note.message),
        }
    }
    !notifications.iter().any(Notification::is_failure)
}
