// server/src/cli/mod.rs

// This module contains the command-line interface (CLI) logic for ClinicDB.
// It includes argument parsing, command handling, and interactive mode.

pub mod cli;
pub mod handlers;
pub mod handlers_utils;
pub mod help_display;
pub mod interactive;

use std::sync::Arc;

use tokio::sync::RwLock;

use lib::config::CliConfig;
use lib::store::ClinicStore;

// Re-export the main CLI entry point from cli.rs
pub use cli::{start_cli, CliArgs};
pub use handlers::execute_command;
pub use handlers_utils::{clear_terminal_screen, print_welcome_screen};
pub use interactive::run_cli_interactive;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<ClinicStore>>,
    pub config: CliConfig,
}
