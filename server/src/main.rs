// server/src/main.rs

// This is the main entry point for the ClinicDB application.
// It handles command-line argument parsing and dispatches to the CLI logic.

use anyhow::Result;
use clinicdb_server::cli::cli::start_cli;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    start_cli().await
}
