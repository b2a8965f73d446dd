// server/src/cli/cli.rs

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use tokio::sync::RwLock;

use lib::command_parser;
use lib::commands::CommandType;
use lib::config::load_cli_config;
use lib::storage;
use lib::store::ClinicStore;

use crate::cli::{handlers, interactive, AppState};

#[derive(Parser, Debug)]
#[command(
    name = "clinicdb",
    version,
    about = "ClinicDB - a clinic records manager with an interactive command-completion CLI"
)]
pub struct CliArgs {
    /// One-shot command to execute, e.g. `clinicdb list`. Leave empty for
    /// interactive mode.
    #[clap(value_name = "COMMAND", trailing_var_arg = true)]
    pub command: Vec<String>,
    /// Path to the YAML configuration file
    #[clap(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Override the records data file from the configuration
    #[clap(long, value_name = "PATH")]
    pub data_path: Option<PathBuf>,
    /// Run in interactive mode
    #[clap(long, short = 'c', action = clap::ArgAction::SetTrue)]
    pub cli: bool,
}

pub async fn start_cli() -> Result<()> {
    let args = CliArgs::parse();

    let mut config = load_cli_config(args.config.as_deref());
    if let Some(data_path) = args.data_path {
        config.data_path = data_path;
    }
    debug!("using data file {}", config.data_path.display());

    let persons = storage::load_records(&config.data_path)
        .context("Could not load the records data file")?;
    info!("loaded {} record(s)", persons.len());
    let state = AppState {
        store: Arc::new(RwLock::new(ClinicStore::from_persons(persons))),
        config,
    };

    if !args.command.is_empty() && !args.cli {
        let line = args.command.join(" ");
        return run_one_shot(&line, &state).await;
    }

    interactive::run_cli_interactive(state).await
}

async fn run_one_shot(line: &str, state: &AppState) -> Result<()> {
    match command_parser::parse_line(line)? {
        CommandType::Exit => Ok(()),
        CommandType::Unknown => {
            eprintln!("Unknown command: '{}'. Run 'clinicdb help' for usage.", line);
            Ok(())
        }
        command => {
            let output = handlers::execute_command(command, state).await?;
            if !output.is_empty() {
                println!("{}", output);
            }
            Ok(())
        }
    }
}
