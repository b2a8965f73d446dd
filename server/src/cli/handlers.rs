// server/src/cli/handlers.rs

use anyhow::Result;
use log::info;

use lib::commands::CommandType;
use lib::storage;
use models::{Appointment, RecordEntry};

use crate::cli::{handlers_utils, help_display, AppState};

/// Execute a fully parsed command against the shared store and return the
/// user-facing output. Mutations are persisted to the data file before they
/// are reported as done.
pub async fn execute_command(command: CommandType, state: &AppState) -> Result<String> {
    match command {
        CommandType::Add(args) => {
            let mut store = state.store.write().await;
            let summary = store.add(args)?.summary();
            storage::save_records(&state.config.data_path, store.persons())?;
            info!("record added; store now holds {}", store.len());
            Ok(format!("New record added: {}", summary))
        }
        CommandType::Edit(args) => {
            let index = args.index;
            let mut store = state.store.write().await;
            let summary = store.edit(args)?.summary();
            storage::save_records(&state.config.data_path, store.persons())?;
            Ok(format!("Edited record {}: {}", index, summary))
        }
        CommandType::Find(args) => {
            let store = state.store.read().await;
            let matches = store.find(&args);
            let mut lines: Vec<String> = matches
                .iter()
                .map(|(index, person)| format!("{}. {}", index, person.summary()))
                .collect();
            lines.push(format!("{} record(s) found.", matches.len()));
            Ok(lines.join("\n"))
        }
        CommandType::Delete { index } => {
            let mut store = state.store.write().await;
            let removed = store.delete(index)?;
            storage::save_records(&state.config.data_path, store.persons())?;
            Ok(format!("Deleted record: {}", removed.summary()))
        }
        CommandType::Schedule(args) => {
            let appointment = Appointment {
                date: args.date,
                start: args.start,
                end: args.end,
                doctor_name: args.doctor_name,
                doctor_nric: args.doctor_nric,
                patient_name: args.patient_name,
                patient_nric: args.patient_nric,
            };
            let mut store = state.store.write().await;
            let person = store.schedule(args.index, appointment)?;
            let booked = person
                .appointments
                .last()
                .map(|a| a.summary())
                .unwrap_or_default();
            let name = person.name.clone();
            storage::save_records(&state.config.data_path, store.persons())?;
            Ok(format!("Appointment booked for {}: {}", name, booked))
        }
        CommandType::UpdateRecord(args) => {
            let entry = RecordEntry::new(args.date, args.diagnosis, args.treatment, args.comments);
            let mut store = state.store.write().await;
            let person = store.update_record(args.index, entry)?;
            let recorded = person.records.last().map(|r| r.summary()).unwrap_or_default();
            let name = person.name.clone();
            storage::save_records(&state.config.data_path, store.persons())?;
            Ok(format!("Medical record updated for {}: {}", name, recorded))
        }
        CommandType::List => {
            let store = state.store.read().await;
            if store.is_empty() {
                return Ok("There are no records yet.".to_string());
            }
            let mut lines: Vec<String> = store
                .persons()
                .iter()
                .enumerate()
                .map(|(i, person)| format!("{}. {}", i + 1, person.summary()))
                .collect();
            lines.push(format!("{} record(s) listed.", store.len()));
            Ok(lines.join("\n"))
        }
        CommandType::Undo => {
            let mut store = state.store.write().await;
            store.undo()?;
            storage::save_records(&state.config.data_path, store.persons())?;
            Ok("The last change has been undone.".to_string())
        }
        CommandType::Redo => {
            let mut store = state.store.write().await;
            store.redo()?;
            storage::save_records(&state.config.data_path, store.persons())?;
            Ok("The last undone change has been redone.".to_string())
        }
        CommandType::Clear => {
            handlers_utils::clear_terminal_screen()?;
            Ok(String::new())
        }
        CommandType::Help(filter) => Ok(help_display::interactive_help_text(filter.as_deref())),
        CommandType::Exit | CommandType::Unknown => {
            // Exit and unknown words are routed by the interactive loop and
            // the one-shot entry point before execution.
            Ok(String::new())
        }
    }
}
