// server/src/cli/interactive.rs

use anyhow::{Context, Result};
use log::{debug, error};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use lib::command_parser;
use lib::commands::CommandType;
use lib::session::{Session, SessionContext, SessionError, Turn, ABORT_TOKEN, BACK_TOKEN};

use crate::cli::{handlers, handlers_utils, AppState};

const KNOWN_COMMANDS: &[&str] = &[
    "add",
    "edit",
    "find",
    "delete",
    "schedule",
    "update-record",
    "list",
    "undo",
    "redo",
    "clear",
    "help",
    "exit",
];
const FUZZY_MATCH_THRESHOLD: usize = 2;

// === Levenshtein distance for fuzzy matching ===
fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();
    let m = s1_chars.len();
    let n = s2_chars.len();
    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }
    let mut dp = vec![vec![0; n + 1]; m + 1];
    for i in 0..=m {
        dp[i][0] = i;
    }
    for j in 0..=n {
        dp[0][j] = j;
    }
    for i in 1..=m {
        for j in 1..=n {
            let cost = if s1_chars[i - 1] == s2_chars[j - 1] { 0 } else { 1 };
            dp[i][j] = (dp[i - 1][j] + 1)
                .min(dp[i][j - 1] + 1)
                .min(dp[i - 1][j - 1] + cost);
        }
    }
    dp[m][n]
}

fn suggest_command(word: &str) -> Option<&'static str> {
    KNOWN_COMMANDS
        .iter()
        .map(|c| (levenshtein_distance(&word.to_lowercase(), c), *c))
        .filter(|(d, _)| *d <= FUZZY_MATCH_THRESHOLD)
        .min_by_key(|(d, _)| *d)
        .map(|(_, c)| c)
}

pub async fn run_cli_interactive(state: AppState) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    let history_path = state.config.history_path.clone();
    let _ = rl.load_history(&history_path);
    handlers_utils::print_welcome_screen();

    let mut session = Session::new();

    loop {
        // A live completion session gets a continuation prompt so the user
        // can tell they are mid-dialogue.
        let prompt = if session.is_active() {
            "> "
        } else {
            state.config.prompt.as_str()
        };
        let readline = rl.readline(prompt);
        match readline {
            Ok(line) => {
                let line_trim = line.trim();
                if line_trim.is_empty() {
                    continue;
                }
                rl.add_history_entry(line_trim).ok();

                // === ACTIVE SESSION PATH ===
                if session.is_active() {
                    handle_session_line(line_trim, &mut session, &state).await;
                    continue;
                }

                // === LAZY INTUITIVE-MODE ENTRY ===
                // A trigger command word with an empty argument tail opens a
                // completion session instead of the one-shot parser.
                let mut words = line_trim.split_whitespace();
                let first_word = words.next().unwrap_or("");
                if words.next().is_none() && command_parser::is_session_trigger(first_word) {
                    let store = state.store.read().await;
                    let ctx = SessionContext::new(store.persons());
                    if let Some(first_prompt) = session.begin(first_word, &ctx) {
                        println!("{}", first_prompt);
                        continue;
                    }
                }

                // === ONE-SHOT COMMAND PATH ===
                match command_parser::parse_line(line_trim) {
                    Ok(CommandType::Exit) => {
                        println!("Exiting ClinicDB. Goodbye!");
                        break;
                    }
                    Ok(CommandType::Unknown) => match suggest_command(first_word) {
                        Some(suggestion) => {
                            eprintln!(
                                "Unknown command: '{}'. Did you mean '{}'?",
                                first_word, suggestion
                            );
                        }
                        None => {
                            eprintln!(
                                "Unknown command: '{}'. Type 'help' for a list of commands.",
                                first_word
                            );
                        }
                    },
                    Ok(command) => {
                        debug!("parsed command: {:?}", command);
                        match handlers::execute_command(command, &state).await {
                            Ok(output) => {
                                if !output.is_empty() {
                                    println!("{}", output);
                                }
                            }
                            Err(e) => eprintln!("Error: {}", e),
                        }
                    }
                    Err(e) => eprintln!("Error: {}", e),
                }
            }

            Err(ReadlineError::Interrupted) => {
                if session.is_active() {
                    session.cancel();
                    println!("Command completion cancelled.");
                } else {
                    println!("Ctrl-C received. Type 'exit' to quit.");
                }
            }
            Err(ReadlineError::Eof) => {
                println!("Ctrl-D received. Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("Readline error: {:?}", err);
                break;
            }
        }
    }

    rl.save_history(&history_path)
        .context("Failed to save history")?;
    Ok(())
}

/// Route one line into the active session: back-navigation, abort, or an
/// answer for the current field. A completed dialogue hands its canonical
/// command straight to the ordinary executor.
async fn handle_session_line(line: &str, session: &mut Session, state: &AppState) {
    if line == BACK_TOKEN {
        // The engine treats an impossible retreat as a caller contract
        // violation, so the gate lives here.
        if session.can_retreat() {
            let store = state.store.read().await;
            let ctx = SessionContext::new(store.persons());
            println!("{}", session.retreat(&ctx));
        } else {
            eprintln!("There is no earlier field to go back to.");
        }
        return;
    }
    if line == ABORT_TOKEN {
        session.cancel();
        println!("Command completion cancelled.");
        return;
    }

    let completed = {
        let store = state.store.read().await;
        let ctx = SessionContext::new(store.persons());
        match session.submit(line, &ctx) {
            Ok(Turn::Prompt(prompt)) => {
                println!("{}", prompt);
                None
            }
            Ok(Turn::Completed(command)) => Some(command),
            Err(SessionError::Retry(message)) => {
                eprintln!("{}", message);
                None
            }
        }
    };

    if let Some(command) = completed {
        debug!("reconstructed command: {}", command);
        match command_parser::parse_line(&command) {
            Ok(CommandType::Unknown) => {
                // The serializers emit the same grammar the parser accepts;
                // landing here means they have drifted apart.
                error!("reconstructed command did not parse: {}", command);
                eprintln!("Internal error: could not execute the completed command.");
            }
            Ok(parsed) => match handlers::execute_command(parsed, state).await {
                Ok(output) => {
                    if !output.is_empty() {
                        println!("{}", output);
                    }
                }
                Err(e) => eprintln!("Error: {}", e),
            },
            Err(e) => eprintln!("Error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_suggest_close_command_words() {
        assert_eq!(suggest_command("ad"), Some("add"));
        assert_eq!(suggest_command("shedule"), Some("schedule"));
        assert_eq!(suggest_command("lst"), Some("list"));
        assert_eq!(suggest_command("completely-unrelated"), None);
    }
}
