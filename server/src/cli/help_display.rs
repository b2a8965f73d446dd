// server/src/cli/help_display.rs

use lib::command_parser::{
    ADD_USAGE, DELETE_USAGE, EDIT_USAGE, FIND_USAGE, SCHEDULE_USAGE, UPDATE_RECORD_USAGE,
};

struct HelpEntry {
    word: &'static str,
    summary: &'static str,
    usage: &'static str,
}

const HELP_ENTRIES: &[HelpEntry] = &[
    HelpEntry {
        word: "add",
        summary: "Add a patient or doctor record.",
        usage: ADD_USAGE,
    },
    HelpEntry {
        word: "edit",
        summary: "Edit fields of an existing record.",
        usage: EDIT_USAGE,
    },
    HelpEntry {
        word: "find",
        summary: "Search records by keywords, overall or per field.",
        usage: FIND_USAGE,
    },
    HelpEntry {
        word: "delete",
        summary: "Delete the record at an index.",
        usage: DELETE_USAGE,
    },
    HelpEntry {
        word: "schedule",
        summary: "Book an appointment, rejecting clashing times.",
        usage: SCHEDULE_USAGE,
    },
    HelpEntry {
        word: "update-record",
        summary: "Append a consultation entry to a patient's medical record.",
        usage: UPDATE_RECORD_USAGE,
    },
    HelpEntry {
        word: "list",
        summary: "List every record.",
        usage: "Usage: list",
    },
    HelpEntry {
        word: "undo",
        summary: "Undo the last change to the records.",
        usage: "Usage: undo",
    },
    HelpEntry {
        word: "redo",
        summary: "Redo the last undone change.",
        usage: "Usage: redo",
    },
    HelpEntry {
        word: "clear",
        summary: "Clear the terminal screen.",
        usage: "Usage: clear",
    },
    HelpEntry {
        word: "help",
        summary: "Show this help, or help for one command.",
        usage: "Usage: help [COMMAND]",
    },
    HelpEntry {
        word: "exit",
        summary: "Leave the CLI.",
        usage: "Usage: exit",
    },
];

/// Render the interactive help text, optionally filtered to one command.
pub fn interactive_help_text(filter: Option<&str>) -> String {
    if let Some(word) = filter {
        let word = word.to_lowercase();
        for entry in HELP_ENTRIES {
            if entry.word == word {
                return format!("{} - {}\n{}", entry.word, entry.summary, entry.usage);
            }
        }
        return format!("No help available for '{}'. Type 'help' for the full list.", word);
    }

    let mut lines = vec![
        "Available commands:".to_string(),
        String::new(),
    ];
    for entry in HELP_ENTRIES {
        lines.push(format!("  {:<14} {}", entry.word, entry.summary));
    }
    lines.push(String::new());
    lines.push(
        "Typing add, edit, find, delete, schedule or update-record on its own starts a guided dialogue that asks for one field at a time."
            .to_string(),
    );
    lines.push(
        "In a dialogue: '<<' goes back a field, '//' skips a skippable field, '/exit' cancels."
            .to_string(),
    );
    lines.push("Type 'help COMMAND' for the one-line usage of a command.".to_string());
    lines.join("\n")
}
