// lib/src/session/collect/mod.rs
//! Field Collector variants: per-command prompts, validity checks, skip
//! eligibility, branching and canonical serialization.
//!
//! `CommandKind` is a closed sum type; every dispatch below matches
//! exhaustively, so wiring a new command kind into prompts, validation,
//! branching and serialization is enforced at compile time.

pub mod branch;

mod add;
mod delete;
mod edit;
mod find;
mod schedule;
mod update_record;

pub use branch::BranchState;

use super::SessionContext;

/// Which interactive dialogue is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Add,
    Edit,
    Find,
    Delete,
    Schedule,
    UpdateRecord,
}

impl CommandKind {
    /// Recognize a command word typed with an empty argument tail.
    pub fn from_trigger(word: &str) -> Option<Self> {
        match word.to_lowercase().as_str() {
            "add" => Some(CommandKind::Add),
            "edit" => Some(CommandKind::Edit),
            "find" => Some(CommandKind::Find),
            "delete" => Some(CommandKind::Delete),
            "schedule" => Some(CommandKind::Schedule),
            "update-record" => Some(CommandKind::UpdateRecord),
            _ => None,
        }
    }

    pub fn command_word(&self) -> &'static str {
        match self {
            CommandKind::Add => "add",
            CommandKind::Edit => "edit",
            CommandKind::Find => "find",
            CommandKind::Delete => "delete",
            CommandKind::Schedule => "schedule",
            CommandKind::UpdateRecord => "update-record",
        }
    }

    pub fn total_fields(&self) -> usize {
        match self {
            CommandKind::Add => add::TOTAL_FIELDS,
            CommandKind::Edit => edit::TOTAL_FIELDS,
            CommandKind::Find => find::TOTAL_FIELDS,
            CommandKind::Delete => delete::TOTAL_FIELDS,
            CommandKind::Schedule => schedule::TOTAL_FIELDS,
            CommandKind::UpdateRecord => update_record::TOTAL_FIELDS,
        }
    }

    /// Index of the field-number selection step for variants with variable
    /// topology.
    pub fn selection_field(&self) -> Option<usize> {
        match self {
            CommandKind::Edit => Some(edit::SELECTION_FIELD),
            CommandKind::Find => Some(find::SELECTION_FIELD),
            CommandKind::Add
            | CommandKind::Delete
            | CommandKind::Schedule
            | CommandKind::UpdateRecord => None,
        }
    }

    /// Highest candidate field number selectable at the selection step.
    pub fn selection_max(&self) -> usize {
        match self {
            CommandKind::Edit => edit::CANDIDATE_COUNT,
            CommandKind::Find => find::CANDIDATE_COUNT,
            CommandKind::Add
            | CommandKind::Delete
            | CommandKind::Schedule
            | CommandKind::UpdateRecord => 0,
        }
    }

    /// The Delete dialogue has exactly one field and no way back.
    pub fn allows_retreat(&self) -> bool {
        !matches!(self, CommandKind::Delete)
    }

    pub fn prompt(&self, answers: &[String], index: usize, ctx: &SessionContext) -> String {
        match self {
            CommandKind::Add => add::prompt(answers, index),
            CommandKind::Edit => edit::prompt(index, ctx),
            CommandKind::Find => find::prompt(index),
            CommandKind::Delete => delete::prompt(index, ctx),
            CommandKind::Schedule => schedule::prompt(index, ctx),
            CommandKind::UpdateRecord => update_record::prompt(index, ctx),
        }
    }

    pub fn is_valid(
        &self,
        ctx: &SessionContext,
        answers: &[String],
        index: usize,
        candidate: &str,
    ) -> bool {
        match self {
            CommandKind::Add => add::is_valid(answers, index, candidate),
            CommandKind::Edit => edit::is_valid(ctx, index, candidate),
            CommandKind::Find => find::is_valid(index, candidate),
            CommandKind::Delete => delete::is_valid(ctx, index, candidate),
            CommandKind::Schedule => schedule::is_valid(ctx, answers, index, candidate),
            CommandKind::UpdateRecord => update_record::is_valid(ctx, index, candidate),
        }
    }

    pub fn constraint(&self, ctx: &SessionContext, answers: &[String], index: usize) -> String {
        match self {
            CommandKind::Add => add::constraint(answers, index),
            CommandKind::Edit => edit::constraint(ctx, index),
            CommandKind::Find => find::constraint(index),
            CommandKind::Delete => delete::constraint(ctx, index),
            CommandKind::Schedule => schedule::constraint(ctx, answers, index),
            CommandKind::UpdateRecord => update_record::constraint(ctx, index),
        }
    }

    pub fn is_skippable(&self, index: usize) -> bool {
        match self {
            CommandKind::Add => add::is_skippable(index),
            CommandKind::Edit => edit::is_skippable(index),
            CommandKind::Find => find::is_skippable(index),
            CommandKind::Delete => delete::is_skippable(index),
            CommandKind::Schedule => schedule::is_skippable(index),
            CommandKind::UpdateRecord => update_record::is_skippable(index),
        }
    }

    /// Canonical trimming applied to an accepted answer before it is stored.
    /// The selection step additionally normalizes its number list to
    /// ascending order.
    pub fn normalize(&self, index: usize, raw: &str) -> String {
        let trimmed = raw.trim().to_string();
        if Some(index) == self.selection_field() {
            let numbers = branch::parse_selection(&trimmed, self.selection_max())
                .expect("normalize called on an answer that passed validation");
            return numbers
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<_>>()
                .join(" ");
        }
        trimmed
    }

    /// Compute the index of the field to collect after accepting the answer
    /// at `accepted`, initializing or advancing branch state for the
    /// variable-topology variants, and padding `answers` with empty
    /// placeholders for every field that is skipped over so the answer
    /// sequence stays aligned with absolute field positions.
    ///
    /// Returns `total_fields()` when the dialogue is complete.
    pub fn next_index(
        &self,
        answers: &mut Vec<String>,
        accepted: usize,
        branch_state: &mut Option<BranchState>,
    ) -> usize {
        let total = self.total_fields();
        let selection = match self.selection_field() {
            Some(s) => s,
            None => return accepted + 1,
        };

        if accepted < selection {
            return accepted + 1;
        }

        if accepted == selection {
            let numbers = branch::parse_selection(&answers[selection], self.selection_max())
                .expect("selection answer passed validation");
            // Candidate number n sits at absolute index selection + n.
            let selected = numbers.iter().map(|n| selection + n).collect();
            *branch_state = Some(BranchState::new(selected));
        } else {
            branch_state
                .as_mut()
                .expect("branch state exists past the selection field")
                .consume();
        }

        let state = branch_state.as_ref().unwrap();
        let target = state.current().unwrap_or(total);
        while answers.len() < target {
            answers.push(String::new());
        }
        target
    }

    /// Reconstruct the canonical one-line command from the complete answer
    /// sequence.
    pub fn serialize(&self, answers: &[String]) -> String {
        match self {
            CommandKind::Add => add::serialize(answers),
            CommandKind::Edit => edit::serialize(answers),
            CommandKind::Find => find::serialize(answers),
            CommandKind::Delete => delete::serialize(answers),
            CommandKind::Schedule => schedule::serialize(answers),
            CommandKind::UpdateRecord => update_record::serialize(answers),
        }
    }
}

/// Shared helper: constraint text for a one-based target-index field.
pub(crate) fn index_constraint(ctx: &SessionContext) -> String {
    if ctx.record_count() == 0 {
        "There are no records yet; add one first.".to_string()
    } else {
        format!(
            "The index should be a positive integer between 1 and {}.",
            ctx.record_count()
        )
    }
}

/// Shared helper: validity of a one-based target-index answer.
pub(crate) fn index_is_valid(ctx: &SessionContext, candidate: &str) -> bool {
    match candidate.trim().parse::<usize>() {
        Ok(i) => i >= 1 && i <= ctx.record_count(),
        Err(_) => false,
    }
}
