// lib/src/session/collect/edit.rs
//! The `edit` dialogue: target index, a field-number selection step, then
//! only the selected fields.

use models::fields::{self, FieldKind};

use super::branch;
use super::SessionContext;
use crate::session::CLEAR_TAGS_SENTINEL;

pub const TOTAL_FIELDS: usize = 7;
pub const SELECTION_FIELD: usize = 1;
pub const CANDIDATE_COUNT: usize = 5;

const INDEX: usize = 0;
// Candidate fields sit at SELECTION_FIELD + n for field number n.
const NAME: usize = 2;
const PHONE: usize = 3;
const EMAIL: usize = 4;
const ADDRESS: usize = 5;
const TAGS: usize = 6;

const FIELD_MENU: &str = "(1. Name 2. Phone 3. Email 4. Address 5. Tags)";

pub fn prompt(index: usize, ctx: &SessionContext) -> String {
    match index {
        INDEX => format!(
            "Please enter the index of the record you would like to edit (1-{}).",
            ctx.record_count().max(1)
        ),
        SELECTION_FIELD => format!(
            "Please enter the numbers of the fields you would like to edit, separated by spaces {}, or // to leave everything unchanged.",
            FIELD_MENU
        ),
        NAME => "Please enter the updated name.".to_string(),
        PHONE => "Please enter the updated phone number.".to_string(),
        EMAIL => "Please enter the updated email address.".to_string(),
        ADDRESS => "Please enter the updated address.".to_string(),
        TAGS => format!(
            "Please enter the updated tags, separated by commas, {} to remove all tags, or // to leave them unchanged.",
            CLEAR_TAGS_SENTINEL
        ),
        _ => unreachable!("edit dialogue has {} fields", TOTAL_FIELDS),
    }
}

pub fn is_valid(ctx: &SessionContext, index: usize, candidate: &str) -> bool {
    match index {
        INDEX => super::index_is_valid(ctx, candidate),
        SELECTION_FIELD => branch::parse_selection(candidate, CANDIDATE_COUNT).is_some(),
        NAME => FieldKind::Name.is_valid(candidate),
        PHONE => FieldKind::Phone.is_valid(candidate),
        EMAIL => FieldKind::Email.is_valid(candidate),
        ADDRESS => FieldKind::Address.is_valid(candidate),
        TAGS => {
            candidate.trim() == CLEAR_TAGS_SENTINEL
                || (!candidate.trim().is_empty() && fields::is_valid_tag_list(candidate))
        }
        _ => unreachable!("edit dialogue has {} fields", TOTAL_FIELDS),
    }
}

pub fn constraint(ctx: &SessionContext, index: usize) -> String {
    match index {
        INDEX => super::index_constraint(ctx),
        SELECTION_FIELD => format!(
            "Field numbers must be distinct integers between 1 and {}, separated by spaces {}.",
            CANDIDATE_COUNT, FIELD_MENU
        ),
        NAME => FieldKind::Name.constraint().to_string(),
        PHONE => FieldKind::Phone.constraint().to_string(),
        EMAIL => FieldKind::Email.constraint().to_string(),
        ADDRESS => FieldKind::Address.constraint().to_string(),
        TAGS => format!(
            "{} Use {} to remove all tags.",
            FieldKind::Tag.constraint(),
            CLEAR_TAGS_SENTINEL
        ),
        _ => unreachable!("edit dialogue has {} fields", TOTAL_FIELDS),
    }
}

pub fn is_skippable(index: usize) -> bool {
    index == SELECTION_FIELD || index == TAGS
}

pub fn serialize(answers: &[String]) -> String {
    let mut parts = vec!["edit".to_string(), answers[INDEX].clone()];
    if !answers[NAME].is_empty() {
        parts.push(format!("n/{}", answers[NAME]));
    }
    if !answers[PHONE].is_empty() {
        parts.push(format!("p/{}", answers[PHONE]));
    }
    if !answers[EMAIL].is_empty() {
        parts.push(format!("e/{}", answers[EMAIL]));
    }
    if !answers[ADDRESS].is_empty() {
        parts.push(format!("a/{}", answers[ADDRESS]));
    }
    if answers[TAGS] == CLEAR_TAGS_SENTINEL {
        parts.push("t/".to_string());
    } else {
        for tag in fields::split_tags(&answers[TAGS]) {
            parts.push(format!("t/{}", tag));
        }
    }
    parts.join(" ")
}
