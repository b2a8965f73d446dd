// lib/src/session/collect/find.rs
//! The `find` dialogue: a category selection step, then one keyword per
//! selected category. Selecting nothing is a bare global search.

use super::branch;

pub const TOTAL_FIELDS: usize = 7;
pub const SELECTION_FIELD: usize = 0;
pub const CANDIDATE_COUNT: usize = 6;

// Candidate fields sit at SELECTION_FIELD + n for category number n.
const GLOBAL: usize = 1;
const NAME: usize = 2;
const PHONE: usize = 3;
const EMAIL: usize = 4;
const ADDRESS: usize = 5;
const TAGS: usize = 6;

const CATEGORY_MENU: &str = "(1. All fields 2. Name 3. Phone 4. Email 5. Address 6. Tags)";

pub fn prompt(index: usize) -> String {
    match index {
        SELECTION_FIELD => format!(
            "Please enter the numbers of the categories you would like to search by, separated by spaces {}, or // to list every record.",
            CATEGORY_MENU
        ),
        GLOBAL => "Please enter the keywords to search all fields for.".to_string(),
        NAME => "Please enter the name keyword.".to_string(),
        PHONE => "Please enter the phone keyword.".to_string(),
        EMAIL => "Please enter the email keyword.".to_string(),
        ADDRESS => "Please enter the address keyword.".to_string(),
        TAGS => "Please enter the tag keyword.".to_string(),
        _ => unreachable!("find dialogue has {} fields", TOTAL_FIELDS),
    }
}

pub fn is_valid(index: usize, candidate: &str) -> bool {
    match index {
        SELECTION_FIELD => branch::parse_selection(candidate, CANDIDATE_COUNT).is_some(),
        GLOBAL | NAME | PHONE | EMAIL | ADDRESS | TAGS => !candidate.trim().is_empty(),
        _ => unreachable!("find dialogue has {} fields", TOTAL_FIELDS),
    }
}

pub fn constraint(index: usize) -> String {
    match index {
        SELECTION_FIELD => format!(
            "Category numbers must be distinct integers between 1 and {}, separated by spaces {}.",
            CANDIDATE_COUNT, CATEGORY_MENU
        ),
        _ => "Search keywords should not be blank.".to_string(),
    }
}

pub fn is_skippable(index: usize) -> bool {
    index == SELECTION_FIELD
}

pub fn serialize(answers: &[String]) -> String {
    let mut parts = vec!["find".to_string()];
    if !answers[GLOBAL].is_empty() {
        parts.push(answers[GLOBAL].clone());
    }
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
    if !answers[TAGS].is_empty() {
        parts.push(format!("t/{}", answers[TAGS]));
    }
    parts.join(" ")
}
