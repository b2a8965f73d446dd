// lib/src/session/collect/add.rs
//! The `add` dialogue: fixed field order with a role-dependent final field.

use models::fields::{self, FieldKind};
use models::Role;
use std::str::FromStr;

pub const TOTAL_FIELDS: usize = 7;

const ROLE: usize = 0;
const NAME: usize = 1;
const PHONE: usize = 2;
const EMAIL: usize = 3;
const ADDRESS: usize = 4;
const TAGS: usize = 5;
const ROLE_DEPENDENT: usize = 6;

/// The role answer at index 0 decides what the last field asks for.
fn role_of(answers: &[String]) -> Role {
    Role::from_str(&answers[ROLE]).expect("role answer passed validation")
}

pub fn prompt(answers: &[String], index: usize) -> String {
    match index {
        ROLE => "Please enter the new person's role (patient or doctor).".to_string(),
        NAME => "Please enter the person's name.".to_string(),
        PHONE => "Please enter the person's phone number.".to_string(),
        EMAIL => "Please enter the person's email address.".to_string(),
        ADDRESS => "Please enter the person's home address.".to_string(),
        TAGS => "Please enter any tags, separated by commas, or // to skip.".to_string(),
        ROLE_DEPENDENT => match role_of(answers) {
            Role::Patient => "Please enter the patient's NRIC.".to_string(),
            Role::Doctor => "Please enter the doctor's medical department.".to_string(),
        },
        _ => unreachable!("add dialogue has {} fields", TOTAL_FIELDS),
    }
}

pub fn is_valid(answers: &[String], index: usize, candidate: &str) -> bool {
    match index {
        ROLE => FieldKind::Role.is_valid(candidate),
        NAME => FieldKind::Name.is_valid(candidate),
        PHONE => FieldKind::Phone.is_valid(candidate),
        EMAIL => FieldKind::Email.is_valid(candidate),
        ADDRESS => FieldKind::Address.is_valid(candidate),
        TAGS => !candidate.trim().is_empty() && fields::is_valid_tag_list(candidate),
        ROLE_DEPENDENT => match role_of(answers) {
            Role::Patient => FieldKind::Nric.is_valid(candidate),
            Role::Doctor => FieldKind::Department.is_valid(candidate),
        },
        _ => unreachable!("add dialogue has {} fields", TOTAL_FIELDS),
    }
}

pub fn constraint(answers: &[String], index: usize) -> String {
    let kind = match index {
        ROLE => FieldKind::Role,
        NAME => FieldKind::Name,
        PHONE => FieldKind::Phone,
        EMAIL => FieldKind::Email,
        ADDRESS => FieldKind::Address,
        TAGS => FieldKind::Tag,
        ROLE_DEPENDENT => match role_of(answers) {
            Role::Patient => FieldKind::Nric,
            Role::Doctor => FieldKind::Department,
        },
        _ => unreachable!("add dialogue has {} fields", TOTAL_FIELDS),
    };
    kind.constraint().to_string()
}

pub fn is_skippable(index: usize) -> bool {
    index == TAGS
}

pub fn serialize(answers: &[String]) -> String {
    let role = role_of(answers);
    let mut parts = vec![
        "add".to_string(),
        format!("r/{}", role),
        format!("n/{}", answers[NAME]),
        format!("p/{}", answers[PHONE]),
        format!("e/{}", answers[EMAIL]),
        format!("a/{}", answers[ADDRESS]),
    ];
    for tag in fields::split_tags(&answers[TAGS]) {
        parts.push(format!("t/{}", tag));
    }
    match role {
        Role::Patient => parts.push(format!("i/{}", answers[ROLE_DEPENDENT])),
        Role::Doctor => parts.push(format!("d/{}", answers[ROLE_DEPENDENT])),
    }
    parts.join(" ")
}
