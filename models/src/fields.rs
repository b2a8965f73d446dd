// models/src/fields.rs
//! Scalar field kinds and their validators.
//!
//! Every answer collected interactively and every flag value parsed from a
//! one-line command goes through the same `FieldKind` predicate, so the two
//! input paths cannot drift apart.

use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{ValidationError, ValidationResult};

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 ]*$").unwrap());
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{3,}$").unwrap());
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9.+_-]*@[A-Za-z0-9][A-Za-z0-9.-]*$").unwrap()
});
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").unwrap());
static NRIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[STFG]\d{7}[A-Z]$").unwrap());
static TIME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}$").unwrap());

/// The scalar field kinds understood by the command language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Name,
    Phone,
    Email,
    Address,
    Tag,
    Nric,
    Role,
    Department,
    Date,
    Time,
    Index,
    Diagnosis,
    Treatment,
    Comments,
}

impl FieldKind {
    /// Pure validity predicate for a single raw value.
    pub fn is_valid(&self, raw: &str) -> bool {
        let raw = raw.trim();
        match self {
            FieldKind::Name => NAME_RE.is_match(raw),
            FieldKind::Phone => PHONE_RE.is_match(raw),
            FieldKind::Email => EMAIL_RE.is_match(raw),
            FieldKind::Address => !raw.is_empty(),
            FieldKind::Tag => TAG_RE.is_match(raw),
            FieldKind::Nric => NRIC_RE.is_match(raw),
            FieldKind::Role => matches!(raw.to_lowercase().as_str(), "patient" | "doctor"),
            FieldKind::Department => NAME_RE.is_match(raw),
            FieldKind::Date => parse_date(raw).is_ok(),
            FieldKind::Time => parse_time(raw).is_ok(),
            FieldKind::Index => raw.parse::<usize>().map(|i| i > 0).unwrap_or(false),
            FieldKind::Diagnosis | FieldKind::Treatment | FieldKind::Comments => !raw.is_empty(),
        }
    }

    /// The message shown when `is_valid` rejects an answer.
    pub fn constraint(&self) -> &'static str {
        match self {
            FieldKind::Name => "Names should start with a letter or digit and contain only letters, digits and spaces.",
            FieldKind::Phone => "Phone numbers should contain only digits and be at least 3 digits long.",
            FieldKind::Email => "Emails should be of the form local-part@domain.",
            FieldKind::Address => "Addresses can take any value but should not be blank.",
            FieldKind::Tag => "Tags should be single alphanumeric words, separated by commas.",
            FieldKind::Nric => "NRICs should start with S, T, F or G, followed by 7 digits and an uppercase letter.",
            FieldKind::Role => "The role must be either 'patient' or 'doctor'.",
            FieldKind::Department => "Departments should start with a letter or digit and contain only letters, digits and spaces.",
            FieldKind::Date => "Dates use the dd.MM.yyyy format, e.g. 22.11.2018.",
            FieldKind::Time => "Times use the 24-hour HHmm format, e.g. 1330.",
            FieldKind::Index => "The index should be a positive integer.",
            FieldKind::Diagnosis => "The diagnosis should not be blank.",
            FieldKind::Treatment => "The treatment should not be blank.",
            FieldKind::Comments => "Comments should not be blank.",
        }
    }
}

/// Parse an appointment or record date in the `dd.MM.yyyy` form.
pub fn parse_date(raw: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%d.%m.%Y")
        .map_err(|_| ValidationError::InvalidDate(raw.trim().to_string()))
}

/// Parse a clock time in the 4-digit `HHmm` form.
pub fn parse_time(raw: &str) -> ValidationResult<NaiveTime> {
    let raw = raw.trim();
    if !TIME_RE.is_match(raw) {
        return Err(ValidationError::InvalidTime(raw.to_string()));
    }
    NaiveTime::parse_from_str(raw, "%H%M")
        .map_err(|_| ValidationError::InvalidTime(raw.to_string()))
}

/// Parse a one-based record index.
pub fn parse_index(raw: &str) -> ValidationResult<usize> {
    match raw.trim().parse::<usize>() {
        Ok(i) if i > 0 => Ok(i),
        _ => Err(ValidationError::InvalidIndex(raw.trim().to_string())),
    }
}

/// Split a comma-separated tag answer into trimmed tags, dropping empties.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Validate a comma-separated tag list tag-by-tag. An empty list is valid.
pub fn is_valid_tag_list(raw: &str) -> bool {
    let tags = split_tags(raw);
    if raw.trim().is_empty() {
        return true;
    }
    !tags.is_empty() && tags.iter().all(|t| FieldKind::Tag.is_valid(t))
}
