// models/src/errors.rs

use serde::{Deserialize, Serialize};
pub use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum ValidationError {
    #[error("Invalid value for {kind}: '{value}'")]
    InvalidValue { kind: String, value: String },
    #[error("Unknown role: '{0}'. Roles are 'patient' and 'doctor'.")]
    UnknownRole(String),
    #[error("Invalid date: '{0}'. Dates use the dd.MM.yyyy format, e.g. 22.11.2018.")]
    InvalidDate(String),
    #[error("Invalid time: '{0}'. Times use the 24-hour HHmm format, e.g. 1330.")]
    InvalidTime(String),
    #[error("Invalid index: '{0}'. Indices are positive integers.")]
    InvalidIndex(String),
}

pub type ValidationResult<T> = Result<T, ValidationError>;
