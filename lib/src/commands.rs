// lib/src/commands.rs

use chrono::{NaiveDate, NaiveTime};
use models::Role;

/// Enum representing the parsed command type in interactive mode.
#[derive(Debug, PartialEq, Clone)]
pub enum CommandType {
    Add(AddArgs),
    Edit(EditArgs),
    Find(FindArgs),
    Delete { index: usize },
    Schedule(ScheduleArgs),
    UpdateRecord(UpdateRecordArgs),
    // Record store plumbing
    List,
    Undo,
    Redo,
    // Utility commands
    Clear,
    Help(Option<String>),
    Exit,
    Unknown,
}

/// Arguments of a complete `add` command. The role decides which of `nric`
/// and `department` is present.
#[derive(Debug, PartialEq, Clone)]
pub struct AddArgs {
    pub role: Role,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub tags: Vec<String>,
    pub nric: Option<String>,
    pub department: Option<String>,
}

/// Arguments of an `edit` command. `None` fields are left unchanged;
/// `tags: Some(vec![])` means "remove all tags" (the bare `t/` form).
#[derive(Debug, PartialEq, Clone, Default)]
pub struct EditArgs {
    pub index: usize,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl EditArgs {
    /// An edit that names no field to change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.address.is_none()
            && self.tags.is_none()
    }
}

/// Arguments of a `find` command. All criteria are conjunctive; a record
/// matches `global` if any of its fields contains the text.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct FindArgs {
    pub global: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub tag: Option<String>,
}

impl FindArgs {
    pub fn is_empty(&self) -> bool {
        self.global.is_none()
            && self.name.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.address.is_none()
            && self.tag.is_none()
    }
}

/// Arguments of a complete `schedule` command.
#[derive(Debug, PartialEq, Clone)]
pub struct ScheduleArgs {
    pub index: usize,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub doctor_name: String,
    pub doctor_nric: String,
    pub patient_name: String,
    pub patient_nric: String,
}

/// Arguments of a complete `update-record` command.
#[derive(Debug, PartialEq, Clone)]
pub struct UpdateRecordArgs {
    pub index: usize,
    pub date: NaiveDate,
    pub diagnosis: String,
    pub treatment: String,
    pub comments: Option<String>,
}
