// lib/src/store.rs
//! In-memory record store with list-snapshot undo/redo.

use log::debug;
use thiserror::Error;

use models::{Appointment, Person, RecordEntry};

use crate::commands::{AddArgs, EditArgs, FindArgs};
use crate::conflict;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("Index {given} is out of range; valid indices are 1-{count}.")]
    InvalidIndex { given: usize, count: usize },
    #[error("There are no records yet; add one first.")]
    Empty,
    #[error("A record for this person already exists in ClinicDB.")]
    Duplicate,
    #[error("The appointment clashes with an existing booking: {0}")]
    AppointmentConflict(String),
    #[error("At least one field to edit must be selected.")]
    EmptyEdit,
    #[error("No more commands to undo.")]
    NothingToUndo,
    #[error("No more commands to redo.")]
    NothingToRedo,
}

pub type StoreResult<T> = Result<T, StoreError>;

/// The record store. Every mutating operation first pushes a full snapshot
/// of the list, which is what undo/redo swap back in.
#[derive(Debug, Default)]
pub struct ClinicStore {
    persons: Vec<Person>,
    undo_stack: Vec<Vec<Person>>,
    redo_stack: Vec<Vec<Person>>,
}

impl ClinicStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_persons(persons: Vec<Person>) -> Self {
        ClinicStore {
            persons,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    fn snapshot(&mut self) {
        self.undo_stack.push(self.persons.clone());
        self.redo_stack.clear();
    }

    fn check_index(&self, index: usize) -> StoreResult<usize> {
        if self.persons.is_empty() {
            return Err(StoreError::Empty);
        }
        if index == 0 || index > self.persons.len() {
            return Err(StoreError::InvalidIndex {
                given: index,
                count: self.persons.len(),
            });
        }
        Ok(index - 1)
    }

    /// Resolve a one-based user index to the record it names.
    pub fn get(&self, index: usize) -> StoreResult<&Person> {
        let i = self.check_index(index)?;
        Ok(&self.persons[i])
    }

    pub fn add(&mut self, args: AddArgs) -> StoreResult<&Person> {
        let person = Person::new(
            args.role,
            args.name,
            args.phone,
            args.email,
            args.address,
            args.tags,
            args.nric,
            args.department,
        );
        if self.persons.iter().any(|p| p.is_same_person(&person)) {
            return Err(StoreError::Duplicate);
        }
        self.snapshot();
        debug!("adding {} record for {}", person.role, person.name);
        self.persons.push(person);
        Ok(self.persons.last().unwrap())
    }

    pub fn edit(&mut self, args: EditArgs) -> StoreResult<&Person> {
        let i = self.check_index(args.index)?;
        if args.is_empty() {
            return Err(StoreError::EmptyEdit);
        }

        let mut edited = self.persons[i].clone();
        if let Some(name) = args.name {
            edited.name = name;
        }
        if let Some(phone) = args.phone {
            edited.phone = phone;
        }
        if let Some(email) = args.email {
            edited.email = email;
        }
        if let Some(address) = args.address {
            edited.address = address;
        }
        if let Some(tags) = args.tags {
            edited.tags = tags;
        }
        edited.updated_at = chrono::Utc::now();

        // The edited record must not collide with any other record.
        if self
            .persons
            .iter()
            .enumerate()
            .any(|(j, p)| j != i && p.is_same_person(&edited))
        {
            return Err(StoreError::Duplicate);
        }

        self.snapshot();
        self.persons[i] = edited;
        Ok(&self.persons[i])
    }

    pub fn delete(&mut self, index: usize) -> StoreResult<Person> {
        let i = self.check_index(index)?;
        self.snapshot();
        Ok(self.persons.remove(i))
    }

    /// Conjunctive filtering; returns one-based indices with the matches.
    pub fn find(&self, args: &FindArgs) -> Vec<(usize, &Person)> {
        self.persons
            .iter()
            .enumerate()
            .filter(|(_, p)| matches_find(p, args))
            .map(|(i, p)| (i + 1, p))
            .collect()
    }

    /// Book an appointment on the record at `index`, rejecting clashes with
    /// the same doctor's existing bookings on that record.
    pub fn schedule(&mut self, index: usize, appointment: Appointment) -> StoreResult<&Person> {
        let i = self.check_index(index)?;
        let existing = &self.persons[i].appointments;
        if conflict::conflicts_with_any(&appointment, existing) {
            let clash = existing
                .iter()
                .find(|a| {
                    !a.is_placeholder()
                        && a.date == appointment.date
                        && conflict::times_overlap(appointment.start, appointment.end, a.start, a.end)
                })
                .map(|a| a.summary())
                .unwrap_or_default();
            return Err(StoreError::AppointmentConflict(clash));
        }
        self.snapshot();
        self.persons[i].appointments.push(appointment);
        self.persons[i].updated_at = chrono::Utc::now();
        Ok(&self.persons[i])
    }

    pub fn update_record(&mut self, index: usize, entry: RecordEntry) -> StoreResult<&Person> {
        let i = self.check_index(index)?;
        self.snapshot();
        self.persons[i].records.push(entry);
        self.persons[i].updated_at = chrono::Utc::now();
        Ok(&self.persons[i])
    }

    pub fn undo(&mut self) -> StoreResult<()> {
        let previous = self.undo_stack.pop().ok_or(StoreError::NothingToUndo)?;
        self.redo_stack.push(std::mem::replace(&mut self.persons, previous));
        Ok(())
    }

    pub fn redo(&mut self) -> StoreResult<()> {
        let next = self.redo_stack.pop().ok_or(StoreError::NothingToRedo)?;
        self.undo_stack.push(std::mem::replace(&mut self.persons, next));
        Ok(())
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn matches_find(person: &Person, args: &FindArgs) -> bool {
    if let Some(global) = &args.global {
        let tag_hit = person.tags.iter().any(|t| contains_ci(t, global));
        let field_hit = contains_ci(&person.name, global)
            || contains_ci(&person.phone, global)
            || contains_ci(&person.email, global)
            || contains_ci(&person.address, global)
            || person
                .nric
                .as_deref()
                .map(|n| contains_ci(n, global))
                .unwrap_or(false)
            || person
                .department
                .as_deref()
                .map(|d| contains_ci(d, global))
                .unwrap_or(false);
        if !tag_hit && !field_hit {
            return false;
        }
    }
    if let Some(name) = &args.name {
        if !contains_ci(&person.name, name) {
            return false;
        }
    }
    if let Some(phone) = &args.phone {
        if !contains_ci(&person.phone, phone) {
            return false;
        }
    }
    if let Some(email) = &args.email {
        if !contains_ci(&person.email, email) {
            return false;
        }
    }
    if let Some(address) = &args.address {
        if !contains_ci(&person.address, address) {
            return false;
        }
    }
    if let Some(tag) = &args.tag {
        if !person.tags.iter().any(|t| contains_ci(t, tag)) {
            return false;
        }
    }
    true
}
