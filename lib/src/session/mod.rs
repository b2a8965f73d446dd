// lib/src/session/mod.rs
//! Interactive command completion ("intuitive mode").
//!
//! When a command word arrives with no arguments, the host loop opens a
//! session that collects one field per turn, validates each answer as it is
//! typed, and finally reconstructs the canonical one-line command the user
//! could have typed directly. `engine` owns the per-turn state machine;
//! `collect` defines the per-command field sequences, branching and
//! serialization.

pub mod collect;
pub mod engine;

pub use collect::CommandKind;
pub use engine::{Session, SessionError, Turn};

use models::{Appointment, Person};

/// Typed wherever a field is skip-eligible; elsewhere it is literal input.
pub const SKIP_SENTINEL: &str = "//";
/// Accepted only at the edit dialogue's tags field: remove all tags.
pub const CLEAR_TAGS_SENTINEL: &str = "--";
/// Routed by the dispatcher to `Session::retreat` while a session is active.
pub const BACK_TOKEN: &str = "<<";
/// Routed by the dispatcher to `Session::cancel` while a session is active.
pub const ABORT_TOKEN: &str = "/exit";

/// Read-only view of the record store handed into every session operation,
/// so collectors stay pure functions of `(context, answers, index, input)`.
pub struct SessionContext<'a> {
    records: &'a [Person],
}

impl<'a> SessionContext<'a> {
    pub fn new(records: &'a [Person]) -> Self {
        SessionContext { records }
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Appointments of the record a one-based index answer names, if that
    /// answer is in range.
    pub fn appointments_of(&self, raw_index: &str) -> Option<&'a [Appointment]> {
        let index: usize = raw_index.trim().parse().ok()?;
        if index == 0 {
            return None;
        }
        self.records.get(index - 1).map(|p| p.appointments.as_slice())
    }
}
