// lib/src/session/engine.rs
//! The session protocol engine: one mutable `Session` value, owned by the
//! host loop and driven one line at a time.

use log::debug;
use thiserror::Error;

use super::collect::{BranchState, CommandKind};
use super::{SessionContext, SKIP_SENTINEL};

/// What the engine hands back after a successful turn.
#[derive(Debug, Clone, PartialEq)]
pub enum Turn {
    /// The dialogue continues; show this prompt.
    Prompt(String),
    /// The dialogue is complete; execute this canonical command line.
    Completed(String),
}

/// Retryable rejection of the current answer. The session state is
/// untouched; the message already ends with the re-issued prompt.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("{0}")]
    Retry(String),
}

#[derive(Debug, Clone, PartialEq)]
enum SessionState {
    Idle,
    Collecting {
        kind: CommandKind,
        field_index: usize,
    },
}

/// The single in-progress dialogue. At most one is alive per host loop.
#[derive(Debug)]
pub struct Session {
    state: SessionState,
    answers: Vec<String>,
    branch: Option<BranchState>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Session {
            state: SessionState::Idle,
            answers: Vec::new(),
            branch: None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Collecting { .. })
    }

    pub fn active_kind(&self) -> Option<CommandKind> {
        match self.state {
            SessionState::Collecting { kind, .. } => Some(kind),
            SessionState::Idle => None,
        }
    }

    pub fn field_index(&self) -> Option<usize> {
        match self.state {
            SessionState::Collecting { field_index, .. } => Some(field_index),
            SessionState::Idle => None,
        }
    }

    /// The answers accepted so far, placeholders included.
    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    /// Try to open a dialogue for `word`. Returns the prompt for field 0 if
    /// the word names a command kind; `None` leaves the engine idle and the
    /// line falls through to the one-shot parser. The command word itself is
    /// the trigger, never an answer.
    ///
    /// Calling this while a dialogue is already collecting is a caller
    /// contract violation.
    pub fn begin(&mut self, word: &str, ctx: &SessionContext) -> Option<String> {
        if self.is_active() {
            panic!("begin() called while a session is already collecting");
        }
        let kind = CommandKind::from_trigger(word)?;
        debug!("opening {} completion session", kind.command_word());
        self.state = SessionState::Collecting {
            kind,
            field_index: 0,
        };
        self.answers.clear();
        self.branch = None;
        Some(kind.prompt(&self.answers, 0, ctx))
    }

    /// Submit one answer line for the current field.
    pub fn submit(&mut self, raw: &str, ctx: &SessionContext) -> Result<Turn, SessionError> {
        let (kind, field_index) = match self.state {
            SessionState::Collecting { kind, field_index } => (kind, field_index),
            SessionState::Idle => panic!("submit() called while no session is active"),
        };

        let trimmed = raw.trim();
        let answer = if trimmed == SKIP_SENTINEL && kind.is_skippable(field_index) {
            // Skip-eligible field left empty on purpose.
            String::new()
        } else {
            // Everywhere else the sentinel is literal input and validates
            // like any other answer.
            if !kind.is_valid(ctx, &self.answers, field_index, trimmed) {
                let message = format!(
                    "{}\n{}",
                    kind.constraint(ctx, &self.answers, field_index),
                    kind.prompt(&self.answers, field_index, ctx)
                );
                return Err(SessionError::Retry(message));
            }
            kind.normalize(field_index, trimmed)
        };

        debug_assert_eq!(self.answers.len(), field_index);
        self.answers.push(answer);
        let next = kind.next_index(&mut self.answers, field_index, &mut self.branch);
        if next == kind.total_fields() {
            return Ok(Turn::Completed(self.finalize(kind)));
        }
        self.state = SessionState::Collecting {
            kind,
            field_index: next,
        };
        Ok(Turn::Prompt(kind.prompt(&self.answers, next, ctx)))
    }

    /// Whether the dispatcher may route the back-navigation token here.
    pub fn can_retreat(&self) -> bool {
        match self.state {
            SessionState::Collecting { kind, field_index } => {
                kind.allows_retreat() && field_index > 0
            }
            SessionState::Idle => false,
        }
    }

    /// Step back one field. For the branched dialogues, retreating from
    /// inside the branch collapses to the selection field and discards all
    /// branch state; there is no single-step back path through a branch.
    ///
    /// Calling this when `can_retreat()` is false is a caller contract
    /// violation.
    pub fn retreat(&mut self, ctx: &SessionContext) -> String {
        let (kind, field_index) = match self.state {
            SessionState::Collecting { kind, field_index } => (kind, field_index),
            SessionState::Idle => panic!("retreat() called while no session is active"),
        };
        if !self.can_retreat() {
            panic!(
                "retreat() not permitted for {} at field {}",
                kind.command_word(),
                field_index
            );
        }

        let target = match kind.selection_field() {
            Some(selection) if field_index > selection => {
                self.answers.truncate(selection);
                self.branch = None;
                selection
            }
            _ => {
                self.answers.pop();
                field_index - 1
            }
        };
        self.state = SessionState::Collecting {
            kind,
            field_index: target,
        };
        kind.prompt(&self.answers, target, ctx)
    }

    /// Abort the dialogue and discard everything collected.
    pub fn cancel(&mut self) {
        if let SessionState::Collecting { kind, .. } = self.state {
            debug!("cancelling {} completion session", kind.command_word());
        }
        self.reset();
    }

    fn finalize(&mut self, kind: CommandKind) -> String {
        debug_assert_eq!(self.answers.len(), kind.total_fields());
        let command = kind.serialize(&self.answers);
        debug!("session complete: {}", command);
        self.reset();
        command
    }

    fn reset(&mut self) {
        self.state = SessionState::Idle;
        self.answers.clear();
        self.branch = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use models::{Appointment, Person, Role};

    fn person(name: &str) -> Person {
        Person::new(
            Role::Patient,
            name.to_string(),
            "91234567".to_string(),
            "p@clinic.example".to_string(),
            "1 Clinic Way".to_string(),
            vec![],
            Some("S1234567A".to_string()),
            None,
        )
    }

    fn person_with_booking() -> Person {
        let mut p = person("John Doe");
        p.appointments.push(Appointment {
            date: NaiveDate::from_ymd_opt(2018, 11, 22).unwrap(),
            start: NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            doctor_name: "Amy Lee".to_string(),
            doctor_nric: "S7654321B".to_string(),
            patient_name: "John Doe".to_string(),
            patient_nric: "S1234567A".to_string(),
        });
        p
    }

    fn submit_ok(session: &mut Session, ctx: &SessionContext, raw: &str) -> Turn {
        session.submit(raw, ctx).expect("answer should be accepted")
    }

    #[test]
    fn add_dialogue_reconstructs_canonical_command() {
        let records = vec![];
        let ctx = SessionContext::new(&records);
        let mut session = Session::new();

        let prompt = session.begin("add", &ctx).unwrap();
        assert!(prompt.contains("role"));

        submit_ok(&mut session, &ctx, "patient");
        submit_ok(&mut session, &ctx, "John Doe");
        submit_ok(&mut session, &ctx, "91234567");
        submit_ok(&mut session, &ctx, "john@example.com");
        submit_ok(&mut session, &ctx, "1 Clinic Way");
        submit_ok(&mut session, &ctx, "diabetic, followup");
        let done = submit_ok(&mut session, &ctx, "S1234567A");

        assert_eq!(
            done,
            Turn::Completed(
                "add r/patient n/John Doe p/91234567 e/john@example.com a/1 Clinic Way t/diabetic t/followup i/S1234567A"
                    .to_string()
            )
        );
        assert!(!session.is_active());
    }

    #[test]
    fn add_doctor_branch_asks_for_department() {
        let records = vec![];
        let ctx = SessionContext::new(&records);
        let mut session = Session::new();
        session.begin("add", &ctx).unwrap();

        submit_ok(&mut session, &ctx, "doctor");
        submit_ok(&mut session, &ctx, "Amy Lee");
        submit_ok(&mut session, &ctx, "98765432");
        submit_ok(&mut session, &ctx, "amy@clinic.example");
        submit_ok(&mut session, &ctx, "2 Clinic Way");
        let turn = submit_ok(&mut session, &ctx, "//");
        match turn {
            Turn::Prompt(p) => assert!(p.contains("department"), "got: {}", p),
            other => panic!("expected a department prompt, got {:?}", other),
        }
        let done = submit_ok(&mut session, &ctx, "Cardiology");
        assert_eq!(
            done,
            Turn::Completed(
                "add r/doctor n/Amy Lee p/98765432 e/amy@clinic.example a/2 Clinic Way d/Cardiology"
                    .to_string()
            )
        );
    }

    #[test]
    fn rejection_is_idempotent_and_keeps_state() {
        let records = vec![];
        let ctx = SessionContext::new(&records);
        let mut session = Session::new();
        session.begin("add", &ctx).unwrap();
        submit_ok(&mut session, &ctx, "patient");

        let first = session.submit("!!bad name!!", &ctx).unwrap_err();
        let index_after_first = session.field_index();
        let answers_after_first = session.answers().to_vec();
        let second = session.submit("!!bad name!!", &ctx).unwrap_err();

        assert_eq!(first, second);
        assert_eq!(session.field_index(), index_after_first);
        assert_eq!(session.answers(), answers_after_first.as_slice());
        let SessionError::Retry(message) = first;
        assert!(message.contains("Names"));
        assert!(message.contains("Please enter the person's name."));
    }

    #[test]
    fn skip_sentinel_is_literal_at_non_skippable_fields() {
        let records = vec![person("John Doe")];
        let ctx = SessionContext::new(&records);
        let mut session = Session::new();
        session.begin("schedule", &ctx).unwrap();
        submit_ok(&mut session, &ctx, "1");

        // The date field is not skip-eligible, so // must validate as input
        // and fail.
        assert!(session.submit("//", &ctx).is_err());
        assert_eq!(session.field_index(), Some(1));
    }

    #[test]
    fn plain_retreat_steps_back_one_field() {
        let records = vec![];
        let ctx = SessionContext::new(&records);
        let mut session = Session::new();
        session.begin("add", &ctx).unwrap();
        submit_ok(&mut session, &ctx, "patient");
        submit_ok(&mut session, &ctx, "John Doe");
        assert_eq!(session.field_index(), Some(2));

        let prompt = session.retreat(&ctx);
        assert!(prompt.contains("name"));
        assert_eq!(session.field_index(), Some(1));
        assert_eq!(session.answers(), ["patient"]);

        submit_ok(&mut session, &ctx, "Jane Roe");
        assert_eq!(session.answers(), ["patient", "Jane Roe"]);
    }

    #[test]
    fn edit_branching_skips_unselected_fields() {
        let records = vec![person("John Doe")];
        let ctx = SessionContext::new(&records);
        let mut session = Session::new();
        session.begin("edit", &ctx).unwrap();

        submit_ok(&mut session, &ctx, "1");
        // Select name (1) and email (3); entry order must not matter.
        let turn = submit_ok(&mut session, &ctx, "3 1");
        match turn {
            Turn::Prompt(p) => assert!(p.contains("updated name"), "got: {}", p),
            other => panic!("expected the name prompt, got {:?}", other),
        }

        let turn = submit_ok(&mut session, &ctx, "John Roe");
        match turn {
            Turn::Prompt(p) => assert!(p.contains("updated email"), "got: {}", p),
            other => panic!("expected the email prompt, got {:?}", other),
        }
        // Phone (absolute index 3) was padded with an empty placeholder.
        assert_eq!(session.answers(), ["1", "1 3", "John Roe", ""]);

        let done = submit_ok(&mut session, &ctx, "roe@example.com");
        assert_eq!(
            done,
            Turn::Completed("edit 1 n/John Roe e/roe@example.com".to_string())
        );
    }

    #[test]
    fn edit_empty_selection_completes_immediately() {
        let records = vec![person("John Doe")];
        let ctx = SessionContext::new(&records);
        let mut session = Session::new();
        session.begin("edit", &ctx).unwrap();
        submit_ok(&mut session, &ctx, "1");
        let done = submit_ok(&mut session, &ctx, "//");
        assert_eq!(done, Turn::Completed("edit 1".to_string()));
        assert!(!session.is_active());
    }

    #[test]
    fn edit_selection_rejects_duplicates_and_out_of_range() {
        let records = vec![person("John Doe")];
        let ctx = SessionContext::new(&records);
        let mut session = Session::new();
        session.begin("edit", &ctx).unwrap();
        submit_ok(&mut session, &ctx, "1");

        let err = session.submit("2 2", &ctx).unwrap_err();
        let SessionError::Retry(message) = err;
        assert!(message.contains("between 1 and 5"));
        assert!(session.submit("7", &ctx).is_err());
        assert_eq!(session.field_index(), Some(1));
    }

    #[test]
    fn edit_clear_tags_sentinel_serializes_bare_flag() {
        let records = vec![person("John Doe")];
        let ctx = SessionContext::new(&records);
        let mut session = Session::new();
        session.begin("edit", &ctx).unwrap();
        submit_ok(&mut session, &ctx, "1");
        submit_ok(&mut session, &ctx, "5");
        let done = submit_ok(&mut session, &ctx, "--");
        assert_eq!(done, Turn::Completed("edit 1 t/".to_string()));
    }

    #[test]
    fn edit_retreat_from_branch_collapses_to_selection() {
        let records = vec![person("John Doe")];
        let ctx = SessionContext::new(&records);
        let mut session = Session::new();
        session.begin("edit", &ctx).unwrap();
        submit_ok(&mut session, &ctx, "1");
        submit_ok(&mut session, &ctx, "1 3");
        submit_ok(&mut session, &ctx, "John Roe");
        // Mid-branch: currently at the email field.
        assert_eq!(session.field_index(), Some(4));

        let prompt = session.retreat(&ctx);
        assert!(prompt.contains("fields you would like to edit"), "got: {}", prompt);
        assert_eq!(session.field_index(), Some(1));
        // The branch and all branch answers are gone; only the target index
        // survives.
        assert_eq!(session.answers(), ["1"]);

        // A fresh selection starts over cleanly.
        let turn = submit_ok(&mut session, &ctx, "2");
        match turn {
            Turn::Prompt(p) => assert!(p.contains("updated phone"), "got: {}", p),
            other => panic!("expected the phone prompt, got {:?}", other),
        }
        let done = submit_ok(&mut session, &ctx, "99998888");
        assert_eq!(done, Turn::Completed("edit 1 p/99998888".to_string()));
    }

    #[test]
    fn find_empty_selection_serializes_bare_find() {
        let records = vec![];
        let ctx = SessionContext::new(&records);
        let mut session = Session::new();
        session.begin("find", &ctx).unwrap();
        let done = submit_ok(&mut session, &ctx, "//");
        assert_eq!(done, Turn::Completed("find".to_string()));
    }

    #[test]
    fn find_collects_selected_categories_in_order() {
        let records = vec![];
        let ctx = SessionContext::new(&records);
        let mut session = Session::new();
        session.begin("find", &ctx).unwrap();

        submit_ok(&mut session, &ctx, "1 6");
        submit_ok(&mut session, &ctx, "alice bob");
        let done = submit_ok(&mut session, &ctx, "diabetic");
        assert_eq!(done, Turn::Completed("find alice bob t/diabetic".to_string()));
    }

    #[test]
    fn schedule_end_time_cross_validation() {
        let records = vec![person("John Doe")];
        let ctx = SessionContext::new(&records);
        let mut session = Session::new();
        session.begin("schedule", &ctx).unwrap();

        submit_ok(&mut session, &ctx, "1");
        submit_ok(&mut session, &ctx, "22.11.2018");
        submit_ok(&mut session, &ctx, "1400");

        let err = session.submit("1300", &ctx).unwrap_err();
        let SessionError::Retry(message) = err;
        // The rejection names the accepted start time.
        assert!(message.contains("1400"));
        assert_eq!(session.answers().len(), 3);

        submit_ok(&mut session, &ctx, "1500");
        assert_eq!(session.answers().len(), 4);
        assert_eq!(session.answers()[3], "1500");
        assert_eq!(session.field_index(), Some(4));
    }

    #[test]
    fn schedule_end_time_rejects_clash_with_existing_booking() {
        let records = vec![person_with_booking()];
        let ctx = SessionContext::new(&records);
        let mut session = Session::new();
        session.begin("schedule", &ctx).unwrap();

        submit_ok(&mut session, &ctx, "1");
        submit_ok(&mut session, &ctx, "22.11.2018");
        submit_ok(&mut session, &ctx, "1330");
        // 1330-1430 overlaps the existing 1300-1400 booking.
        assert!(session.submit("1430", &ctx).is_err());
        // A touching interval is accepted once the start is moved.
        let prompt = session.retreat(&ctx);
        assert!(prompt.contains("start time"));
        submit_ok(&mut session, &ctx, "1400");
        submit_ok(&mut session, &ctx, "1500");
        assert_eq!(session.field_index(), Some(4));
    }

    #[test]
    fn schedule_full_dialogue_serializes_canonically() {
        let records = vec![person("John Doe")];
        let ctx = SessionContext::new(&records);
        let mut session = Session::new();
        session.begin("schedule", &ctx).unwrap();

        for answer in [
            "1",
            "22.11.2018",
            "1300",
            "1400",
            "Amy Lee",
            "S7654321B",
            "John Doe",
            "S1234567A",
        ] {
            submit_ok(&mut session, &ctx, answer);
        }
        assert!(!session.is_active());
    }

    #[test]
    fn update_record_skips_comments() {
        let records = vec![person("John Doe")];
        let ctx = SessionContext::new(&records);
        let mut session = Session::new();
        session.begin("update-record", &ctx).unwrap();

        submit_ok(&mut session, &ctx, "1");
        submit_ok(&mut session, &ctx, "22.11.2018");
        submit_ok(&mut session, &ctx, "Flu");
        submit_ok(&mut session, &ctx, "Rest and fluids");
        let done = submit_ok(&mut session, &ctx, "//");
        assert_eq!(
            done,
            Turn::Completed("update-record 1 d/22.11.2018 dg/Flu tr/Rest and fluids".to_string())
        );
    }

    #[test]
    fn delete_dialogue_has_no_way_back() {
        let records = vec![person("John Doe")];
        let ctx = SessionContext::new(&records);
        let mut session = Session::new();
        session.begin("delete", &ctx).unwrap();
        assert!(!session.can_retreat());

        let done = submit_ok(&mut session, &ctx, "1");
        assert_eq!(done, Turn::Completed("delete 1".to_string()));
    }

    #[test]
    fn cancel_discards_everything() {
        let records = vec![];
        let ctx = SessionContext::new(&records);
        let mut session = Session::new();
        session.begin("add", &ctx).unwrap();
        submit_ok(&mut session, &ctx, "patient");
        session.cancel();
        assert!(!session.is_active());
        assert!(session.answers().is_empty());

        // A new dialogue can start cleanly afterwards.
        assert!(session.begin("find", &ctx).is_some());
    }

    #[test]
    fn unrecognized_word_leaves_engine_idle() {
        let records = vec![];
        let ctx = SessionContext::new(&records);
        let mut session = Session::new();
        assert!(session.begin("frobnicate", &ctx).is_none());
        assert!(!session.is_active());
    }

    #[test]
    #[should_panic(expected = "no session is active")]
    fn submit_while_idle_is_a_contract_violation() {
        let records = vec![];
        let ctx = SessionContext::new(&records);
        let mut session = Session::new();
        let _ = session.submit("anything", &ctx);
    }

    #[test]
    #[should_panic(expected = "not permitted")]
    fn retreat_at_field_zero_is_a_contract_violation() {
        let records = vec![];
        let ctx = SessionContext::new(&records);
        let mut session = Session::new();
        session.begin("add", &ctx).unwrap();
        let _ = session.retreat(&ctx);
    }
}
