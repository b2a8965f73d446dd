// lib/src/session/collect/schedule.rs
//! The `schedule` dialogue: eight fixed fields. The end-time step performs
//! cross-field validation against the accepted start time and the target
//! record's existing bookings, so a clash is rejected on the turn it is
//! typed rather than after the whole dialogue.

use models::fields::{self, FieldKind};
use models::Appointment;

use super::SessionContext;
use crate::conflict;

pub const TOTAL_FIELDS: usize = 8;

const INDEX: usize = 0;
const DATE: usize = 1;
const START: usize = 2;
const END: usize = 3;
const DOCTOR_NAME: usize = 4;
const DOCTOR_NRIC: usize = 5;
const PATIENT_NAME: usize = 6;
const PATIENT_NRIC: usize = 7;

pub fn prompt(index: usize, ctx: &SessionContext) -> String {
    match index {
        INDEX => format!(
            "Please enter the index of the record to book the appointment under (1-{}).",
            ctx.record_count().max(1)
        ),
        DATE => "Please enter the appointment date (dd.MM.yyyy).".to_string(),
        START => "Please enter the start time (HHmm).".to_string(),
        END => "Please enter the end time (HHmm).".to_string(),
        DOCTOR_NAME => "Please enter the doctor's name.".to_string(),
        DOCTOR_NRIC => "Please enter the doctor's NRIC.".to_string(),
        PATIENT_NAME => "Please enter the patient's name.".to_string(),
        PATIENT_NRIC => "Please enter the patient's NRIC.".to_string(),
        _ => unreachable!("schedule dialogue has {} fields", TOTAL_FIELDS),
    }
}

/// The candidate interval as known at the end-time step: identities are
/// still blank, so the conflict check runs against every booking on the
/// target record.
fn candidate_interval(answers: &[String], end_raw: &str) -> Option<Appointment> {
    Some(Appointment {
        date: fields::parse_date(&answers[DATE]).ok()?,
        start: fields::parse_time(&answers[START]).ok()?,
        end: fields::parse_time(end_raw).ok()?,
        doctor_name: String::new(),
        doctor_nric: String::new(),
        patient_name: String::new(),
        patient_nric: String::new(),
    })
}

pub fn is_valid(ctx: &SessionContext, answers: &[String], index: usize, candidate: &str) -> bool {
    match index {
        INDEX => super::index_is_valid(ctx, candidate),
        DATE => FieldKind::Date.is_valid(candidate),
        START => FieldKind::Time.is_valid(candidate),
        END => {
            if !FieldKind::Time.is_valid(candidate) {
                return false;
            }
            let interval = match candidate_interval(answers, candidate) {
                Some(i) => i,
                None => return false,
            };
            if !conflict::is_valid_interval(interval.start, interval.end) {
                return false;
            }
            match ctx.appointments_of(&answers[INDEX]) {
                Some(existing) => !conflict::conflicts_with_any(&interval, existing),
                None => false,
            }
        }
        DOCTOR_NAME | PATIENT_NAME => FieldKind::Name.is_valid(candidate),
        DOCTOR_NRIC | PATIENT_NRIC => FieldKind::Nric.is_valid(candidate),
        _ => unreachable!("schedule dialogue has {} fields", TOTAL_FIELDS),
    }
}

pub fn constraint(ctx: &SessionContext, answers: &[String], index: usize) -> String {
    match index {
        INDEX => super::index_constraint(ctx),
        DATE => FieldKind::Date.constraint().to_string(),
        START => FieldKind::Time.constraint().to_string(),
        END => format!(
            "The end time must use the 24-hour HHmm format, be strictly after the start time {} and must not clash with one of the record's existing appointments.",
            answers[START]
        ),
        DOCTOR_NAME | PATIENT_NAME => FieldKind::Name.constraint().to_string(),
        DOCTOR_NRIC | PATIENT_NRIC => FieldKind::Nric.constraint().to_string(),
        _ => unreachable!("schedule dialogue has {} fields", TOTAL_FIELDS),
    }
}

pub fn is_skippable(_index: usize) -> bool {
    false
}

pub fn serialize(answers: &[String]) -> String {
    format!(
        "schedule {} d/{} s/{} e/{} dn/{} di/{} pn/{} pi/{}",
        answers[INDEX],
        answers[DATE],
        answers[START],
        answers[END],
        answers[DOCTOR_NAME],
        answers[DOCTOR_NRIC],
        answers[PATIENT_NAME],
        answers[PATIENT_NRIC]
    )
}
