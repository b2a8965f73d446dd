// lib/src/conflict.rs
//! Appointment interval-conflict detection.
//!
//! Pure decision procedure with no hidden state: the same functions serve
//! the one-shot `schedule` executor and the interactive schedule dialogue's
//! end-time validation.

use chrono::NaiveTime;
use models::Appointment;

/// Interval ordering rule: an interval is well-formed when its start is
/// strictly before its end. Reused on two candidate times by the schedule
/// dialogue before a full interval exists.
pub fn is_valid_interval(start: NaiveTime, end: NaiveTime) -> bool {
    start < end
}

/// Half-open overlap of two time ranges on the same date. Touching
/// endpoints (one booking ending exactly when another starts) do not count
/// as overlap.
pub fn times_overlap(
    start_a: NaiveTime,
    end_a: NaiveTime,
    start_b: NaiveTime,
    end_b: NaiveTime,
) -> bool {
    start_a < end_b && start_b < end_a
}

/// Whether `candidate` clashes with any booking in `existing`.
///
/// An existing interval conflicts iff it shares the candidate's date and its
/// time range overlaps under half-open semantics. Entries are skipped when
/// they are blank placeholders, or when the candidate names a doctor and the
/// entry belongs to a different one. A candidate with an empty doctor NRIC
/// (as built mid-dialogue, before the doctor fields are collected) is
/// checked against every booking in the list.
pub fn conflicts_with_any(candidate: &Appointment, existing: &[Appointment]) -> bool {
    existing.iter().any(|booked| {
        if booked.is_placeholder() {
            return false;
        }
        if !candidate.doctor_nric.trim().is_empty()
            && !booked
                .doctor_nric
                .trim()
                .eq_ignore_ascii_case(candidate.doctor_nric.trim())
        {
            return false;
        }
        booked.date == candidate.date
            && times_overlap(candidate.start, candidate.end, booked.start, booked.end)
    })
}
