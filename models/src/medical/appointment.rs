// models/src/medical/appointment.rs

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A booked (or candidate) appointment interval.
///
/// The start/end ordering invariant is enforced by callers, not here: the
/// interactive schedule dialogue has to reject a bad end time on the turn it
/// is typed, before a complete value could exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub doctor_name: String,
    pub doctor_nric: String,
    pub patient_name: String,
    pub patient_nric: String,
}

impl Appointment {
    /// True when any identity field is still a blank placeholder, as happens
    /// for candidates built mid-dialogue. Placeholder entries are never
    /// counted as bookings.
    pub fn is_placeholder(&self) -> bool {
        self.doctor_name.trim().is_empty()
            && self.doctor_nric.trim().is_empty()
            && self.patient_name.trim().is_empty()
            && self.patient_nric.trim().is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} {}-{} with Dr {} ({}) for {} ({})",
            self.date.format("%d.%m.%Y"),
            self.start.format("%H%M"),
            self.end.format("%H%M"),
            self.doctor_name,
            self.doctor_nric,
            self.patient_name,
            self.patient_nric
        )
    }
}
