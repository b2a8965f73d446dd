// models/src/medical/record_entry.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One consultation entry in a patient's medical record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordEntry {
    pub date: NaiveDate,
    pub diagnosis: String,
    pub treatment: String,
    pub comments: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

impl RecordEntry {
    pub fn new(
        date: NaiveDate,
        diagnosis: String,
        treatment: String,
        comments: Option<String>,
    ) -> Self {
        RecordEntry {
            date,
            diagnosis,
            treatment,
            comments,
            recorded_at: Utc::now(),
        }
    }

    pub fn summary(&self) -> String {
        let comments = self
            .comments
            .as_deref()
            .map(|c| format!(" Comments: {}", c))
            .unwrap_or_default();
        format!(
            "{} Diagnosis: {} Treatment: {}{}",
            self.date.format("%d.%m.%Y"),
            self.diagnosis,
            self.treatment,
            comments
        )
    }
}
