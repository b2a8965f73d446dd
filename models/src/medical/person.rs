// models/src/medical/person.rs

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ValidationError;
use crate::medical::{Appointment, RecordEntry};

/// Whether a clinic record belongs to a patient or a doctor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Doctor,
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "patient" => Ok(Role::Patient),
            "doctor" => Ok(Role::Doctor),
            other => Err(ValidationError::UnknownRole(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Patient => write!(f, "patient"),
            Role::Doctor => write!(f, "doctor"),
        }
    }
}

/// A single clinic record. Patients carry an NRIC, doctors a department.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: Uuid,
    pub role: Role,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub tags: Vec<String>,
    pub nric: Option<String>,
    pub department: Option<String>,
    pub appointments: Vec<Appointment>,
    pub records: Vec<RecordEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Person {
    pub fn new(
        role: Role,
        name: String,
        phone: String,
        email: String,
        address: String,
        tags: Vec<String>,
        nric: Option<String>,
        department: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Person {
            id: Uuid::new_v4(),
            role,
            name,
            phone,
            email,
            address,
            tags,
            nric,
            department,
            appointments: Vec::new(),
            records: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Case-insensitive duplicate check: same NRIC, or same name and phone.
    pub fn is_same_person(&self, other: &Person) -> bool {
        if let (Some(a), Some(b)) = (&self.nric, &other.nric) {
            if a.eq_ignore_ascii_case(b) {
                return true;
            }
        }
        self.name.eq_ignore_ascii_case(&other.name) && self.phone == other.phone
    }

    /// One-line summary used by list and find output.
    pub fn summary(&self) -> String {
        let extra = match self.role {
            Role::Patient => self
                .nric
                .as_deref()
                .map(|n| format!(" NRIC: {}", n))
                .unwrap_or_default(),
            Role::Doctor => self
                .department
                .as_deref()
                .map(|d| format!(" Department: {}", d))
                .unwrap_or_default(),
        };
        let tags = if self.tags.is_empty() {
            String::new()
        } else {
            format!(" Tags: [{}]", self.tags.join(", "))
        };
        format!(
            "{} ({}) Phone: {} Email: {} Address: {}{}{}",
            self.name, self.role, self.phone, self.email, self.address, extra, tags
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient(name: &str, phone: &str, nric: Option<&str>) -> Person {
        Person::new(
            Role::Patient,
            name.to_string(),
            phone.to_string(),
            "a@b.com".to_string(),
            "1 Clinic Way".to_string(),
            vec![],
            nric.map(|s| s.to_string()),
            None,
        )
    }

    #[test]
    fn should_parse_roles_case_insensitively() {
        assert_eq!(Role::from_str("Patient").unwrap(), Role::Patient);
        assert_eq!(Role::from_str("DOCTOR").unwrap(), Role::Doctor);
        assert!(Role::from_str("nurse").is_err());
    }

    #[test]
    fn should_detect_duplicates_by_nric_or_name_and_phone() {
        let a = patient("John Doe", "911", Some("S1234567A"));
        let b = patient("Jane Roe", "922", Some("s1234567a"));
        let c = patient("john doe", "911", None);
        let d = patient("John Doe", "933", None);
        assert!(a.is_same_person(&b));
        assert!(a.is_same_person(&c));
        assert!(!a.is_same_person(&d));
    }
}
