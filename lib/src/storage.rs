// lib/src/storage.rs
//! JSON persistence for the record list.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};

use models::Person;

/// Load the record list from `path`. A missing file is an empty store, not
/// an error; a corrupt file is.
pub fn load_records(path: &Path) -> Result<Vec<Person>> {
    if !path.exists() {
        info!("no data file at {}; starting empty", path.display());
        return Ok(Vec::new());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file {}", path.display()))?;
    if raw.trim().is_empty() {
        warn!("data file {} is empty; starting empty", path.display());
        return Ok(Vec::new());
    }
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse data file {}", path.display()))
}

/// Persist the record list to `path` as pretty JSON, creating parent
/// directories as needed.
pub fn save_records(path: &Path, persons: &[Person]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    let raw = serde_json::to_string_pretty(persons).context("Failed to serialize records")?;
    fs::write(path, raw)
        .with_context(|| format!("Failed to write data file {}", path.display()))?;
    info!("saved {} record(s) to {}", persons.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::{Person, Role};

    #[test]
    fn should_round_trip_records_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");

        let persons = vec![Person::new(
            Role::Doctor,
            "Amy Lee".to_string(),
            "91234567".to_string(),
            "amy@clinic.example".to_string(),
            "1 Clinic Way".to_string(),
            vec!["oncall".to_string()],
            None,
            Some("Cardiology".to_string()),
        )];
        save_records(&path, &persons).unwrap();

        let loaded = load_records(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Amy Lee");
        assert_eq!(loaded[0].department.as_deref(), Some("Cardiology"));
    }

    #[test]
    fn should_start_empty_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_records(&dir.path().join("absent.json")).unwrap();
        assert!(loaded.is_empty());
    }
}
