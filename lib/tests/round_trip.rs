// lib/tests/round_trip.rs
//! The binding compatibility contract: the canonical command string a
//! completed dialogue reconstructs must parse to the same logical command
//! through the one-shot parser.

use chrono::{NaiveDate, NaiveTime};
use lib::command_parser;
use lib::commands::{
    AddArgs, CommandType, EditArgs, FindArgs, ScheduleArgs, UpdateRecordArgs,
};
use lib::session::{Session, SessionContext, Turn};
use models::{Person, Role};

fn sample_records() -> Vec<Person> {
    vec![
        Person::new(
            Role::Patient,
            "John Doe".to_string(),
            "91234567".to_string(),
            "john@example.com".to_string(),
            "1 Clinic Way".to_string(),
            vec!["diabetic".to_string()],
            Some("S1234567A".to_string()),
            None,
        ),
        Person::new(
            Role::Doctor,
            "Amy Lee".to_string(),
            "98765432".to_string(),
            "amy@clinic.example".to_string(),
            "2 Clinic Way".to_string(),
            vec![],
            None,
            Some("Cardiology".to_string()),
        ),
    ]
}

/// Drive a full dialogue and return the reconstructed command line.
fn complete_dialogue(trigger: &str, answers: &[&str], records: &[Person]) -> String {
    let ctx = SessionContext::new(records);
    let mut session = Session::new();
    session
        .begin(trigger, &ctx)
        .unwrap_or_else(|| panic!("'{}' should open a session", trigger));

    for (i, answer) in answers.iter().enumerate() {
        match session.submit(answer, &ctx).expect("answer should be accepted") {
            Turn::Completed(command) => {
                assert_eq!(i, answers.len() - 1, "dialogue completed early at answer {}", i);
                return command;
            }
            Turn::Prompt(_) => {
                assert!(i < answers.len() - 1, "dialogue did not complete on the last answer");
            }
        }
    }
    unreachable!("dialogue never completed");
}

#[test]
fn add_patient_round_trips() {
    let records = sample_records();
    let command = complete_dialogue(
        "add",
        &[
            "patient",
            "Max Mole",
            "93121534",
            "max@example.com",
            "44 Kent Ridge Rd",
            "diabetic, followup",
            "S7000007C",
        ],
        &records,
    );
    assert_eq!(
        command_parser::parse_line(&command).unwrap(),
        CommandType::Add(AddArgs {
            role: Role::Patient,
            name: "Max Mole".to_string(),
            phone: "93121534".to_string(),
            email: "max@example.com".to_string(),
            address: "44 Kent Ridge Rd".to_string(),
            tags: vec!["diabetic".to_string(), "followup".to_string()],
            nric: Some("S7000007C".to_string()),
            department: None,
        })
    );
}

#[test]
fn add_doctor_with_skipped_tags_round_trips() {
    let records = sample_records();
    let command = complete_dialogue(
        "add",
        &[
            "doctor",
            "Ben Low",
            "91112222",
            "ben@clinic.example",
            "3 Clinic Way",
            "//",
            "Neurology",
        ],
        &records,
    );
    assert_eq!(
        command_parser::parse_line(&command).unwrap(),
        CommandType::Add(AddArgs {
            role: Role::Doctor,
            name: "Ben Low".to_string(),
            phone: "91112222".to_string(),
            email: "ben@clinic.example".to_string(),
            address: "3 Clinic Way".to_string(),
            tags: vec![],
            nric: None,
            department: Some("Neurology".to_string()),
        })
    );
}

#[test]
fn edit_selection_round_trips() {
    let records = sample_records();
    // Select phone (2) and tags (5); clear the tags.
    let command = complete_dialogue("edit", &["1", "2 5", "99998888", "--"], &records);
    assert_eq!(command, "edit 1 p/99998888 t/");
    assert_eq!(
        command_parser::parse_line(&command).unwrap(),
        CommandType::Edit(EditArgs {
            index: 1,
            phone: Some("99998888".to_string()),
            tags: Some(vec![]),
            ..EditArgs::default()
        })
    );
}

#[test]
fn edit_with_new_tags_round_trips() {
    let records = sample_records();
    let command = complete_dialogue("edit", &["2", "5", "oncall, senior"], &records);
    assert_eq!(command, "edit 2 t/oncall t/senior");
    assert_eq!(
        command_parser::parse_line(&command).unwrap(),
        CommandType::Edit(EditArgs {
            index: 2,
            tags: Some(vec!["oncall".to_string(), "senior".to_string()]),
            ..EditArgs::default()
        })
    );
}

#[test]
fn find_round_trips() {
    let records = sample_records();
    let command = complete_dialogue("find", &["1 2", "kent ridge", "doe"], &records);
    assert_eq!(command, "find kent ridge n/doe");
    assert_eq!(
        command_parser::parse_line(&command).unwrap(),
        CommandType::Find(FindArgs {
            global: Some("kent ridge".to_string()),
            name: Some("doe".to_string()),
            ..FindArgs::default()
        })
    );
}

#[test]
fn empty_find_round_trips_to_bare_global_search() {
    let records = sample_records();
    let command = complete_dialogue("find", &["//"], &records);
    assert_eq!(command, "find");
    assert_eq!(
        command_parser::parse_line(&command).unwrap(),
        CommandType::Find(FindArgs::default())
    );
}

#[test]
fn delete_round_trips() {
    let records = sample_records();
    let command = complete_dialogue("delete", &["2"], &records);
    assert_eq!(
        command_parser::parse_line(&command).unwrap(),
        CommandType::Delete { index: 2 }
    );
}

#[test]
fn schedule_round_trips() {
    let records = sample_records();
    let command = complete_dialogue(
        "schedule",
        &[
            "1",
            "22.11.2018",
            "1300",
            "1400",
            "Amy Lee",
            "S7654321B",
            "John Doe",
            "S1234567A",
        ],
        &records,
    );
    assert_eq!(
        command_parser::parse_line(&command).unwrap(),
        CommandType::Schedule(ScheduleArgs {
            index: 1,
            date: NaiveDate::from_ymd_opt(2018, 11, 22).unwrap(),
            start: NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            doctor_name: "Amy Lee".to_string(),
            doctor_nric: "S7654321B".to_string(),
            patient_name: "John Doe".to_string(),
            patient_nric: "S1234567A".to_string(),
        })
    );
}

#[test]
fn update_record_round_trips() {
    let records = sample_records();
    let command = complete_dialogue(
        "update-record",
        &["1", "22.11.2018", "Influenza A", "Rest and fluids", "follow up in two weeks"],
        &records,
    );
    assert_eq!(
        command_parser::parse_line(&command).unwrap(),
        CommandType::UpdateRecord(UpdateRecordArgs {
            index: 1,
            date: NaiveDate::from_ymd_opt(2018, 11, 22).unwrap(),
            diagnosis: "Influenza A".to_string(),
            treatment: "Rest and fluids".to_string(),
            comments: Some("follow up in two weeks".to_string()),
        })
    );
}
