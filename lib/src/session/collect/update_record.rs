// lib/src/session/collect/update_record.rs
//! The `update-record` dialogue: five fixed fields, only comments optional.

use models::fields::FieldKind;

use super::SessionContext;

pub const TOTAL_FIELDS: usize = 5;

const INDEX: usize = 0;
const DATE: usize = 1;
const DIAGNOSIS: usize = 2;
const TREATMENT: usize = 3;
const COMMENTS: usize = 4;

pub fn prompt(index: usize, ctx: &SessionContext) -> String {
    match index {
        INDEX => format!(
            "Please enter the index of the patient whose medical record to update (1-{}).",
            ctx.record_count().max(1)
        ),
        DATE => "Please enter the consultation date (dd.MM.yyyy).".to_string(),
        DIAGNOSIS => "Please enter the diagnosis.".to_string(),
        TREATMENT => "Please enter the treatment.".to_string(),
        COMMENTS => "Please enter any comments, or // to skip.".to_string(),
        _ => unreachable!("update-record dialogue has {} fields", TOTAL_FIELDS),
    }
}

pub fn is_valid(ctx: &SessionContext, index: usize, candidate: &str) -> bool {
    match index {
        INDEX => super::index_is_valid(ctx, candidate),
        DATE => FieldKind::Date.is_valid(candidate),
        DIAGNOSIS => FieldKind::Diagnosis.is_valid(candidate),
        TREATMENT => FieldKind::Treatment.is_valid(candidate),
        COMMENTS => FieldKind::Comments.is_valid(candidate),
        _ => unreachable!("update-record dialogue has {} fields", TOTAL_FIELDS),
    }
}

pub fn constraint(ctx: &SessionContext, index: usize) -> String {
    match index {
        INDEX => super::index_constraint(ctx),
        DATE => FieldKind::Date.constraint().to_string(),
        DIAGNOSIS => FieldKind::Diagnosis.constraint().to_string(),
        TREATMENT => FieldKind::Treatment.constraint().to_string(),
        COMMENTS => FieldKind::Comments.constraint().to_string(),
        _ => unreachable!("update-record dialogue has {} fields", TOTAL_FIELDS),
    }
}

pub fn is_skippable(index: usize) -> bool {
    index == COMMENTS
}

pub fn serialize(answers: &[String]) -> String {
    let mut command = format!(
        "update-record {} d/{} dg/{} tr/{}",
        answers[INDEX], answers[DATE], answers[DIAGNOSIS], answers[TREATMENT]
    );
    if !answers[COMMENTS].is_empty() {
        command.push_str(&format!(" c/{}", answers[COMMENTS]));
    }
    command
}
