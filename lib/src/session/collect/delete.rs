// lib/src/session/collect/delete.rs
//! The `delete` dialogue: a single target-index field, no skipping and no
//! way back.

use super::SessionContext;

pub const TOTAL_FIELDS: usize = 1;

const INDEX: usize = 0;

pub fn prompt(index: usize, ctx: &SessionContext) -> String {
    match index {
        INDEX => format!(
            "Please enter the index of the record you would like to delete (1-{}).",
            ctx.record_count().max(1)
        ),
        _ => unreachable!("delete dialogue has {} field", TOTAL_FIELDS),
    }
}

pub fn is_valid(ctx: &SessionContext, index: usize, candidate: &str) -> bool {
    match index {
        INDEX => super::index_is_valid(ctx, candidate),
        _ => unreachable!("delete dialogue has {} field", TOTAL_FIELDS),
    }
}

pub fn constraint(ctx: &SessionContext, index: usize) -> String {
    match index {
        INDEX => super::index_constraint(ctx),
        _ => unreachable!("delete dialogue has {} field", TOTAL_FIELDS),
    }
}

pub fn is_skippable(_index: usize) -> bool {
    false
}

pub fn serialize(answers: &[String]) -> String {
    format!("delete {}", answers[INDEX])
}
