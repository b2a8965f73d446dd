// lib/src/command_parser.rs
//! One-shot parser for the single-line command grammar.
//!
//! This is the binding counterpart of the session serializers: every string
//! a finished dialogue reconstructs must parse here to the same logical
//! command the dialogue collected. Any change to the flag grammar has to be
//! mirrored in `session::collect`.

use anyhow::{anyhow, bail, Result};
use std::str::FromStr;

use models::fields::{self, FieldKind};
use models::Role;

use crate::commands::{
    AddArgs, CommandType, EditArgs, FindArgs, ScheduleArgs, UpdateRecordArgs,
};

pub const ADD_USAGE: &str =
    "Usage: add r/ROLE n/NAME p/PHONE e/EMAIL a/ADDRESS [t/TAG]... [i/NRIC | d/DEPARTMENT]";
pub const EDIT_USAGE: &str =
    "Usage: edit INDEX [n/NAME] [p/PHONE] [e/EMAIL] [a/ADDRESS] [t/TAG]...";
pub const FIND_USAGE: &str =
    "Usage: find [KEYWORDS] [n/KEYWORD] [p/KEYWORD] [e/KEYWORD] [a/KEYWORD] [t/KEYWORD]";
pub const DELETE_USAGE: &str = "Usage: delete INDEX";
pub const SCHEDULE_USAGE: &str =
    "Usage: schedule INDEX d/DATE s/START e/END dn/DOCTOR_NAME di/DOCTOR_NRIC pn/PATIENT_NAME pi/PATIENT_NRIC";
pub const UPDATE_RECORD_USAGE: &str =
    "Usage: update-record INDEX d/DATE dg/DIAGNOSIS tr/TREATMENT [c/COMMENTS]";

/// Parse one full input line into a command. `Ok(CommandType::Unknown)` means
/// the first word is not a command at all; an `Err` means the word was
/// recognized but its arguments are malformed.
pub fn parse_line(line: &str) -> Result<CommandType> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(CommandType::Unknown);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };

    match word.to_lowercase().as_str() {
        "add" => parse_add(rest),
        "edit" => parse_edit(rest),
        "find" => parse_find(rest),
        "delete" => parse_delete(rest),
        "schedule" => parse_schedule(rest),
        // `record` is accepted as an alias; canonical output is `update-record`
        "update-record" | "record" => parse_update_record(rest),
        "list" => Ok(CommandType::List),
        "undo" => Ok(CommandType::Undo),
        "redo" => Ok(CommandType::Redo),
        "clear" | "clean" => Ok(CommandType::Clear),
        "help" => Ok(CommandType::Help(if rest.is_empty() {
            None
        } else {
            Some(rest.to_string())
        })),
        "exit" | "quit" | "q" => Ok(CommandType::Exit),
        _ => Ok(CommandType::Unknown),
    }
}

/// The six command words that open an interactive completion session when
/// given with an empty argument tail.
pub fn is_session_trigger(word: &str) -> bool {
    matches!(
        word.to_lowercase().as_str(),
        "add" | "edit" | "find" | "delete" | "schedule" | "update-record"
    )
}

// ---- flag scanning ----

/// A flag occurrence inside the argument tail.
struct FlagHit<'a> {
    prefix: &'a str,
    value: String,
}

/// Scan `rest` for flag prefixes. A prefix only counts at the start of the
/// string or after whitespace, and the longest prefix wins at each boundary
/// (so `dn/` is never read as `d/` followed by `n...`). Returns the preamble
/// before the first flag plus the hits in order of appearance.
fn scan_flags<'a>(rest: &str, prefixes: &[&'a str]) -> (String, Vec<FlagHit<'a>>) {
    let bytes = rest.as_bytes();
    let mut positions: Vec<(usize, &'a str)> = Vec::new();
    for (i, _) in rest.char_indices() {
        if i != 0 && !bytes[i - 1].is_ascii_whitespace() {
            continue;
        }
        let mut best: Option<&'a str> = None;
        for &p in prefixes {
            if rest[i..].starts_with(p) && best.map_or(true, |b| p.len() > b.len()) {
                best = Some(p);
            }
        }
        if let Some(p) = best {
            positions.push((i, p));
        }
    }

    let preamble_end = positions.first().map(|(i, _)| *i).unwrap_or(rest.len());
    let preamble = rest[..preamble_end].trim().to_string();

    let mut hits = Vec::with_capacity(positions.len());
    for (k, &(pos, prefix)) in positions.iter().enumerate() {
        let value_start = pos + prefix.len();
        let value_end = positions
            .get(k + 1)
            .map(|(next, _)| *next)
            .unwrap_or(rest.len());
        hits.push(FlagHit {
            prefix,
            value: rest[value_start..value_end].trim().to_string(),
        });
    }
    (preamble, hits)
}

fn single_value(hits: &[FlagHit], prefix: &str) -> Result<Option<String>> {
    let mut found = None;
    for hit in hits.iter().filter(|h| h.prefix == prefix) {
        if found.is_some() {
            bail!("The {} flag may only appear once.", prefix);
        }
        found = Some(hit.value.clone());
    }
    Ok(found)
}

fn required_value(hits: &[FlagHit], prefix: &str, usage: &str) -> Result<String> {
    single_value(hits, prefix)?
        .filter(|v| !v.is_empty())
        .ok_or_else(|| anyhow!("Missing {}VALUE.\n{}", prefix, usage))
}

fn validated(kind: FieldKind, value: String) -> Result<String> {
    if kind.is_valid(&value) {
        Ok(value)
    } else {
        Err(anyhow!("'{}' is not accepted. {}", value, kind.constraint()))
    }
}

fn parse_target_index(preamble: &str, usage: &str) -> Result<usize> {
    if preamble.is_empty() {
        bail!("Missing target index.\n{}", usage);
    }
    fields::parse_index(preamble).map_err(|e| anyhow!("{}\n{}", e, usage))
}

// ---- per-command parsers ----

fn parse_add(rest: &str) -> Result<CommandType> {
    let prefixes = ["r/", "n/", "p/", "e/", "a/", "t/", "i/", "d/"];
    let (preamble, hits) = scan_flags(rest, &prefixes);
    if !preamble.is_empty() {
        bail!("Unexpected text before the first flag: '{}'.\n{}", preamble, ADD_USAGE);
    }

    let role_raw = required_value(&hits, "r/", ADD_USAGE)?;
    let role = Role::from_str(&role_raw).map_err(|e| anyhow!("{}", e))?;
    let name = validated(FieldKind::Name, required_value(&hits, "n/", ADD_USAGE)?)?;
    let phone = validated(FieldKind::Phone, required_value(&hits, "p/", ADD_USAGE)?)?;
    let email = validated(FieldKind::Email, required_value(&hits, "e/", ADD_USAGE)?)?;
    let address = validated(FieldKind::Address, required_value(&hits, "a/", ADD_USAGE)?)?;

    let mut tags = Vec::new();
    for hit in hits.iter().filter(|h| h.prefix == "t/") {
        if hit.value.is_empty() {
            bail!("Empty t/ flags are not allowed in add; leave tags out instead.");
        }
        tags.push(validated(FieldKind::Tag, hit.value.clone())?);
    }

    let nric = single_value(&hits, "i/")?;
    let department = single_value(&hits, "d/")?;
    let (nric, department) = match role {
        Role::Patient => {
            if department.is_some() {
                bail!("Patients do not take a d/DEPARTMENT flag.\n{}", ADD_USAGE);
            }
            let nric = nric.ok_or_else(|| anyhow!("Missing i/NRIC for a patient.\n{}", ADD_USAGE))?;
            (Some(validated(FieldKind::Nric, nric)?), None)
        }
        Role::Doctor => {
            if nric.is_some() {
                bail!("Doctors do not take an i/NRIC flag.\n{}", ADD_USAGE);
            }
            let department =
                department.ok_or_else(|| anyhow!("Missing d/DEPARTMENT for a doctor.\n{}", ADD_USAGE))?;
            (None, Some(validated(FieldKind::Department, department)?))
        }
    };

    Ok(CommandType::Add(AddArgs {
        role,
        name,
        phone,
        email,
        address,
        tags,
        nric,
        department,
    }))
}

fn parse_edit(rest: &str) -> Result<CommandType> {
    let prefixes = ["n/", "p/", "e/", "a/", "t/"];
    let (preamble, hits) = scan_flags(rest, &prefixes);
    let index = parse_target_index(&preamble, EDIT_USAGE)?;

    let mut args = EditArgs {
        index,
        ..EditArgs::default()
    };
    if let Some(v) = single_value(&hits, "n/")? {
        args.name = Some(validated(FieldKind::Name, v)?);
    }
    if let Some(v) = single_value(&hits, "p/")? {
        args.phone = Some(validated(FieldKind::Phone, v)?);
    }
    if let Some(v) = single_value(&hits, "e/")? {
        args.email = Some(validated(FieldKind::Email, v)?);
    }
    if let Some(v) = single_value(&hits, "a/")? {
        args.address = Some(validated(FieldKind::Address, v)?);
    }

    let tag_hits: Vec<&FlagHit> = hits.iter().filter(|h| h.prefix == "t/").collect();
    if !tag_hits.is_empty() {
        // A single bare t/ clears all tags; otherwise every value must be a tag.
        if tag_hits.len() == 1 && tag_hits[0].value.is_empty() {
            args.tags = Some(Vec::new());
        } else {
            let mut tags = Vec::new();
            for hit in tag_hits {
                if hit.value.is_empty() {
                    bail!("A bare t/ (clear all tags) cannot be mixed with tag values.");
                }
                tags.push(validated(FieldKind::Tag, hit.value.clone())?);
            }
            args.tags = Some(tags);
        }
    }

    Ok(CommandType::Edit(args))
}

fn parse_find(rest: &str) -> Result<CommandType> {
    let prefixes = ["n/", "p/", "e/", "a/", "t/"];
    let (preamble, hits) = scan_flags(rest, &prefixes);

    let args = FindArgs {
        global: if preamble.is_empty() {
            None
        } else {
            Some(preamble)
        },
        name: single_value(&hits, "n/")?.filter(|v| !v.is_empty()),
        phone: single_value(&hits, "p/")?.filter(|v| !v.is_empty()),
        email: single_value(&hits, "e/")?.filter(|v| !v.is_empty()),
        address: single_value(&hits, "a/")?.filter(|v| !v.is_empty()),
        tag: single_value(&hits, "t/")?.filter(|v| !v.is_empty()),
    };
    Ok(CommandType::Find(args))
}

fn parse_delete(rest: &str) -> Result<CommandType> {
    let index = parse_target_index(rest, DELETE_USAGE)?;
    Ok(CommandType::Delete { index })
}

fn parse_schedule(rest: &str) -> Result<CommandType> {
    let prefixes = ["d/", "s/", "e/", "dn/", "di/", "pn/", "pi/"];
    let (preamble, hits) = scan_flags(rest, &prefixes);
    let index = parse_target_index(&preamble, SCHEDULE_USAGE)?;

    let date = fields::parse_date(&required_value(&hits, "d/", SCHEDULE_USAGE)?)
        .map_err(|e| anyhow!("{}", e))?;
    let start = fields::parse_time(&required_value(&hits, "s/", SCHEDULE_USAGE)?)
        .map_err(|e| anyhow!("{}", e))?;
    let end = fields::parse_time(&required_value(&hits, "e/", SCHEDULE_USAGE)?)
        .map_err(|e| anyhow!("{}", e))?;
    if end <= start {
        bail!(
            "The end time {} must be strictly after the start time {}.",
            end.format("%H%M"),
            start.format("%H%M")
        );
    }

    let doctor_name = validated(FieldKind::Name, required_value(&hits, "dn/", SCHEDULE_USAGE)?)?;
    let doctor_nric = validated(FieldKind::Nric, required_value(&hits, "di/", SCHEDULE_USAGE)?)?;
    let patient_name = validated(FieldKind::Name, required_value(&hits, "pn/", SCHEDULE_USAGE)?)?;
    let patient_nric = validated(FieldKind::Nric, required_value(&hits, "pi/", SCHEDULE_USAGE)?)?;

    Ok(CommandType::Schedule(ScheduleArgs {
        index,
        date,
        start,
        end,
        doctor_name,
        doctor_nric,
        patient_name,
        patient_nric,
    }))
}

fn parse_update_record(rest: &str) -> Result<CommandType> {
    let prefixes = ["d/", "dg/", "tr/", "c/"];
    let (preamble, hits) = scan_flags(rest, &prefixes);
    let index = parse_target_index(&preamble, UPDATE_RECORD_USAGE)?;

    let date = fields::parse_date(&required_value(&hits, "d/", UPDATE_RECORD_USAGE)?)
        .map_err(|e| anyhow!("{}", e))?;
    let diagnosis = validated(
        FieldKind::Diagnosis,
        required_value(&hits, "dg/", UPDATE_RECORD_USAGE)?,
    )?;
    let treatment = validated(
        FieldKind::Treatment,
        required_value(&hits, "tr/", UPDATE_RECORD_USAGE)?,
    )?;
    let comments = single_value(&hits, "c/")?.filter(|v| !v.is_empty());

    Ok(CommandType::UpdateRecord(UpdateRecordArgs {
        index,
        date,
        diagnosis,
        treatment,
        comments,
    }))
}
