//! The `Type,Title,Description,Days,Time,Color` exchange format.
//!
//! Rows are split by hand rather than through a CSV reader: exports quote every
//! free-text field, imports trim each field after unquoting, and a row with
//! stray quotes still yields fields instead of an error.

use super::{ImportSummary, RowError, RowErrorKind};
use crate::store::ScheduleStore;
use crate::weekday::day_name;
use tracing::{info, warn};

pub const HEADER: &str = "Type,Title,Description,Days,Time,Color";

const CLASS_COLOR: &str = "blue";
const WORK_COLOR: &str = "green";

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Serialize every entry, classes first. Lines are joined with `\n` and the
/// last row has no terminator.
pub fn encode(store: &ScheduleStore) -> String {
    let mut rows = vec![HEADER.to_string()];

    for class in store.classes() {
        let days = class
            .days
            .iter()
            .map(|day| day_name(*day))
            .collect::<Vec<_>>()
            .join(", ");
        rows.push(
            [
                "class".to_string(),
                quote(&class.name),
                quote(&class.instructor),
                quote(&days),
                quote(&class.time),
                CLASS_COLOR.to_string(),
            ]
            .join(","),
        );
    }

    for session in store.work_sessions() {
        rows.push(
            [
                "work".to_string(),
                "WORK".to_string(),
                quote(&session.location),
                quote(day_name(session.day)),
                quote(&session.time),
                WORK_COLOR.to_string(),
            ]
            .join(","),
        );
    }

    rows.join("\n")
}

/// Split one line into trimmed fields. Inside quotes a comma is literal and
/// `""` stands for one `"`.
pub fn split_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                current.push('"');
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            other => current.push(other),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

/// Apply every data row of `text` to `store`.
///
/// The first line is the header. A bad row is recorded and skipped; the rows
/// around it are still imported. Empty input or a lone header adds nothing.
pub fn decode(text: &str, store: &mut ScheduleStore) -> ImportSummary {
    let mut summary = ImportSummary::default();
    let lines: Vec<&str> = text.trim().split('\n').collect();
    if lines.len() < 2 {
        warn!("csv import has no data rows");
        return summary;
    }

    for (index, line) in lines.iter().enumerate().skip(1) {
        summary.rows_read += 1;
        let row = index + 1;
        match apply_row(line, store) {
            Ok(RowKind::Class) => summary.added_classes += 1,
            Ok(RowKind::Work) => summary.added_work += 1,
            Err(kind) => {
                let error = RowError { row, kind };
                warn!(%error, "skipped csv row");
                summary.errors.push(error);
            }
        }
    }

    info!(%summary, "csv import finished");
    summary
}

enum RowKind {
    Class,
    Work,
}

fn apply_row(line: &str, store: &mut ScheduleStore) -> Result<RowKind, RowErrorKind> {
    let fields = split_row(line);
    if fields.len() < 5 {
        return Err(RowErrorKind::InsufficientData);
    }
    let (kind, title, description, days, time) =
        (&fields[0], &fields[1], &fields[2], &fields[3], &fields[4]);

    match kind.to_lowercase().as_str() {
        "class" => store
            .add_class_strict(title, description, days, time)
            .map(|_| RowKind::Class)
            .map_err(RowErrorKind::InvalidClass),
        "work" => store
            .add_work_strict(days, time, description)
            .map(|_| RowKind::Work)
            .map_err(RowErrorKind::InvalidWork),
        _ => Err(RowErrorKind::UnknownType(kind.clone())),
    }
}
