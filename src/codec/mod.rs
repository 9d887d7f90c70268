use crate::store::{ScheduleStore, ValidationError};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

pub mod csv;
pub mod paste;

pub use self::csv::{HEADER, decode, encode, split_row};
pub use paste::{PasteSummary, import_pasted};

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] ::csv::Error),
}

pub type CodecResult<T> = Result<T, CodecError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowErrorKind {
    #[error("Insufficient data")]
    InsufficientData,
    #[error("Unknown type \"{0}\"")]
    UnknownType(String),
    #[error("Invalid class data ({0})")]
    InvalidClass(ValidationError),
    #[error("Invalid work data ({0})")]
    InvalidWork(ValidationError),
}

/// A rejected import row. `row` counts the header as row 1.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Row {row}: {kind}")]
pub struct RowError {
    pub row: usize,
    pub kind: RowErrorKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub added_classes: usize,
    pub added_work: usize,
    /// Data rows seen after the header; zero for an empty or header-only file.
    pub rows_read: usize,
    #[serde(serialize_with = "serialize_errors")]
    pub errors: Vec<RowError>,
}

fn serialize_errors<S>(errors: &[RowError], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(errors.iter().map(ToString::to_string))
}

impl ImportSummary {
    pub fn added(&self) -> usize {
        self.added_classes + self.added_work
    }

    /// Multi-line report listing at most `max_errors` row errors.
    pub fn report(&self, max_errors: usize) -> String {
        let mut out = String::from("Import completed!\n");
        out.push_str(&format!("Classes added: {}\n", self.added_classes));
        out.push_str(&format!("Work sessions added: {}", self.added_work));

        if !self.errors.is_empty() {
            let shown = self
                .errors
                .iter()
                .take(max_errors)
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n");
            out.push_str(&format!("\n\nErrors encountered:\n{shown}"));
            if self.errors.len() > max_errors {
                out.push_str(&format!(
                    "\n... and {} more errors",
                    self.errors.len() - max_errors
                ));
            }
        }
        out
    }
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "classes={}, work={}, errors={}",
            self.added_classes,
            self.added_work,
            self.errors.len()
        )
    }
}

/// Default download name, e.g. `schedule_2025-01-06.csv`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("schedule_{}.csv", date.format("%Y-%m-%d"))
}

pub fn export_to_path<P: AsRef<Path>>(store: &ScheduleStore, path: P) -> CodecResult<()> {
    fs::write(path, encode(store))?;
    Ok(())
}

pub fn import_from_path<P: AsRef<Path>>(
    store: &mut ScheduleStore,
    path: P,
) -> CodecResult<ImportSummary> {
    let text = fs::read_to_string(path)?;
    Ok(decode(&text, store))
}
