use super::CodecResult;
use crate::store::ScheduleStore;
use serde::Serialize;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PasteSummary {
    pub added: usize,
    pub skipped: usize,
}

/// Bulk-add classes from spreadsheet cells copied as tab-separated lines:
/// `name<TAB>instructor<TAB>days<TAB>time`, extra columns ignored.
///
/// Days go through the full free-text parser, so `MWF` works here. Lines that
/// are short or fail validation are skipped and counted.
pub fn import_pasted(text: &str, store: &mut ScheduleStore) -> CodecResult<PasteSummary> {
    let mut reader = ::csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(text.trim().as_bytes());

    let mut summary = PasteSummary::default();
    for record in reader.records() {
        let record = record?;
        if record.len() < 4 {
            debug!(fields = record.len(), "skipped short pasted line");
            summary.skipped += 1;
            continue;
        }
        match store.add_class(&record[0], &record[1], &record[2], &record[3]) {
            Ok(_) => summary.added += 1,
            Err(_) => summary.skipped += 1,
        }
    }

    info!(added = summary.added, skipped = summary.skipped, "pasted classes imported");
    Ok(summary)
}
