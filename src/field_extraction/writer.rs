use std::fs;
use std::path::Path;

use csv::{Terminator, WriterBuilder};
use log::info;

use super::types::{FieldRecord, FIELD_NAMES};
use crate::error_handling::types::ExtractError;

/// Writes the records as a pretty-printed JSON array (two-space indent).
pub fn write_json(path: &Path, records: &[FieldRecord]) -> Result<(), ExtractError> {
    let body = serde_json::to_string_pretty(records)?;
    fs::write(path, body)?;
    info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Writes a CSV file: header row first, then one row per record.
///
/// The header is written even when there are no records.
pub fn write_csv(path: &Path, records: &[FieldRecord]) -> Result<(), ExtractError> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::CRLF)
        .from_path(path)?;

    wtr.write_record(FIELD_NAMES)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;

    info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}
