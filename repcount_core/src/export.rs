//! CSV export of the reps a replay produced.

use crate::{RepEvent, Result};
use std::fs::File;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    session_id: String,
    exercise: &'static str,
    timestamp_ms: f64,
    reps: u32,
    sets: u32,
}

impl From<&RepEvent> for CsvRow {
    fn from(event: &RepEvent) -> Self {
        CsvRow {
            session_id: event.session_id.to_string(),
            exercise: event.kind.name(),
            timestamp_ms: event.timestamp_ms,
            reps: event.reps,
            sets: event.sets,
        }
    }
}

/// Write rep events to a fresh CSV file, replacing any existing one
///
/// Returns the number of rows written. The file is synced before returning.
pub fn write_rep_events(path: &Path, events: &[RepEvent]) -> Result<usize> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(file);

    for event in events {
        writer.serialize(CsvRow::from(event))?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.sync_all()?;

    tracing::info!("Wrote {} rep events to {:?}", events.len(), path);
    Ok(events.len())
}
