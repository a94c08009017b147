//! ---
//! sq_section: "11-simulation"
//! sq_subsection: "module"
//! sq_type: "source"
//! sq_scope: "code"
//! sq_description: "CSV ingestion of cumulative sensor readings."
//! sq_version: "v0.1.0"
//! sq_owner: "tbd"
//! ---
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info};

use crate::errors::IngestError;
use crate::readings::{SensorReading, SENSOR_COUNT};

const PREVIEW_ROWS: usize = 5;

/// Load readings from a `timestamp,count1,count2,count3,count4` CSV file.
///
/// A missing file or a file without any valid data row is reported as
/// [`IngestError::MissingInput`] / [`IngestError::EmptyInput`] so callers can short-circuit.
pub fn load_readings(path: &Path) -> Result<Vec<SensorReading>, IngestError> {
    let file = match fs::File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(IngestError::MissingInput(path.to_path_buf()))
        }
        Err(source) => {
            return Err(IngestError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let readings = read_readings(file)?;
    if readings.is_empty() {
        return Err(IngestError::EmptyInput(path.to_path_buf()));
    }
    info!(path = %path.display(), rows = readings.len(), "sensor readings loaded");
    debug!(preview = ?&readings[..readings.len().min(PREVIEW_ROWS)], "first sensor readings");
    Ok(readings)
}

/// Parse readings from any CSV source, skipping the header and malformed rows.
pub fn read_readings<R: Read>(reader: R) -> Result<Vec<SensorReading>, IngestError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut readings = Vec::new();
    for row in reader.records() {
        let record = match row {
            Ok(record) => record,
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => {
                debug!(
                    line = ?err.position().map(|p| p.line()),
                    error = %err,
                    "skipping unreadable sensor row"
                );
                continue;
            }
        };
        match parse_record(&record) {
            Some(reading) => readings.push(reading),
            None => debug!(
                line = ?source_line(&record),
                record = ?record,
                "skipping malformed sensor row"
            ),
        }
    }
    Ok(readings)
}

/// 1-based line of the record in the source file, header included.
fn source_line(record: &StringRecord) -> Option<u64> {
    record.position().map(|position| position.line())
}

fn parse_record(record: &StringRecord) -> Option<SensorReading> {
    if record.len() < SENSOR_COUNT + 1 {
        return None;
    }
    let timestamp: f64 = record.get(0)?.parse().ok()?;
    if !timestamp.is_finite() {
        return None;
    }
    let mut counts = [0u64; SENSOR_COUNT];
    for (index, count) in counts.iter_mut().enumerate() {
        *count = record.get(index + 1)?.parse().ok()?;
    }
    Some(SensorReading::new(timestamp, counts))
}
